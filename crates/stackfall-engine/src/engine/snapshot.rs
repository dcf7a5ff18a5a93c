use serde::{Deserialize, Serialize};

use crate::core::{
    cell::Cell,
    figure::{Figure, FigureKind},
    settled_field::SettledField,
};

/// Read-only view of a session for renderers and drivers.
///
/// Holds copies of everything a front-end draws: the falling figure, the settled field, the
/// counters, the two flags, and the upcoming shape.
///
/// # Example
///
/// ```
/// use stackfall_engine::{GameConfig, GameSession};
///
/// let session = GameSession::new(GameConfig::default());
/// let snapshot = session.snapshot();
/// assert_eq!(snapshot.score, 0);
/// assert_eq!(snapshot.level, 1);
/// assert!(!snapshot.paused && !snapshot.game_over);
/// assert!(snapshot.settled.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub figure_kind: FigureKind,
    pub figure_cells: [Cell; 4],
    pub settled: SettledField,
    pub score: usize,
    pub level: usize,
    pub paused: bool,
    pub game_over: bool,
    pub next_kind: FigureKind,
}

impl SessionSnapshot {
    /// Rebuilds the falling figure.
    ///
    /// Returns `None` if the stored cells are not four distinct cells.
    #[must_use]
    pub fn figure(&self) -> Option<Figure> {
        Figure::from_cells(self.figure_kind, self.figure_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionSnapshot {
        SessionSnapshot {
            figure_kind: FigureKind::T,
            figure_cells: Figure::at_column(FigureKind::T, 3).translated(0, 5).cells().to_owned(),
            settled: SettledField::from_cells([Cell::new(0, 19), Cell::new(9, 19)]).unwrap(),
            score: 300,
            level: 1,
            paused: true,
            game_over: false,
            next_kind: FigureKind::Line,
        }
    }

    #[test]
    fn test_figure_cells() {
        let snapshot = sample();
        assert_eq!(
            snapshot.figure(),
            Some(Figure::at_column(FigureKind::T, 3).translated(0, 5))
        );

        let mut broken = snapshot;
        broken.figure_cells[1] = broken.figure_cells[0];
        assert_eq!(broken.figure(), None);
    }

    #[test]
    fn test_json_shape() {
        let snapshot = sample();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["figure_kind"], "T");
        assert_eq!(value["figure_cells"][0]["col"], 3);
        assert_eq!(value["figure_cells"][0]["row"], 5);
        assert_eq!(value["next_kind"], "Line");
        assert_eq!(value["paused"], true);
        let settled = value["settled"].as_str().unwrap();
        assert!(settled.ends_with(",0201"));

        let parsed: SessionSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
