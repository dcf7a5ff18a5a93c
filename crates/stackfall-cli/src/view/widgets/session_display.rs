use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use stackfall_engine::{GameSession, SessionState};

use super::{FieldDisplay, FigurePreview, StatsDisplay, palette};

/// Full game view: stats on the left, the field in the middle, the next figure on the right.
///
/// Border colour follows the session state, and a banner covers the field while paused,
/// after game over, or while a restart waits for confirmation.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    confirm_restart: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            confirm_restart: false,
        }
    }

    pub fn confirm_restart(self, confirm_restart: bool) -> Self {
        Self {
            confirm_restart,
            ..self
        }
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        if self.confirm_restart {
            return Some(("RESTART? (y/n)", palette::CONFIRM_BANNER));
        }
        match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", palette::PAUSED_BANNER)),
            SessionState::GameOver => Some(("GAME OVER!!", palette::GAME_OVER_BANNER)),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.session.session_state() {
            SessionState::Playing => Color::White,
            SessionState::Paused => Color::Yellow,
            SessionState::GameOver => Color::Red,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::symmetric(1, 0))
                .border_style(border_style)
                .style(palette::TEXT)
        };

        let snapshot = self.session.snapshot();
        let field = FieldDisplay::new(&snapshot.settled)
            .falling_figure(snapshot.figure())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(palette::TEXT),
            );
        let preview = FigurePreview::new()
            .kind(snapshot.next_kind)
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.session.stats()).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(field.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [field_area] =
            Layout::vertical([Constraint::Length(field.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);

        let field_width = field.width();
        stats.render(stats_area, buf);
        field.render(field_area, buf);
        preview.render(preview_area, buf);

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = field_area.centered(Constraint::Length(field_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
