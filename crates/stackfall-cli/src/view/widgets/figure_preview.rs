use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{Cell, FigureKind};

use super::CellDisplay;

/// Upcoming shape, centered in a box large enough for any shape.
#[derive(Debug)]
pub struct FigurePreview<'a> {
    kind: Option<FigureKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> FigurePreview<'a> {
    pub fn new() -> Self {
        Self {
            kind: None,
            block: None,
        }
    }

    pub fn kind(self, kind: FigureKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_margin(self.block.as_ref()).width
    }

    pub fn height(&self) -> u16 {
        4 * CellDisplay::height() + super::block_margin(self.block.as_ref()).height
    }
}

impl Widget for FigurePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.kind else {
            return;
        };
        let (w, h) = kind.size();
        let (w, h) = (u16::from(w), u16::from(h));
        let figure_area = area.centered(
            Constraint::Length(w * CellDisplay::width()),
            Constraint::Length(h * CellDisplay::height()),
        );

        let horizontal =
            Layout::horizontal((0..w).map(|_| Constraint::Length(CellDisplay::width())))
                .flex(Flex::Center);
        let vertical = Layout::vertical((0..h).map(|_| Constraint::Length(CellDisplay::height())));
        let grid_rows: Vec<_> = figure_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal))
            .collect();

        let cells = kind.preview_cells();
        let occupied = CellDisplay::figure(kind);
        let empty = CellDisplay::empty(false);
        for (y, grid_row) in (0..).zip(&grid_rows) {
            for (x, grid_cell) in (0..).zip(grid_row) {
                let display = if cells.contains(&Cell::new(x, y)) {
                    &occupied
                } else {
                    &empty
                };
                Widget::render(display, *grid_cell, buf);
            }
        }
    }
}
