use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{FIELD_HEIGHT, FIELD_WIDTH, Figure, SettledField};

use super::CellDisplay;

/// The playing field: settled cells plus the falling figure.
///
/// Figure cells above the top row are not drawn.
#[derive(Debug)]
pub struct FieldDisplay<'a> {
    settled: &'a SettledField,
    falling_figure: Option<Figure>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> FieldDisplay<'a> {
    pub fn new(settled: &'a SettledField) -> Self {
        Self {
            settled,
            falling_figure: None,
            block: None,
        }
    }

    pub fn falling_figure(self, figure: Option<Figure>) -> Self {
        Self {
            falling_figure: figure,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        FIELD_WIDTH as u16 * CellDisplay::width()
            + super::block_margin(self.block.as_ref()).width
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        FIELD_HEIGHT as u16 * CellDisplay::height()
            + super::block_margin(self.block.as_ref()).height
    }

    fn grid(&self) -> [[CellDisplay; FIELD_WIDTH]; FIELD_HEIGHT] {
        let mut grid = [[CellDisplay::empty(true); FIELD_WIDTH]; FIELD_HEIGHT];
        for (grid_row, row) in iter::zip(&mut grid, self.settled.rows()) {
            for (display, occupied) in iter::zip(grid_row, row) {
                if occupied {
                    *display = CellDisplay::settled();
                }
            }
        }
        if let Some(figure) = self.falling_figure {
            let display = CellDisplay::figure(figure.kind());
            for (x, y) in figure.cells().iter().filter_map(|c| c.field_index()) {
                grid[y][x] = display;
            }
        }
        grid
    }
}

impl Widget for FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..FIELD_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..FIELD_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<FIELD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<FIELD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid()) {
            for (grid_cell, display) in iter::zip(grid_row, row) {
                display.render(grid_cell, buf);
            }
        }
    }
}
