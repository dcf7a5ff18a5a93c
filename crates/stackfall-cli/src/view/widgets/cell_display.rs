use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackfall_engine::FigureKind;

use super::palette;

/// One field cell, drawn two columns wide so that cells look square.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self {
                style: palette::EMPTY_DOT,
                symbol: ".",
            }
        } else {
            Self {
                style: palette::EMPTY,
                symbol: "",
            }
        }
    }

    pub const fn settled() -> Self {
        Self {
            style: palette::SETTLED,
            symbol: "",
        }
    }

    pub const fn figure(kind: FigureKind) -> Self {
        Self {
            style: palette::figure(kind),
            symbol: "",
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not only the cells holding the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
