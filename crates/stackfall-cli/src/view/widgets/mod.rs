use ratatui::{
    layout::{Rect, Size},
    widgets::Block,
};

pub use self::{
    cell_display::*, field_display::*, figure_preview::*, key_binding_display::*,
    session_display::*, stats_display::*,
};

mod cell_display;
mod field_display;
mod figure_preview;
mod key_binding_display;
mod session_display;
mod stats_display;

/// Terminal palette. Named ANSI colours follow the user's terminal theme.
mod palette {
    use ratatui::style::{Color, Style};
    use stackfall_engine::FigureKind;

    const fn solid(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const TEXT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const EMPTY: Style = solid(Color::Black);
    pub const EMPTY_DOT: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);
    pub const SETTLED: Style = solid(Color::Gray);

    pub const PAUSED_BANNER: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
    pub const GAME_OVER_BANNER: Style = Style::new().fg(Color::White).bg(Color::Red);
    pub const CONFIRM_BANNER: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

    pub const fn figure(kind: FigureKind) -> Style {
        solid(match kind {
            FigureKind::Line => Color::Cyan,
            FigureKind::Square => Color::Yellow,
            FigureKind::T => Color::Magenta,
            FigureKind::S => Color::Green,
            FigureKind::Z => Color::Red,
            FigureKind::J => Color::Blue,
            FigureKind::L => Color::LightRed,
        })
    }
}

/// Space taken by the borders and padding of an optional block.
fn block_margin(block: Option<&Block>) -> Size {
    let Some(block) = block else {
        return Size::ZERO;
    };
    let outer = Rect::new(0, 0, u16::MAX / 2, u16::MAX / 2);
    let inner = block.inner(outer);
    Size::new(outer.width - inner.width, outer.height - inner.height)
}
