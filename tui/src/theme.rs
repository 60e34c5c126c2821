//! Color theme and glyphs for the Vitrine TUI.
//!
//! Dark terminal palette with an emerald accent, matching the page the
//! site renders in a browser.

use ratatui::style::{Color, Modifier, Style};

/// Palette constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG: Color = Color::Rgb(13, 13, 16);
    pub const BG_PANEL: Color = Color::Rgb(20, 21, 26);
    pub const BG_FIELD: Color = Color::Rgb(28, 30, 37);
    pub const BG_BORDER: Color = Color::Rgb(58, 62, 74);

    // === Foregrounds ===
    pub const TEXT: Color = Color::Rgb(228, 230, 235);
    pub const TEXT_DIM: Color = Color::Rgb(150, 155, 165);
    pub const TEXT_FAINT: Color = Color::Rgb(92, 97, 108);

    // === Accents ===
    pub const EMERALD: Color = Color::Rgb(52, 211, 153);
    pub const EMERALD_DIM: Color = Color::Rgb(16, 185, 129);
    pub const CYAN: Color = Color::Rgb(103, 232, 249);
    pub const AMBER: Color = Color::Rgb(252, 211, 77);
    pub const RED: Color = Color::Rgb(248, 113, 113);

    // === Semantic Aliases ===
    pub const ACCENT: Color = EMERALD;
    pub const LINK: Color = CYAN;
    pub const SUCCESS: Color = EMERALD;
    pub const WARNING: Color = AMBER;
    pub const ERROR: Color = RED;
}

/// Resolved theme palette used by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_field: Color,
    pub bg_border: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_faint: Color,
    pub accent: Color,
    pub accent_dim: Color,
    pub link: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: colors::BG,
            bg_panel: colors::BG_PANEL,
            bg_field: colors::BG_FIELD,
            bg_border: colors::BG_BORDER,
            text: colors::TEXT,
            text_dim: colors::TEXT_DIM,
            text_faint: colors::TEXT_FAINT,
            accent: colors::ACCENT,
            accent_dim: colors::EMERALD_DIM,
            link: colors::LINK,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// ASCII/Unicode glyphs for the cursor overlay and decorations.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub cursor: &'static str,
    pub cursor_code: &'static str,
    pub cursor_link: &'static str,
    pub prompt: &'static str,
    pub caret: &'static str,
    pub block_cursor: &'static str,
    pub bullet: &'static str,
    pub menu: &'static str,
    pub arrow: &'static str,
    pub box_tl: &'static str,
    pub box_tr: &'static str,
    pub box_bl: &'static str,
    pub box_br: &'static str,
    pub box_h: &'static str,
    pub box_v: &'static str,
}

#[must_use]
pub fn glyphs(ascii_only: bool) -> Glyphs {
    if ascii_only {
        Glyphs {
            cursor: "o",
            cursor_code: "</>",
            cursor_link: "->",
            prompt: ">",
            caret: "|",
            block_cursor: "#",
            bullet: "*",
            menu: "=",
            arrow: "->",
            box_tl: "+",
            box_tr: "+",
            box_bl: "+",
            box_br: "+",
            box_h: "-",
            box_v: "|",
        }
    } else {
        Glyphs {
            cursor: "○",
            cursor_code: "</>",
            cursor_link: "➜",
            prompt: "❯",
            caret: "▏",
            block_cursor: "█",
            bullet: "•",
            menu: "≡",
            arrow: "→",
            box_tl: "╭",
            box_tr: "╮",
            box_bl: "╰",
            box_br: "╯",
            box_h: "─",
            box_v: "│",
        }
    }
}

/// Pre-defined styles for common page elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_dim)
    }

    #[must_use]
    pub fn link(palette: &Palette) -> Style {
        Style::default().fg(palette.link)
    }

    #[must_use]
    pub fn link_hover(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.link)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn terminal_text(palette: &Palette) -> Style {
        Style::default().fg(palette.success)
    }

    #[must_use]
    pub fn field_label(palette: &Palette) -> Style {
        Style::default().fg(palette.text_dim)
    }

    #[must_use]
    pub fn field_text(palette: &Palette) -> Style {
        Style::default().fg(palette.text).bg(palette.bg_field)
    }

    #[must_use]
    pub fn button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn button_busy(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg)
            .bg(palette.accent_dim)
            .add_modifier(Modifier::DIM)
    }

    #[must_use]
    pub fn button_failed(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg)
            .bg(palette.error)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_faint)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default().fg(palette.error)
    }
}
