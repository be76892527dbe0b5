//! # Theme
//!
//! Declarative role → palette table. Rendering code looks colors up here and
//! never hard-codes them, so restyling a role is a one-line change.

use ratatui::style::Color;

use crate::core::message::{BubbleAlign, Role};

/// How a bubble for a given role is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub align: BubbleAlign,
    pub background: Color,
    pub foreground: Color,
}

const USER: Palette = Palette {
    align: BubbleAlign::Right,
    background: Color::Rgb(0x1f, 0x2a, 0x44), // dark blue
    foreground: Color::Rgb(0xe9, 0xf0, 0xff),
};

const ASSISTANT: Palette = Palette {
    align: BubbleAlign::Left,
    background: Color::Rgb(0x1c, 0x26, 0x30), // dark slate
    foreground: Color::Rgb(0xe8, 0xea, 0xf0),
};

const SYSTEM: Palette = Palette {
    align: BubbleAlign::Left,
    background: Color::Rgb(0x2a, 0x2e, 0x35), // neutral gray
    foreground: Color::Rgb(0xcb, 0xd3, 0xe1),
};

/// Window background.
pub const WINDOW_BG: Color = Color::Rgb(0x0e, 0x0f, 0x11);
/// Composer surface and border.
pub const INPUT_BG: Color = Color::Rgb(0x16, 0x18, 0x1c);
pub const INPUT_FG: Color = Color::Rgb(0xe8, 0xea, 0xf0);
pub const INPUT_BORDER: Color = Color::Rgb(0x2a, 0x2e, 0x35);
/// Send button.
pub const ACCENT: Color = Color::Rgb(0x29, 0x62, 0xff);
pub const ACCENT_DISABLED: Color = Color::Rgb(0x2a, 0x2e, 0x35);
pub const MUTED_FG: Color = Color::Rgb(0x8a, 0x90, 0x9c);

pub fn palette(role: Role) -> Palette {
    match role {
        Role::User => USER,
        Role::Assistant => ASSISTANT,
        Role::System => SYSTEM,
    }
}
