use ratatui::style::{Color, Modifier, Style};

// Base16 slots the reader draws with
#[derive(Clone, Copy, Debug)]
pub struct Base16Palette {
    pub base_00: Color, // Background
    pub base_02: Color, // Selection background
    pub base_03: Color, // Comments, invisibles
    pub base_04: Color, // Dark foreground
    pub base_05: Color, // Default foreground
    pub base_08: Color, // Red
    pub base_0c: Color, // Cyan
    pub base_0d: Color, // Blue
}

pub const OCEANIC_NEXT: Base16Palette = Base16Palette {
    base_00: Color::Rgb(0x1B, 0x2B, 0x34),
    base_02: Color::Rgb(0x4F, 0x5B, 0x66),
    base_03: Color::Rgb(0x65, 0x73, 0x7E),
    base_04: Color::Rgb(0xA7, 0xAD, 0xBA),
    base_05: Color::Rgb(0xC0, 0xC5, 0xCE),
    base_08: Color::Rgb(0xEC, 0x5f, 0x67),
    base_0c: Color::Rgb(0x5F, 0xB3, 0xB3),
    base_0d: Color::Rgb(0x66, 0x99, 0xCC),
};

impl Base16Palette {
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.base_0d)
            .add_modifier(Modifier::BOLD)
    }

    pub fn meta_style(&self) -> Style {
        Style::default().fg(self.base_03)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.base_05)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.base_04)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.base_08)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.base_02)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.base_0c)
    }
}
