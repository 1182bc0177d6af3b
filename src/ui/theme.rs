use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x16, 0xa3, 0x4a);
pub const FIELD_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const FIELD_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const PLACEHOLDER: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const REQUIRED_MARK: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const STATUS_OK: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const ACTIVE_HIGHLIGHT: Color = Color::Rgb(0x26, 0x26, 0x26);
