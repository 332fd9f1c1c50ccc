//! Theme constants for the Isolation GUI

use egui::Color32;

// Board colors - checkerboard in warm wood tones
pub const LIGHT_SQUARE: Color32 = Color32::from_rgb(240, 217, 181);
pub const DARK_SQUARE: Color32 = Color32::from_rgb(181, 136, 99);
pub const BOARD_FRAME: Color32 = Color32::from_rgb(60, 40, 20);
pub const LABEL: Color32 = Color32::from_rgb(200, 190, 175);

// Queens
pub const PLAYER_ONE: Color32 = Color32::from_rgb(60, 120, 220);
pub const PLAYER_TWO: Color32 = Color32::from_rgb(220, 80, 60);
pub const QUEEN_OUTLINE: Color32 = Color32::from_rgb(20, 20, 25);
pub const TURN_RING: Color32 = Color32::from_rgb(250, 215, 60);

// Destroyed cells
pub const DESTROYED: Color32 = Color32::from_rgb(15, 15, 18);
pub const DESTROYED_CROSS: Color32 = Color32::from_rgb(200, 40, 40);

// Functions for colors that can't be const
pub fn legal_hint() -> Color32 {
    Color32::from_rgba_unmultiplied(60, 200, 90, 110)
}

pub fn hover_legal() -> Color32 {
    Color32::from_rgba_unmultiplied(60, 200, 90, 180)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const WIN_CARD_BG: Color32 = Color32::from_rgb(45, 80, 55);
pub const MESSAGE_BG: Color32 = Color32::from_rgb(80, 60, 30);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_READY: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_BUSY: Color32 = Color32::from_rgb(255, 180, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 28.0;
pub const QUEEN_RADIUS_RATIO: f32 = 0.34;
pub const HINT_RADIUS_RATIO: f32 = 0.14;
pub const CROSS_INSET_RATIO: f32 = 0.2;
