use egui::Color32;

pub const WHITE: Color32 = Color32::WHITE;
pub const BLACK: Color32 = Color32::BLACK;
pub const RED_COL: Color32 = Color32::from_rgb(255, 0, 0);
pub const GREEN_COL: Color32 = Color32::from_rgb(0, 255, 0);
pub const BLUE_COL: Color32 = Color32::from_rgb(0, 0, 255);
pub const HIGHLIGHT_COL: Color32 = Color32::from_rgb(255, 255, 0);

// one per toolbar cell, left to right
pub const PALETTE_COLORS: [Color32; 12] = [
    RED_COL,
    BLUE_COL,
    GREEN_COL,
    Color32::from_rgb(255, 165, 0),
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(0, 255, 255),
    Color32::from_rgb(128, 0, 128),
    Color32::from_rgb(255, 192, 203),
    Color32::from_rgb(165, 42, 42),
    BLACK,
    Color32::from_rgb(100, 100, 100),
    Color32::from_rgb(150, 150, 150),
];

pub const LINE_WIDTH: f32 = 2.0;
// length of the pin stubs drawn either side of a gate
pub const STUB_LEN: f32 = 20.0;
pub const BUBBLE_RADIUS: f32 = 5.0;

pub const STATE_FONT_SIZE: f32 = 28.0;
pub const LABEL_FONT_SIZE: f32 = 18.0;
pub const TABLE_FONT_SIZE: f32 = 14.0;

pub const TABLE_WIDTH: f32 = 60.0;
pub const TABLE_GAP: f32 = 10.0;
