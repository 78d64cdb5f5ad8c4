use designer_engine::toolbar::{cell_bounds, PALETTE};
use egui::{Align2, FontId, Painter};

use crate::{
    consts::{LABEL_FONT_SIZE, PALETTE_COLORS, WHITE},
    utils::to_rect,
};

// clicks on the strip are resolved by the engine; this only draws it
pub fn paint_toolbar(painter: &Painter) {
    for (i, (entry, color)) in PALETTE.iter().zip(PALETTE_COLORS).enumerate() {
        let cell = to_rect(&cell_bounds(i));
        painter.rect_filled(cell, 0.0, color);
        painter.text(
            cell.center(),
            Align2::CENTER_CENTER,
            entry.label(),
            FontId::proportional(LABEL_FONT_SIZE),
            WHITE,
        );
    }
}
