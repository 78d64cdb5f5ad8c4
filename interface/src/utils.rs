use designer_engine::types::{Bounds, Point};
use egui::{pos2, Pos2, Rect};

pub fn to_point(p: Pos2) -> Point {
    Point::new(p.x, p.y)
}

pub fn to_rect(b: &Bounds) -> Rect {
    Rect::from_min_size(pos2(b.x, b.y), egui::vec2(b.width, b.height))
}

#[macro_export]
macro_rules! true_false_color {
    ($a: expr) => {
        if $a {
            $crate::consts::GREEN_COL
        } else {
            $crate::consts::RED_COL
        }
    };
}
