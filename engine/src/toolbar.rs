use crate::{
    components::CompKind,
    gates::GateType,
    types::{Bounds, Point},
};

pub const TOOLBAR_HEIGHT: f32 = 50.0;
pub const TOOLBAR_CELL_WIDTH: f32 = 85.0;
// new components drop in at the pointer's x and this y
pub const PLACEMENT_Y: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarEntry {
    Place(CompKind),
    Save,
    Print,
}

pub const PALETTE: [ToolbarEntry; 12] = [
    ToolbarEntry::Place(CompKind::Input),
    ToolbarEntry::Place(CompKind::Gate(GateType::And)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Or)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Not)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Nand)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Nor)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Xor)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Xnor)),
    ToolbarEntry::Place(CompKind::Gate(GateType::Buffer)),
    ToolbarEntry::Place(CompKind::Output),
    ToolbarEntry::Save,
    ToolbarEntry::Print,
];

impl ToolbarEntry {
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarEntry::Place(kind) => kind.name(),
            ToolbarEntry::Save => "SAVE",
            ToolbarEntry::Print => "PRINT",
        }
    }
}

pub fn cell_bounds(index: usize) -> Bounds {
    Bounds::new(
        index as f32 * TOOLBAR_CELL_WIDTH,
        0.0,
        TOOLBAR_CELL_WIDTH,
        TOOLBAR_HEIGHT,
    )
}

pub fn in_toolbar(p: Point) -> bool {
    p.y < TOOLBAR_HEIGHT
}

/// Palette entry under `p`. Points in the strip past the last cell map to
/// nothing.
pub fn entry_at(p: Point) -> Option<ToolbarEntry> {
    if !in_toolbar(p) || p.x < 0.0 {
        return None;
    }
    PALETTE.get((p.x / TOOLBAR_CELL_WIDTH) as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(entry_at(Point::new(10.0, 10.0)), Some(PALETTE[0]));
        assert_eq!(
            entry_at(Point::new(85.0, 49.0)),
            Some(ToolbarEntry::Place(CompKind::Gate(GateType::And)))
        );
        assert_eq!(entry_at(Point::new(11.0 * 85.0 + 1.0, 5.0)), Some(ToolbarEntry::Print));
        assert_eq!(entry_at(Point::new(12.0 * 85.0 + 1.0, 5.0)), None);
        assert_eq!(entry_at(Point::new(10.0, 50.0)), None);
    }

    #[test]
    fn labels_in_order() {
        let labels: Vec<&str> = PALETTE.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec![
                "INPUT", "AND", "OR", "NOT", "NAND", "NOR", "XOR", "XNOR", "BUFFER", "OUTPUT",
                "SAVE", "PRINT"
            ]
        );
        assert_eq!(cell_bounds(2).x, 170.0);
    }
}
