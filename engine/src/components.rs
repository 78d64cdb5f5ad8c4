use crate::{
    gates::GateType,
    types::{Bounds, Point, ID},
};

pub const INPUT_SIZE: (f32, f32) = (50.0, 50.0);
pub const GATE_SIZE: (f32, f32) = (80.0, 60.0);
pub const OUTPUT_SIZE: (f32, f32) = (50.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompKind {
    Input,
    Gate(GateType),
    Output,
}

impl CompKind {
    pub fn name(&self) -> &'static str {
        match self {
            CompKind::Input => "INPUT",
            CompKind::Gate(g) => g.name(),
            CompKind::Output => "OUTPUT",
        }
    }
    // anything but an output can feed a wire
    pub fn is_source(&self) -> bool {
        !matches!(self, CompKind::Output)
    }
    // anything but an input can receive one
    pub fn is_target(&self) -> bool {
        !matches!(self, CompKind::Input)
    }
    /// Number of wires the component accepts, `None` when unbounded.
    /// Outputs tolerate any fan-in and OR it together.
    pub fn max_inputs(&self) -> Option<usize> {
        match self {
            CompKind::Input => Some(0),
            CompKind::Gate(g) => Some(g.max_inputs()),
            CompKind::Output => None,
        }
    }
    fn size(&self) -> (f32, f32) {
        match self {
            CompKind::Input => INPUT_SIZE,
            CompKind::Gate(_) => GATE_SIZE,
            CompKind::Output => OUTPUT_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Component {
    pub id: ID,
    pub kind: CompKind,
    pub label: String,
    pub bounds: Bounds,
    pub state: bool,
    // pointer -> top left corner, set while a drag is in progress
    drag_offset: Option<Point>,
}

impl Component {
    pub fn new(id: ID, kind: CompKind, label: &str, at: Point) -> Component {
        let (w, h) = kind.size();
        let mut c = Component {
            id,
            kind,
            label: label.to_owned(),
            bounds: Bounds::new(at.x, at.y, w, h),
            state: false,
            drag_offset: None,
        };
        if let CompKind::Gate(g) = kind {
            // unconnected gates start at their default value
            c.state = g.eval(&[]);
        }
        c
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    pub fn start_drag(&mut self, pointer: Point) {
        self.drag_offset = Some(self.bounds.origin() - pointer);
    }

    pub fn drag(&mut self, pointer: Point) {
        if let Some(offset) = self.drag_offset {
            let to = pointer + offset;
            self.bounds.x = to.x;
            self.bounds.y = to.y;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_offset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_keeps_grab_offset() {
        let kind = CompKind::Gate(GateType::And);
        let mut c = Component::new(1, kind, "AND", Point::new(100.0, 100.0));
        c.start_drag(Point::new(110.0, 120.0));
        assert!(c.is_dragging());
        c.drag(Point::new(210.0, 220.0));
        assert_eq!(c.bounds.origin(), Point::new(200.0, 200.0));
        c.end_drag();
        c.drag(Point::new(0.0, 0.0));
        assert_eq!(c.bounds.origin(), Point::new(200.0, 200.0));
    }

    #[test]
    fn sizes_and_defaults() {
        let inp = Component::new(1, CompKind::Input, "A", Point::new(0.0, 100.0));
        assert_eq!((inp.bounds.width, inp.bounds.height), INPUT_SIZE);
        assert!(!inp.state);
        let kind = CompKind::Gate(GateType::Nand);
        let nand = Component::new(2, kind, "NAND", Point::new(0.0, 100.0));
        assert_eq!((nand.bounds.width, nand.bounds.height), GATE_SIZE);
        assert!(nand.state);
        assert!(nand.contains(Point::new(79.0, 159.0)));
        assert!(!nand.contains(Point::new(80.0, 100.0)));
    }
}
