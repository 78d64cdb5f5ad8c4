//! Turns raw pointer and keyboard events into edits of a [`Circuit`].
//!
//! The machine is a plain value owned by whoever runs the event loop and is
//! handed the circuit on every event. A single gesture always ends back in
//! [`Interaction::Idle`]; nothing stays selected between gestures.

use log::debug;

use crate::{
    circuit::Circuit,
    components::CompKind,
    error::CircuitError,
    toolbar::{self, ToolbarEntry, PLACEMENT_Y},
    types::{Point, ID},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        target: ID,
    },
    /// A wire is pending from `source`. Pressing a source also grabs it, so
    /// `dragging` holds it until the button is released.
    Connecting {
        source: ID,
        dragging: Option<ID>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press { pos: Point, button: PointerButton },
    Release { pos: Point, button: PointerButton },
    Moved(Point),
    /// Delete key, carrying the pointer position at the time.
    Delete(Point),
}

/// What an event did. Rejections are reported here instead of as errors so
/// the front-end can ignore them.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Nothing,
    Placed(ID),
    /// Toolbar asked for the frame to be exported.
    Save,
    /// Toolbar asked for the frame to be opened in a viewer.
    Print,
    DragStarted(ID),
    Moved(ID),
    DragEnded(ID),
    ConnectStarted(ID),
    Connected { from: ID, to: ID },
    ConnectRejected(CircuitError),
    ConnectCancelled,
    Toggled { id: ID, state: bool },
    Deleted(ID),
}

impl Interaction {
    pub fn dragged(&self) -> Option<ID> {
        match *self {
            Interaction::Idle => None,
            Interaction::Dragging { target } => Some(target),
            Interaction::Connecting { dragging, .. } => dragging,
        }
    }

    pub fn pending_source(&self) -> Option<ID> {
        match *self {
            Interaction::Connecting { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn handle(&mut self, ckt: &mut Circuit, ev: InputEvent) -> Outcome {
        match ev {
            InputEvent::Press {
                pos,
                button: PointerButton::Primary,
            } => self.primary_press(ckt, pos),
            InputEvent::Press {
                pos,
                button: PointerButton::Secondary,
            } => self.secondary_press(ckt, pos),
            InputEvent::Release {
                button: PointerButton::Primary,
                ..
            } => self.release(ckt),
            InputEvent::Release { .. } => Outcome::Nothing,
            InputEvent::Moved(pos) => self.pointer_moved(ckt, pos),
            InputEvent::Delete(pos) => self.delete_at(ckt, pos),
        }
    }

    fn primary_press(&mut self, ckt: &mut Circuit, pos: Point) -> Outcome {
        if toolbar::in_toolbar(pos) {
            return match toolbar::entry_at(pos) {
                Some(ToolbarEntry::Place(kind)) => {
                    Outcome::Placed(ckt.add_component(kind, Point::new(pos.x, PLACEMENT_Y)))
                }
                Some(ToolbarEntry::Save) => Outcome::Save,
                Some(ToolbarEntry::Print) => Outcome::Print,
                None => Outcome::Nothing,
            };
        }
        let Some(hit) = ckt.component_at(pos) else {
            return Outcome::Nothing;
        };

        if let Interaction::Connecting { source, .. } = *self {
            self.end_drag(ckt);
            *self = Interaction::Idle;
            return match ckt.connect(source, hit) {
                Ok(()) => Outcome::Connected {
                    from: source,
                    to: hit,
                },
                Err(e) => {
                    debug!("connection rejected: {}", e);
                    Outcome::ConnectRejected(e)
                }
            };
        }

        self.end_drag(ckt);
        let Some(comp) = ckt.get_component_mut(hit) else {
            return Outcome::Nothing;
        };
        comp.start_drag(pos);
        if comp.kind.is_source() {
            *self = Interaction::Connecting {
                source: hit,
                dragging: Some(hit),
            };
            Outcome::ConnectStarted(hit)
        } else {
            *self = Interaction::Dragging { target: hit };
            Outcome::DragStarted(hit)
        }
    }

    fn secondary_press(&mut self, ckt: &mut Circuit, pos: Point) -> Outcome {
        let cancelled = self.pending_source().is_some();
        *self = match self.dragged() {
            Some(target) => Interaction::Dragging { target },
            None => Interaction::Idle,
        };
        let toggled = ckt
            .components()
            .find(|c| c.kind == CompKind::Input && c.contains(pos))
            .map(|c| c.id);
        match toggled {
            Some(id) => match ckt.toggle_input(id) {
                Ok(state) => Outcome::Toggled { id, state },
                Err(_) => Outcome::Nothing,
            },
            None if cancelled => Outcome::ConnectCancelled,
            None => Outcome::Nothing,
        }
    }

    fn release(&mut self, ckt: &mut Circuit) -> Outcome {
        let Some(id) = self.end_drag(ckt) else {
            return Outcome::Nothing;
        };
        *self = match *self {
            Interaction::Connecting { source, .. } => Interaction::Connecting {
                source,
                dragging: None,
            },
            _ => Interaction::Idle,
        };
        Outcome::DragEnded(id)
    }

    fn pointer_moved(&mut self, ckt: &mut Circuit, pos: Point) -> Outcome {
        let Some(id) = self.dragged() else {
            return Outcome::Nothing;
        };
        match ckt.get_component_mut(id) {
            Some(comp) => {
                comp.drag(pos);
                Outcome::Moved(id)
            }
            None => Outcome::Nothing,
        }
    }

    fn delete_at(&mut self, ckt: &mut Circuit, pos: Point) -> Outcome {
        let Some(hit) = ckt.component_at(pos) else {
            return Outcome::Nothing;
        };
        if ckt.remove_component(hit).is_err() {
            return Outcome::Nothing;
        }
        // forget whatever pointed at the deleted component
        *self = match *self {
            Interaction::Dragging { target } if target == hit => Interaction::Idle,
            Interaction::Connecting { source, dragging } if source == hit => match dragging {
                Some(d) if d != hit => Interaction::Dragging { target: d },
                _ => Interaction::Idle,
            },
            Interaction::Connecting {
                source,
                dragging: Some(d),
            } if d == hit => Interaction::Connecting {
                source,
                dragging: None,
            },
            other => other,
        };
        Outcome::Deleted(hit)
    }

    // releases the grabbed component, if any, without changing state
    fn end_drag(&self, ckt: &mut Circuit) -> Option<ID> {
        let id = self.dragged()?;
        ckt.get_component_mut(id).map(|c| {
            c.end_drag();
            id
        })
    }
}
