use designer_engine::{
    circuit::Circuit,
    interaction::{InputEvent, Interaction, Outcome, PointerButton},
};
use egui::{Event, Key, Pos2, UserData, ViewportCommand};
use log::{debug, error, info};

use crate::{
    component_ui::{paint_component, paint_pending_wire, paint_wires},
    config::Config,
    consts::WHITE,
    snapshot::{print_diagram, save_diagram, SnapshotKind},
    top_bar::paint_toolbar,
    utils::to_point,
};

/// The whole app state. eframe calls `update` once per frame, which makes
/// it the event loop: input is applied to the circuit first, then the
/// settled circuit is painted.
pub struct DesignerApp {
    ckt: Circuit,
    interaction: Interaction,
    config: Config,
    // last known pointer position, needed for Delete and the rubber band
    pointer: Option<Pos2>,
}

impl DesignerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self {
            ckt: Circuit::new(),
            interaction: Interaction::default(),
            config,
            pointer: None,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for ev in events {
            if let Event::Screenshot {
                image, user_data, ..
            } = &ev
            {
                self.on_screenshot(image, user_data);
                continue;
            }
            if let Event::Key {
                key: Key::T,
                pressed: true,
                repeat: false,
                ..
            } = ev
            {
                self.log_truth_table();
                continue;
            }
            if let Some(ie) = self.translate(&ev) {
                let outcome = self.interaction.handle(&mut self.ckt, ie);
                self.on_outcome(ctx, outcome);
            }
        }
    }

    fn translate(&mut self, ev: &Event) -> Option<InputEvent> {
        match ev {
            Event::PointerMoved(p) => {
                self.pointer = Some(*p);
                Some(InputEvent::Moved(to_point(*p)))
            }
            Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                self.pointer = Some(*pos);
                let button = match button {
                    egui::PointerButton::Primary => PointerButton::Primary,
                    egui::PointerButton::Secondary => PointerButton::Secondary,
                    _ => return None,
                };
                let pos = to_point(*pos);
                Some(if *pressed {
                    InputEvent::Press { pos, button }
                } else {
                    InputEvent::Release { pos, button }
                })
            }
            Event::Key {
                key: Key::Delete,
                pressed: true,
                repeat: false,
                ..
            } => self.pointer.map(|p| InputEvent::Delete(to_point(p))),
            _ => None,
        }
    }

    fn on_outcome(&mut self, ctx: &egui::Context, outcome: Outcome) {
        match outcome {
            Outcome::Nothing | Outcome::Moved(_) => {}
            Outcome::Save => {
                ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::new(
                    SnapshotKind::Save,
                )));
            }
            Outcome::Print => {
                ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::new(
                    SnapshotKind::Print,
                )));
            }
            other => debug!("{:?}", other),
        }
    }

    fn on_screenshot(&self, image: &egui::ColorImage, user_data: &UserData) {
        let kind = user_data
            .data
            .as_ref()
            .and_then(|d| d.downcast_ref::<SnapshotKind>());
        let res = match kind {
            Some(SnapshotKind::Save) => save_diagram(image, &self.config.export_dir),
            Some(SnapshotKind::Print) => print_diagram(image),
            None => return,
        };
        if let Err(e) = res {
            error!("{:?} failed: {:#}", kind, e);
        }
    }

    // T dumps the whole circuit's truth table to the log
    fn log_truth_table(&mut self) {
        match self.ckt.gen_truth_table() {
            Ok(table) => info!("circuit truth table:\n{}", table),
            Err(e) => error!("no truth table: {}", e),
        }
    }

    fn ui(&self, ui: &mut egui::Ui) {
        let painter = ui.painter();
        paint_toolbar(painter);
        for comp in self.ckt.components() {
            paint_component(&self.ckt, comp, painter);
        }
        paint_wires(&self.ckt, painter);
        if let (Some(source), Some(pointer)) = (self.interaction.pending_source(), self.pointer) {
            paint_pending_wire(&self.ckt, source, pointer, painter);
        }
    }
}

impl eframe::App for DesignerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(WHITE))
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }
}
