use std::f32::consts::{FRAC_PI_2, PI};

use designer_engine::{
    circuit::Circuit,
    components::{CompKind, Component},
    gates::GateType,
    table::gate_truth_table,
    types::ID,
};
use egui::{pos2, vec2, Align2, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::{
    consts::{
        BLACK, BLUE_COL, BUBBLE_RADIUS, HIGHLIGHT_COL, LABEL_FONT_SIZE, LINE_WIDTH,
        STATE_FONT_SIZE, STUB_LEN, TABLE_FONT_SIZE, TABLE_GAP, TABLE_WIDTH, WHITE,
    },
    true_false_color,
    utils::to_rect,
};

pub fn paint_component(ckt: &Circuit, comp: &Component, painter: &Painter) {
    let rect = to_rect(&comp.bounds);
    match comp.kind {
        CompKind::Gate(g) => {
            paint_gate_body(g, rect, painter, comp.state);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                g.name(),
                FontId::proportional(LABEL_FONT_SIZE),
                BLACK,
            );
            paint_truth_table(g, ckt.highlighted_row(comp.id), rect, painter);
        }
        CompKind::Input | CompKind::Output => {
            painter.rect_filled(rect, 0.0, true_false_color!(comp.state));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                if comp.state { "1" } else { "0" },
                FontId::proportional(STATE_FONT_SIZE),
                BLACK,
            );
        }
    }
}

fn paint_gate_body(g: GateType, rect: Rect, painter: &Painter, state: bool) {
    let stroke = Stroke::new(LINE_WIDTH, BLACK);
    match g {
        GateType::And | GateType::Nand => {
            painter.line_segment([rect.left_top(), rect.left_bottom()], stroke);
            painter.line_segment([rect.left_top(), pos2(rect.center().x, rect.top())], stroke);
            painter.line_segment(
                [rect.left_bottom(), pos2(rect.center().x, rect.bottom())],
                stroke,
            );
            painter.add(Shape::line(
                ellipse_arc(rect, -FRAC_PI_2, FRAC_PI_2),
                stroke,
            ));
        }
        GateType::Or | GateType::Nor | GateType::Xor | GateType::Xnor => {
            let front = Rect::from_min_max(pos2(rect.left() - 40.0, rect.top()), rect.max);
            painter.add(Shape::line(
                ellipse_arc(front, -FRAC_PI_2, FRAC_PI_2),
                stroke,
            ));
            let back = Rect::from_min_size(
                pos2(rect.left() - 20.0, rect.top()),
                vec2(40.0, rect.height()),
            );
            painter.add(Shape::line(ellipse_arc(back, FRAC_PI_2, 1.5 * PI), stroke));
            if matches!(g, GateType::Xor | GateType::Xnor) {
                painter.add(Shape::line(
                    ellipse_arc(back.translate(vec2(-10.0, 0.0)), FRAC_PI_2, 1.5 * PI),
                    stroke,
                ));
            }
        }
        GateType::Not | GateType::Buffer => {
            painter.add(Shape::closed_line(
                vec![
                    rect.left_top(),
                    rect.left_bottom(),
                    pos2(rect.right() - 10.0, rect.center().y),
                ],
                stroke,
            ));
        }
    }

    if g.is_inverted() {
        // the NOT triangle stops short of the right edge, so its bubble sits closer
        let x = match g {
            GateType::Not => rect.right(),
            _ => rect.right() + BUBBLE_RADIUS,
        };
        painter.circle_filled(pos2(x, rect.center().y), BUBBLE_RADIUS, BLACK);
    }

    for y in input_pin_ys(g, rect) {
        painter.line_segment([pos2(rect.left() - STUB_LEN, y), pos2(rect.left(), y)], stroke);
    }
    painter.line_segment(
        [rect.right_center(), rect.right_center() + vec2(STUB_LEN, 0.0)],
        Stroke::new(LINE_WIDTH, true_false_color!(state)),
    );
}

fn input_pin_ys(g: GateType, rect: Rect) -> Vec<f32> {
    if g.max_inputs() == 1 {
        vec![rect.center().y]
    } else {
        vec![
            rect.top() + rect.height() * 0.25,
            rect.top() + rect.height() * 0.75,
        ]
    }
}

// Points along the ellipse inscribed in `rect`, angles measured
// counter-clockwise from +x with y pointing up.
fn ellipse_arc(rect: Rect, from: f32, to: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 24;
    let c = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    (0..=SEGMENTS)
        .map(|i| {
            let t = from + (to - from) * i as f32 / SEGMENTS as f32;
            pos2(c.x + rx * t.cos(), c.y - ry * t.sin())
        })
        .collect()
}

/// The reference table below a gate, with the row matching its current
/// inputs highlighted.
fn paint_truth_table(g: GateType, highlighted: Option<usize>, rect: Rect, painter: &Painter) {
    let table = gate_truth_table(g);
    let n_rows = table.rows().len() + 1;
    let height = if g.max_inputs() == 2 { 80.0 } else { 60.0 };
    let panel = Rect::from_min_size(
        pos2(
            rect.left() + (rect.width() - TABLE_WIDTH) / 2.0,
            rect.bottom() + TABLE_GAP,
        ),
        vec2(TABLE_WIDTH, height),
    );
    painter.rect_filled(panel, 0.0, WHITE);

    let row_h = height / n_rows as f32;
    let (pins, out) = table.columns().split_at(table.columns().len() - 1);
    let header = format!("{} | {}", pins.join(" "), out.join(""));
    let lines = std::iter::once(header).chain(table.rows().iter().map(|row| {
        let (ins, q) = row.split_at(row.len() - 1);
        let ins: Vec<String> = ins.iter().map(|c| c.to_string()).collect();
        format!("{} | {}", ins.join(" "), q.iter().collect::<String>())
    }));

    for (i, line) in lines.enumerate() {
        let row_rect = Rect::from_min_size(
            panel.min + vec2(0.0, i as f32 * row_h),
            vec2(TABLE_WIDTH, row_h),
        );
        if i > 0 && highlighted == Some(i - 1) {
            painter.rect_filled(row_rect, 0.0, HIGHLIGHT_COL);
        }
        painter.text(
            row_rect.left_center() + vec2(5.0, 0.0),
            Align2::LEFT_CENTER,
            line,
            FontId::monospace(TABLE_FONT_SIZE),
            BLACK,
        );
    }
    painter.rect_stroke(panel, 0.0, Stroke::new(1.0, BLACK));
}

// where a wire leaves `comp`
fn output_anchor(comp: &Component) -> Pos2 {
    let rect = to_rect(&comp.bounds);
    match comp.kind {
        CompKind::Output => rect.right_center(),
        _ => rect.right_center() + vec2(STUB_LEN, 0.0),
    }
}

// where the `slot`th wire enters `comp`
fn input_anchor(comp: &Component, slot: usize) -> Pos2 {
    let rect = to_rect(&comp.bounds);
    match comp.kind {
        CompKind::Gate(g) => {
            let ys = input_pin_ys(g, rect);
            pos2(rect.left() - STUB_LEN, ys[slot.min(ys.len() - 1)])
        }
        _ => rect.left_center(),
    }
}

pub fn paint_wires(ckt: &Circuit, painter: &Painter) {
    let stroke = Stroke::new(LINE_WIDTH, BLACK);
    for wire in ckt.wires() {
        let (Some(from), Some(to)) = (ckt.get_component(wire.from), ckt.get_component(wire.to))
        else {
            continue;
        };
        let slot = ckt
            .inputs_of(wire.to)
            .iter()
            .position(|id| *id == wire.from)
            .unwrap_or(0);
        painter.line_segment([output_anchor(from), input_anchor(to, slot)], stroke);
    }
}

/// Rubber band from a pending wire's source to the pointer.
pub fn paint_pending_wire(ckt: &Circuit, source: ID, pointer: Pos2, painter: &Painter) {
    if let Some(comp) = ckt.get_component(source) {
        painter.line_segment(
            [output_anchor(comp), pointer],
            Stroke::new(LINE_WIDTH, BLUE_COL),
        );
    }
}
