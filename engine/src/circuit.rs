use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, error, info};

use crate::{
    components::{CompKind, Component},
    error::{CircuitError, CircuitResult},
    gates::GateType,
    table::{bitwise_counter, Table},
    types::{Point, ID},
};

/// A directed edge from a component's output to one input slot of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wire {
    pub from: ID,
    pub to: ID,
}

/// The component graph.
///
/// Components live in an arena indexed by their `ID`; a deleted component
/// leaves an empty slot so handles stay valid and creation order is simply
/// ascending id. Every edge is stored exactly once, in connection order, so
/// the upstream and downstream views of a component can't disagree.
///
/// `connect` refuses edges that would close a loop, which keeps the graph
/// acyclic and lets propagation run in topological order.
#[derive(Debug, Default)]
pub struct Circuit {
    components: Vec<Option<Component>>,
    wires: Vec<Wire>,
    n_inputs: usize,
    n_outputs: usize,
}

impl Circuit {
    pub fn new() -> Circuit {
        Circuit::default()
    }

    pub fn add_component(&mut self, kind: CompKind, at: Point) -> ID {
        let id = self.components.len();
        let label = match kind {
            CompKind::Input => {
                self.n_inputs += 1;
                input_label(self.n_inputs - 1)
            }
            CompKind::Output => {
                self.n_outputs += 1;
                format!("Q{}", self.n_outputs - 1)
            }
            CompKind::Gate(g) => g.name().to_string(),
        };
        let comp = Component::new(id, kind, &label, at);
        info!("added {} #{} at ({}, {})", kind.name(), id, at.x, at.y);
        self.components.push(Some(comp));
        id
    }

    pub fn add_input(&mut self, at: Point) -> ID {
        self.add_component(CompKind::Input, at)
    }

    pub fn add_gate(&mut self, gate: GateType, at: Point) -> ID {
        self.add_component(CompKind::Gate(gate), at)
    }

    pub fn add_output(&mut self, at: Point) -> ID {
        self.add_component(CompKind::Output, at)
    }

    pub fn get_component(&self, id: ID) -> Option<&Component> {
        self.components.get(id).and_then(Option::as_ref)
    }

    pub fn get_component_mut(&mut self, id: ID) -> Option<&mut Component> {
        self.components.get_mut(id).and_then(Option::as_mut)
    }

    fn component(&self, id: ID) -> CircuitResult<&Component> {
        self.get_component(id).ok_or(CircuitError::UnknownComponent(id))
    }

    /// Live components in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.components().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn state(&self, id: ID) -> Option<bool> {
        self.get_component(id).map(|c| c.state)
    }

    /// Upstream neighbours of `id` in connection order.
    pub fn inputs_of(&self, id: ID) -> Vec<ID> {
        self.wires
            .iter()
            .filter(|w| w.to == id)
            .map(|w| w.from)
            .collect()
    }

    /// Downstream neighbours of `id` in connection order.
    pub fn outputs_of(&self, id: ID) -> Vec<ID> {
        self.wires
            .iter()
            .filter(|w| w.from == id)
            .map(|w| w.to)
            .collect()
    }

    /// Current states of the components wired into `id`, in connection order.
    pub fn input_states(&self, id: ID) -> Vec<bool> {
        self.wires
            .iter()
            .filter(|w| w.to == id)
            .filter_map(|w| self.state(w.from))
            .collect()
    }

    /// First component, in creation order, whose bounds contain `p`.
    pub fn component_at(&self, p: Point) -> Option<ID> {
        self.components().find(|c| c.contains(p)).map(|c| c.id)
    }

    /// The state `id` would take if it were re-evaluated now. Inputs keep
    /// whatever they were toggled to, and so does an Output with no wires.
    pub fn evaluate(&self, id: ID) -> CircuitResult<bool> {
        let comp = self.component(id)?;
        let ins = self.input_states(id);
        Ok(match comp.kind {
            CompKind::Input => comp.state,
            CompKind::Gate(g) => g.eval(&ins),
            CompKind::Output if ins.is_empty() => comp.state,
            CompKind::Output => ins.iter().any(|v| *v),
        })
    }

    pub fn connect(&mut self, from: ID, to: ID) -> CircuitResult<()> {
        let src = self.component(from)?;
        let dst = self.component(to)?;
        if from == to {
            return Err(CircuitError::SelfConnection(from));
        }
        if !src.kind.is_source() {
            return Err(CircuitError::InvalidSource(from));
        }
        if !dst.kind.is_target() {
            return Err(CircuitError::InvalidTarget(to));
        }
        let wire = Wire { from, to };
        if self.wires.contains(&wire) {
            return Err(CircuitError::DuplicateWire { from, to });
        }
        if let Some(max) = dst.kind.max_inputs() {
            if self.inputs_of(to).len() >= max {
                return Err(CircuitError::InputsFull { id: to, max });
            }
        }
        if self.reaches(to, from) {
            return Err(CircuitError::WouldCycle { from, to });
        }
        self.wires.push(wire);
        debug!("wired {} -> {}", from, to);
        // the source is re-evaluated, and the new wire carries its state on
        self.update(from)?;
        Ok(())
    }

    /// Drops the wire `from -> to`. Neighbour states are left untouched
    /// until their next update.
    pub fn disconnect(&mut self, from: ID, to: ID) -> CircuitResult<()> {
        let wire = Wire { from, to };
        match self.wires.iter().position(|w| *w == wire) {
            Some(idx) => {
                self.wires.remove(idx);
                debug!("unwired {} -> {}", from, to);
                Ok(())
            }
            None => Err(CircuitError::NoSuchWire { from, to }),
        }
    }

    /// Severs every wire touching `id`, returning how many were dropped.
    /// Like `disconnect`, this doesn't re-propagate.
    pub fn remove_connections(&mut self, id: ID) -> CircuitResult<usize> {
        self.component(id)?;
        let before = self.wires.len();
        self.wires.retain(|w| w.from != id && w.to != id);
        Ok(before - self.wires.len())
    }

    /// Deletes a component. Its wires are severed before the slot is freed
    /// so no neighbour is left pointing at it.
    pub fn remove_component(&mut self, id: ID) -> CircuitResult<Component> {
        let severed = self.remove_connections(id)?;
        let comp = self.components[id]
            .take()
            .ok_or(CircuitError::UnknownComponent(id))?;
        info!(
            "removed {} #{} ({} wires severed)",
            comp.kind.name(),
            id,
            severed
        );
        Ok(comp)
    }

    pub fn toggle_input(&mut self, id: ID) -> CircuitResult<bool> {
        let state = !self.component(id)?.state;
        self.set_input(id, state)?;
        Ok(state)
    }

    pub fn set_input(&mut self, id: ID, val: bool) -> CircuitResult<()> {
        let comp = self
            .get_component_mut(id)
            .ok_or(CircuitError::UnknownComponent(id))?;
        if comp.kind != CompKind::Input {
            return Err(CircuitError::NotAnInput(id));
        }
        comp.state = val;
        self.update(id)?;
        Ok(())
    }

    /// Re-evaluates `id` and everything downstream of it. Each component in
    /// the downstream closure is evaluated once, after all of its upstream
    /// components inside the closure. Returns the number of evaluations.
    pub fn update(&mut self, id: ID) -> CircuitResult<usize> {
        self.component(id)?;
        let mut closure = HashSet::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if closure.insert(cur) {
                stack.extend(self.outputs_of(cur));
            }
        }
        let order = self.topo_order(&closure);
        self.apply(&order)?;
        debug!("update from {} evaluated {} components", id, order.len());
        Ok(order.len())
    }

    /// Re-evaluates every component in topological order.
    pub fn settle(&mut self) -> CircuitResult<usize> {
        let all: HashSet<ID> = self.components().map(|c| c.id).collect();
        let order = self.topo_order(&all);
        self.apply(&order)?;
        Ok(order.len())
    }

    fn apply(&mut self, order: &[ID]) -> CircuitResult<()> {
        for id in order {
            let state = self.evaluate(*id)?;
            if let Some(c) = self.get_component_mut(*id) {
                c.state = state;
            }
        }
        Ok(())
    }

    // Kahn's algorithm restricted to `members`; ties go to the lower id.
    fn topo_order(&self, members: &HashSet<ID>) -> Vec<ID> {
        let mut indegree: HashMap<ID, usize> = members.iter().map(|id| (*id, 0)).collect();
        for w in &self.wires {
            if members.contains(&w.from) {
                if let Some(d) = indegree.get_mut(&w.to) {
                    *d += 1;
                }
            }
        }
        let mut ready: Vec<ID> = indegree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(id, _)| *id)
            .collect();
        ready.sort_unstable();
        let mut exec_q: VecDeque<ID> = ready.into();
        let mut order = Vec::with_capacity(members.len());
        while let Some(id) = exec_q.pop_front() {
            order.push(id);
            for next in self.outputs_of(id) {
                if let Some(d) = indegree.get_mut(&next) {
                    *d -= 1;
                    if *d == 0 {
                        exec_q.push_back(next);
                    }
                }
            }
        }
        if order.len() != members.len() {
            // connect() rejects loops, so this means the wire list was corrupted
            error!(
                "feedback loop detected, {} components left unevaluated",
                members.len() - order.len()
            );
        }
        order
    }

    // is `to` reachable from `from` by following wires downstream?
    fn reaches(&self, from: ID, to: ID) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(cur) = stack.pop() {
            if cur == to {
                return true;
            }
            if seen.insert(cur) {
                stack.extend(self.outputs_of(cur));
            }
        }
        false
    }

    /// Row of the gate's truth table (see [`crate::table::gate_truth_table`])
    /// matching its current inputs. `None` for non-gates and for gates
    /// that aren't fully connected.
    pub fn highlighted_row(&self, id: ID) -> Option<usize> {
        let CompKind::Gate(g) = self.get_component(id)?.kind else {
            return None;
        };
        let ins = self.input_states(id);
        if ins.len() != g.max_inputs() {
            return None;
        }
        Some(ins.iter().fold(0, |acc, v| (acc << 1) | *v as usize))
    }

    /// Truth table of the whole circuit: one column per input, then one per
    /// output, in creation order. Every component gets its state back
    /// afterwards, stale ones included.
    pub fn gen_truth_table(&mut self) -> CircuitResult<Table<char>> {
        let inps: Vec<ID> = self
            .components()
            .filter(|c| c.kind == CompKind::Input)
            .map(|c| c.id)
            .collect();
        let outs: Vec<ID> = self
            .components()
            .filter(|c| c.kind == CompKind::Output)
            .map(|c| c.id)
            .collect();
        let count = inps.len();
        let counter = bitwise_counter(count).ok_or(CircuitError::TooManyInputs { count })?;

        let saved: Vec<(ID, bool)> = self.components().map(|c| (c.id, c.state)).collect();
        let table = self.fill_truth_table(&inps, &outs, counter);
        for (id, state) in saved {
            if let Some(c) = self.get_component_mut(id) {
                c.state = state;
            }
        }
        table
    }

    fn fill_truth_table(
        &mut self,
        inps: &[ID],
        outs: &[ID],
        counter: impl Iterator<Item = Vec<bool>>,
    ) -> CircuitResult<Table<char>> {
        let mut t = Table::<char>::new();
        t.set_columns(
            inps.iter()
                .chain(outs.iter())
                .filter_map(|id| self.get_component(*id))
                .map(|c| c.label.clone())
                .collect(),
        );
        for ct in counter {
            for (id, val) in inps.iter().zip(&ct) {
                if let Some(c) = self.get_component_mut(*id) {
                    c.state = *val;
                }
            }
            self.settle()?;
            let row = t.add_row();
            for id in inps.iter().chain(outs.iter()) {
                let c = self.component(*id)?;
                t.set_val_at(row, &c.label, bit_char(c.state));
            }
        }
        Ok(t)
    }
}

pub(crate) fn bit_char(b: bool) -> char {
    if b {
        '1'
    } else {
        '0'
    }
}

// A, B, ... Z, then A1, B1, ...
fn input_label(n: usize) -> String {
    let letter = (b'A' + (n % 26) as u8) as char;
    match n / 26 {
        0 => letter.to_string(),
        round => format!("{}{}", letter, round),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32) -> Point {
        Point::new(x, 100.0)
    }

    #[test]
    fn connect_records_both_sides() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let g = c.add_gate(GateType::Or, at(100.0));
        c.connect(a, g).unwrap();
        assert_eq!(c.outputs_of(a), vec![g]);
        assert_eq!(c.inputs_of(g), vec![a]);
    }

    #[test]
    fn full_gate_rejects_and_graph_is_unchanged() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let d = c.add_input(at(120.0));
        let g = c.add_gate(GateType::And, at(200.0));
        c.connect(a, g).unwrap();
        c.connect(b, g).unwrap();
        let before = c.wires().to_vec();
        assert_eq!(
            c.connect(d, g),
            Err(CircuitError::InputsFull { id: g, max: 2 })
        );
        assert_eq!(c.wires(), &before[..]);
        assert!(c.outputs_of(d).is_empty());

        let n = c.add_gate(GateType::Not, at(300.0));
        c.connect(a, n).unwrap();
        assert_eq!(
            c.connect(b, n),
            Err(CircuitError::InputsFull { id: n, max: 1 })
        );
    }

    #[test]
    fn rejects_self_duplicate_and_wrong_kinds() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let g = c.add_gate(GateType::Or, at(100.0));
        let q = c.add_output(at(200.0));
        assert_eq!(c.connect(g, g), Err(CircuitError::SelfConnection(g)));
        c.connect(a, g).unwrap();
        assert_eq!(
            c.connect(a, g),
            Err(CircuitError::DuplicateWire { from: a, to: g })
        );
        assert_eq!(c.connect(q, g), Err(CircuitError::InvalidSource(q)));
        assert_eq!(c.connect(g, a), Err(CircuitError::InvalidTarget(a)));
        assert_eq!(c.connect(a, 99), Err(CircuitError::UnknownComponent(99)));
        assert_eq!(c.wires().len(), 1);
    }

    #[test]
    fn outputs_accept_any_fan_in() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let d = c.add_input(at(120.0));
        let q = c.add_output(at(200.0));
        for i in [a, b, d] {
            c.connect(i, q).unwrap();
        }
        assert!(!c.state(q).unwrap());
        c.toggle_input(d).unwrap();
        assert!(c.state(q).unwrap());
    }

    #[test]
    fn feedback_loops_are_rejected() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let g1 = c.add_gate(GateType::Or, at(100.0));
        let g2 = c.add_gate(GateType::Buffer, at(200.0));
        c.connect(a, g1).unwrap();
        c.connect(g1, g2).unwrap();
        assert_eq!(
            c.connect(g2, g1),
            Err(CircuitError::WouldCycle { from: g2, to: g1 })
        );
        assert_eq!(c.wires().len(), 2);
    }

    #[test]
    fn remove_leaves_no_references() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let g = c.add_gate(GateType::Xor, at(100.0));
        let q = c.add_output(at(200.0));
        c.connect(a, g).unwrap();
        c.connect(b, g).unwrap();
        c.connect(g, q).unwrap();
        let removed = c.remove_component(g).unwrap();
        assert_eq!(removed.id, g);
        assert!(c.get_component(g).is_none());
        assert!(c.wires().iter().all(|w| w.from != g && w.to != g));
        assert!(c.outputs_of(a).is_empty());
        assert!(c.inputs_of(q).is_empty());
        assert_eq!(
            c.remove_component(g).unwrap_err(),
            CircuitError::UnknownComponent(g)
        );
        // handles aren't reused
        let n = c.add_gate(GateType::Not, at(100.0));
        assert_ne!(n, g);
    }

    #[test]
    fn diamond_evaluates_each_component_once() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let left = c.add_gate(GateType::Buffer, at(100.0));
        let right = c.add_gate(GateType::Not, at(100.0));
        let join = c.add_gate(GateType::Or, at(200.0));
        let q = c.add_output(at(300.0));
        c.connect(a, left).unwrap();
        c.connect(a, right).unwrap();
        c.connect(left, join).unwrap();
        c.connect(right, join).unwrap();
        c.connect(join, q).unwrap();
        assert_eq!(c.update(a).unwrap(), 5);
        assert!(c.state(join).unwrap());
        assert!(c.state(q).unwrap());
    }

    #[test]
    fn update_is_idempotent() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let g = c.add_gate(GateType::Nand, at(100.0));
        c.connect(a, g).unwrap();
        c.connect(b, g).unwrap();
        c.toggle_input(a).unwrap();
        let once = c.state(g).unwrap();
        c.update(g).unwrap();
        c.update(g).unwrap();
        assert_eq!(c.state(g).unwrap(), once);
    }

    #[test]
    fn highlight_follows_inputs() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let g = c.add_gate(GateType::And, at(100.0));
        c.connect(a, g).unwrap();
        assert_eq!(c.highlighted_row(g), None);
        c.connect(b, g).unwrap();
        assert_eq!(c.highlighted_row(g), Some(0));
        c.toggle_input(a).unwrap();
        assert_eq!(c.highlighted_row(g), Some(2));
        c.toggle_input(b).unwrap();
        assert_eq!(c.highlighted_row(g), Some(3));
        assert_eq!(c.highlighted_row(a), None);
    }

    #[test]
    fn circuit_truth_table() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let b = c.add_input(at(60.0));
        let g = c.add_gate(GateType::Xor, at(100.0));
        let q = c.add_output(at(200.0));
        c.connect(a, g).unwrap();
        c.connect(b, g).unwrap();
        c.connect(g, q).unwrap();
        c.toggle_input(b).unwrap();

        let t = c.gen_truth_table().unwrap();
        assert_eq!(t.columns(), &["A", "B", "Q0"]);
        let q_col: Vec<char> = (0..4).map(|i| *t.get_val_at(i, "Q0").unwrap()).collect();
        assert_eq!(q_col, vec!['0', '1', '1', '0']);
        // restored
        assert!(!c.state(a).unwrap());
        assert!(c.state(b).unwrap());
        assert!(c.state(q).unwrap());
    }

    #[test]
    fn truth_table_leaves_stale_states_alone() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let not = c.add_gate(GateType::Not, at(100.0));
        let q = c.add_output(at(200.0));
        c.connect(a, not).unwrap();
        c.connect(not, q).unwrap();
        c.disconnect(a, not).unwrap();
        c.disconnect(not, q).unwrap();
        assert_eq!(c.state(not), Some(true));
        assert_eq!(c.state(q), Some(true));

        let t = c.gen_truth_table().unwrap();
        assert_eq!(t.columns(), &["A", "Q0"]);
        assert_eq!(c.state(not), Some(true));
        assert_eq!(c.state(q), Some(true));
    }

    #[test]
    fn unwired_output_keeps_its_state() {
        let mut c = Circuit::new();
        let a = c.add_input(at(0.0));
        let q = c.add_output(at(100.0));
        c.connect(a, q).unwrap();
        c.toggle_input(a).unwrap();
        c.disconnect(a, q).unwrap();
        assert!(c.evaluate(q).unwrap());
        c.settle().unwrap();
        assert_eq!(c.state(q), Some(true));
    }

    #[test]
    fn truth_table_refuses_too_many_inputs() {
        let mut c = Circuit::new();
        for i in 0..usize::BITS {
            c.add_input(at(i as f32 * 60.0));
        }
        let first = c.components().next().map(|c| c.id).unwrap();
        c.toggle_input(first).unwrap();
        assert_eq!(
            c.gen_truth_table().unwrap_err(),
            CircuitError::TooManyInputs {
                count: usize::BITS as usize
            }
        );
        assert_eq!(c.state(first), Some(true));
    }

    #[test]
    fn labels() {
        assert_eq!(input_label(0), "A");
        assert_eq!(input_label(25), "Z");
        assert_eq!(input_label(26), "A1");
        let mut c = Circuit::new();
        let q = c.add_output(at(0.0));
        let g = c.add_gate(GateType::Xnor, at(0.0));
        assert_eq!(c.get_component(q).unwrap().label, "Q0");
        assert_eq!(c.get_component(g).unwrap().label, "XNOR");
    }
}
