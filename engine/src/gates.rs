use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateType {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    Buffer,
}

impl GateType {
    pub const ALL: [GateType; 8] = [
        GateType::And,
        GateType::Or,
        GateType::Not,
        GateType::Nand,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
        GateType::Buffer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Not => "NOT",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
            GateType::Buffer => "BUFFER",
        }
    }

    pub fn from_name(name: &str) -> Option<GateType> {
        GateType::ALL.into_iter().find(|g| g.name() == name)
    }

    pub fn max_inputs(&self) -> usize {
        match self {
            GateType::Not | GateType::Buffer => 1,
            _ => 2,
        }
    }

    /// Whether the output carries an inversion bubble.
    pub fn is_inverted(&self) -> bool {
        matches!(
            self,
            GateType::Not | GateType::Nand | GateType::Nor | GateType::Xnor
        )
    }

    /// Computes the gate output from the states of its connected inputs,
    /// in connection order.
    ///
    /// A gate that doesn't have the number of inputs its function needs
    /// reports a conservative value instead of failing: `false` for every
    /// kind except NAND and NOR, which invert it to `true`.
    pub fn eval(&self, ins: &[bool]) -> bool {
        let all = || ins.len() == self.max_inputs() && ins.iter().all(|v| *v);
        let any = || !ins.is_empty() && ins.iter().any(|v| *v);
        match self {
            GateType::And => all(),
            GateType::Or => any(),
            GateType::Nand => !all(),
            GateType::Nor => !any(),
            GateType::Xor => ins.len() == 2 && ins[0] != ins[1],
            GateType::Xnor => ins.len() == 2 && ins[0] == ins[1],
            GateType::Not => ins.len() == 1 && !ins[0],
            GateType::Buffer => ins.len() == 1 && ins[0],
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
