use std::{collections::HashMap, fmt};

use crate::{circuit::bit_char, gates::GateType};

// a rudimentary column-addressed table
#[derive(Debug, Clone, Default)]
pub struct Table<T> {
    cols: Vec<String>,
    col_idx: HashMap<String, usize>,
    rows: Vec<Vec<T>>,
}

impl<T: Default + Clone> Table<T> {
    pub fn new() -> Table<T> {
        Table {
            cols: Vec::new(),
            col_idx: HashMap::new(),
            rows: Vec::new(),
        }
    }
    // a repeated column name resolves to its last occurrence
    pub fn set_columns(&mut self, cols: Vec<String>) {
        self.col_idx = cols
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        self.cols = cols;
        self.rows.clear();
    }
    pub fn columns(&self) -> &[String] {
        &self.cols
    }
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![T::default(); self.cols.len()]);
        self.rows.len() - 1
    }
    pub fn set_val_at(&mut self, i: usize, col: &str, val: T) {
        if let (Some(row), Some(j)) = (self.rows.get_mut(i), self.col_idx.get(col)) {
            row[*j] = val;
        }
    }
    pub fn get_val_at(&self, i: usize, col: &str) -> Option<&T> {
        let j = self.col_idx.get(col)?;
        self.rows.get(i).map(|r| &r[*j])
    }
}

impl<T: fmt::Display> fmt::Display for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self.cols.iter().map(|c| c.len() + 2).collect();
        let rule: String = widths.iter().map(|w| "-".repeat(*w) + "+").collect();
        writeln!(f, "+{}", rule)?;
        write!(f, "|")?;
        for (c, w) in self.cols.iter().zip(&widths) {
            write!(f, "{:^w$}|", c, w = *w)?;
        }
        writeln!(f)?;
        writeln!(f, "+{}", rule)?;
        for row in &self.rows {
            write!(f, "|")?;
            for (v, w) in row.iter().zip(&widths) {
                write!(f, "{:^w$}|", v.to_string(), w = *w)?;
            }
            writeln!(f)?;
        }
        write!(f, "+{}", rule)
    }
}

/// All `bits`-wide bit patterns in counting order, most significant first.
/// `None` when there are too many patterns to count in a `usize`.
pub fn bitwise_counter(bits: usize) -> Option<impl Iterator<Item = Vec<bool>>> {
    let total_combs = u32::try_from(bits)
        .ok()
        .and_then(|b| 1usize.checked_shl(b))?;
    Some((0..total_combs).map(move |n| {
        (0..bits)
            .map(|i| (1 << i & n) > 0)
            .rev()
            .collect::<Vec<bool>>()
    }))
}

/// The reference table for a gate kind: inputs `A` (and `B`), output `Q`.
/// Row `i` corresponds to the input pattern `i` read most significant
/// first, which is what [`crate::circuit::Circuit::highlighted_row`]
/// reports.
pub fn gate_truth_table(gate: GateType) -> Table<char> {
    let pins: Vec<String> = ["A", "B"]
        .iter()
        .take(gate.max_inputs())
        .map(|s| s.to_string())
        .collect();
    let mut t = Table::new();
    let mut cols = pins.clone();
    cols.push("Q".to_string());
    t.set_columns(cols);
    for ct in bitwise_counter(pins.len()).into_iter().flatten() {
        let row = t.add_row();
        for (pin, val) in pins.iter().zip(&ct) {
            t.set_val_at(row, pin, bit_char(*val));
        }
        t.set_val_at(row, "Q", bit_char(gate.eval(&ct)));
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_order() {
        let rows: Vec<Vec<bool>> = bitwise_counter(2).unwrap().collect();
        assert_eq!(
            rows,
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true]
            ]
        );
        assert_eq!(bitwise_counter(0).unwrap().count(), 1);
        assert!(bitwise_counter(usize::BITS as usize).is_none());
    }

    #[test]
    fn prints_as_a_boxed_grid() {
        let t = gate_truth_table(GateType::Buffer);
        let expected = "\
+---+---+
| A | Q |
+---+---+
| 0 | 0 |
| 1 | 1 |
+---+---+";
        assert_eq!(t.to_string(), expected);
    }

    #[test]
    fn nor_table() {
        let t = gate_truth_table(GateType::Nor);
        assert_eq!(t.columns(), &["A", "B", "Q"]);
        let q: String = (0..4).map(|i| *t.get_val_at(i, "Q").unwrap()).collect();
        assert_eq!(q, "1000");
    }

    #[test]
    fn not_table() {
        let t = gate_truth_table(GateType::Not);
        assert_eq!(t.columns(), &["A", "Q"]);
        assert_eq!(t.rows(), &[vec!['0', '1'], vec!['1', '0']]);
    }

    #[test]
    fn missing_cells() {
        let mut t = Table::<char>::new();
        t.set_columns(vec!["X".into()]);
        t.set_val_at(3, "X", '1');
        assert!(t.rows().is_empty());
        let r = t.add_row();
        assert_eq!(t.get_val_at(r, "Y"), None);
        assert_eq!(t.get_val_at(r, "X"), Some(&'\0'));
    }
}
