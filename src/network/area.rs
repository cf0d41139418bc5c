//! Estimate the area of a network
//!
//! ```
//! use adderkit::network::area::AreaParameters;
//! use adderkit::network::variants::Variant;
//!
//! let net = Variant::Simple.build();
//!
//! // Approximate transistor count in CMOS
//! println!("Transistors: {}", AreaParameters::transistors().area(&net));
//!
//! // Approximate number of LUTs on an FPGA, one per gate of up to 6 inputs
//! assert_eq!(AreaParameters::luts().area(&net), 5);
//! ```

use std::fmt;

use crate::network::gates::{BinaryType, TernaryType};
use crate::{Gate, NaryType, Network, Signal};

/// Area estimation parameters
///
/// Each gate has a cost; n-ary gates are extrapolated from the 2- and 3-input costs.
/// Implicit inverters are charged once per inverted signal, except on And2/Or2 gates that are only
/// used inverted: those are charged as Nand2/Nor2.
/// These are rough estimates meant to compare implementations, not synthesis results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaParameters {
    /// Cost of And2 and Or2
    pub and: usize,
    /// Cost of And3
    pub and3: usize,
    /// Cost of Nand2 and Nor2
    pub nand: usize,
    /// Cost of Xor2
    pub xor: usize,
    /// Cost of Xor3
    pub xor3: usize,
    /// Cost of Mux
    pub mux: usize,
    /// Cost of Maj
    pub maj: usize,
    /// Cost of Lut
    pub lut: usize,
    /// Cost of a positive buffer
    pub buf: usize,
    /// Cost of an inverter
    pub not: usize,
    /// Maximum number of inputs of a single cell; wider gates are split in a tree
    pub max_inputs: Option<usize>,
}

impl AreaParameters {
    /// Transistor counts of static CMOS cells
    ///
    /// A Lut is costed as a tree of 7 multiplexers, as for 3 inputs.
    pub fn transistors() -> AreaParameters {
        AreaParameters {
            and: 6,
            and3: 8,
            nand: 4,
            xor: 8,
            xor3: 16,
            mux: 12,
            maj: 12,
            lut: 84,
            buf: 4,
            not: 2,
            max_inputs: None,
        }
    }

    /// Lut counts on an FPGA with 6-input Luts
    ///
    /// Every gate of up to 6 inputs fits in a single Lut and inverters are absorbed.
    pub fn luts() -> AreaParameters {
        AreaParameters {
            and: 1,
            and3: 1,
            nand: 1,
            xor: 1,
            xor3: 1,
            mux: 1,
            maj: 1,
            lut: 1,
            buf: 0,
            not: 0,
            max_inputs: Some(6),
        }
    }

    /// Extrapolate the cost of the n-ary and
    fn andn(&self, n: usize) -> usize {
        if n < 2 {
            0
        } else {
            self.and + (n - 2) * (self.and3 - self.and)
        }
    }

    /// Extrapolate the cost of the n-ary nand
    fn nandn(&self, n: usize) -> usize {
        if n < 2 {
            0
        } else {
            self.nand + (n - 2) * (self.and3 - self.and)
        }
    }

    /// Number of cells needed for a gate with n inputs
    fn nb_cells(&self, n: usize) -> usize {
        match self.max_inputs {
            Some(k) if n > k => (n - 1).div_ceil(k - 1),
            _ => 1,
        }
    }

    /// Extrapolate the cost of the n-ary xor
    fn xorn(&self, n: usize) -> usize {
        if n < 2 {
            0
        } else {
            self.xor + (n - 2) * (self.xor3 - self.xor)
        }
    }

    /// Compute the area of a gate
    pub fn gate_area(&self, g: &Gate) -> usize {
        use Gate::*;
        match g {
            Binary(_, BinaryType::And | BinaryType::Or) => self.and,
            Ternary(_, TernaryType::And) => self.and3,
            Binary(_, BinaryType::Xor) => self.xor,
            Ternary(_, TernaryType::Xor) => self.xor3,
            Nary(v, tp) => {
                let cost = match tp {
                    NaryType::And | NaryType::Or => self.andn(v.len()),
                    NaryType::Nand | NaryType::Nor => self.nandn(v.len()),
                    NaryType::Xor | NaryType::Xnor => self.xorn(v.len()),
                };
                cost * self.nb_cells(v.len())
            }
            Ternary(_, TernaryType::Mux) => self.mux,
            Ternary(_, TernaryType::Maj) => self.maj,
            Buf(s) => {
                if s.is_inverted() {
                    self.not
                } else {
                    self.buf
                }
            }
            Lut(lut) => self.lut * self.nb_cells(lut.inputs.len()),
        }
    }

    /// Gates whose output is an inverting And2/Or2: used at least once, always inverted
    fn inverting_gates(a: &Network) -> Vec<bool> {
        let mut positive = vec![false; a.nb_nodes()];
        let mut inverted = vec![false; a.nb_nodes()];
        let mut mark = |s: &Signal| {
            if s.is_var() {
                let v = s.var() as usize;
                if s.is_inverted() {
                    inverted[v] = true;
                } else {
                    positive[v] = true;
                }
            }
        };
        for i in 0..a.nb_outputs() {
            mark(&a.output(i));
        }
        for i in 0..a.nb_nodes() {
            for s in a.gate(i).dependencies() {
                mark(s);
            }
        }
        (0..a.nb_nodes())
            .map(|i| {
                inverted[i]
                    && !positive[i]
                    && matches!(a.gate(i), Gate::Binary(_, BinaryType::And | BinaryType::Or))
            })
            .collect()
    }

    /// Compute the area of a network
    pub fn area(&self, a: &Network) -> usize {
        let inverting = AreaParameters::inverting_gates(a);
        let gates: usize = (0..a.nb_nodes())
            .map(|i| {
                if inverting[i] {
                    self.nand
                } else {
                    self.gate_area(a.gate(i))
                }
            })
            .sum();
        let inverters = a
            .inverted_signals()
            .iter()
            .filter(|s| !(s.is_var() && inverting[s.var() as usize]))
            .count();
        gates + self.not * inverters
    }

    /// Perform a consistency check on the parameters
    pub fn check(&self) {
        assert!(self.and > 0);
        assert!(self.xor > 0);
        assert!(self.mux > 0);
        assert!(self.maj > 0);
        assert!(self.lut > 0);
        assert!(self.nand > 0);
        assert!(self.max_inputs.map_or(true, |k| k >= 2));

        // Never cheaper to have more inputs
        assert!(self.and3 >= self.and);
        assert!(self.xor3 >= self.xor);
    }
}

impl fmt::Display for AreaParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Area costs:")?;
        writeln!(f, "  And2/Or2: {}", self.and)?;
        writeln!(f, "  And3: {}", self.and3)?;
        writeln!(f, "  Nand2/Nor2: {}", self.nand)?;
        writeln!(f, "  Xor2: {}", self.xor)?;
        writeln!(f, "  Xor3: {}", self.xor3)?;
        writeln!(f, "  Mux: {}", self.mux)?;
        writeln!(f, "  Maj: {}", self.maj)?;
        writeln!(f, "  Lut: {}", self.lut)?;
        writeln!(f, "  Not: {}", self.not)?;
        if let Some(k) = self.max_inputs {
            writeln!(f, "  Max inputs: {}", k)?;
        }
        fmt::Result::Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AreaParameters;
    use crate::network::variants::Variant;
    use crate::{Gate, NaryType, Network};

    #[test]
    fn test_consistent() {
        AreaParameters::transistors().check();
        AreaParameters::luts().check();
    }

    #[test]
    fn test_variants() {
        let t = AreaParameters::transistors();
        let l = AreaParameters::luts();
        // 2 Xor2, 2 And2, 1 Or2
        assert_eq!(t.area(&Variant::Simple.build()), 34);
        assert_eq!(l.area(&Variant::Simple.build()), 5);
        assert_eq!(l.area(&Variant::HalfAdder.build()), 5);
        assert_eq!(t.area(&Variant::Majority.build()), 28);
        assert_eq!(l.area(&Variant::Majority.build()), 2);
        assert_eq!(l.area(&Variant::Lut.build()), 2);
        assert_eq!(t.area(&Variant::Nand.build()), 9 * 4);
        assert_eq!(l.area(&Variant::Nand.build()), 9);
    }

    #[test]
    fn test_inverted_use() {
        let t = AreaParameters::transistors();
        let mut net = Network::new();
        let a = net.add_input();
        let b = net.add_input();
        let x = net.and(a, b);
        net.add_output(!x);
        assert_eq!(t.area(&net), 4);

        // Also used positively: And2 and an inverter
        net.add_output(x);
        assert_eq!(t.area(&net), 6 + 2);
    }

    #[test]
    fn test_wide_gates() {
        let t = AreaParameters::transistors();
        let l = AreaParameters::luts();
        let mut net = Network::new();
        net.add_inputs(16);
        let inputs: Box<[_]> = (0..16).map(|i| net.input(i)).collect();
        let x = net.add(Gate::Nary(inputs, NaryType::Nand));
        net.add_output(x);
        // 16 inputs need 3 Luts of 6 inputs
        assert_eq!(l.area(&net), 3);
        assert_eq!(t.area(&net), 4 + 14 * 2);

        let mut net = Network::new();
        net.add_inputs(6);
        let inputs: Box<[_]> = (0..6).map(|i| net.input(i)).collect();
        let x = net.add(Gate::Nary(inputs, NaryType::Nor));
        net.add_output(x);
        assert_eq!(l.area(&net), 1);
    }
}
