//! Compute gate statistics
//!
//! ```
//! use adderkit::network::stats::stats;
//! use adderkit::network::variants::Variant;
//!
//! let stats = stats(&Variant::Simple.build());
//! assert_eq!(stats.nb_xor, 2);
//! assert_eq!(stats.nb_and, 3);
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::network::gates::TernaryType;
use crate::{Gate, Network};

/// Number of inputs, outputs and gates in a network
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of And, Or and similar gates
    pub nb_and: usize,
    /// Arity of And gates
    pub and_arity: Vec<usize>,
    /// Number of Xor and similar gates
    pub nb_xor: usize,
    /// Arity of Xor gates
    pub xor_arity: Vec<usize>,
    /// Number of Mux
    pub nb_mux: usize,
    /// Number of Maj
    pub nb_maj: usize,
    /// Number of Lut
    pub nb_lut: usize,
    /// Number of positive Buf
    pub nb_buf: usize,
    /// Number of Not (negative Buf)
    pub nb_not: usize,
    /// Number of signals used inverted, each requiring an implicit inverter
    pub nb_inverted: usize,
}

impl NetworkStats {
    /// Total number of gates, excluding implicit inverters
    pub fn nb_gates(&self) -> usize {
        self.nb_and + self.nb_xor + self.nb_mux + self.nb_maj + self.nb_lut + self.nb_buf + self.nb_not
    }

    fn add_and(&mut self, sz: usize) {
        self.nb_and += 1;
        if self.and_arity.len() <= sz {
            self.and_arity.resize(sz + 1, 0);
        }
        self.and_arity[sz] += 1;
    }

    fn add_xor(&mut self, sz: usize) {
        self.nb_xor += 1;
        if self.xor_arity.len() <= sz {
            self.xor_arity.resize(sz + 1, 0);
        }
        self.xor_arity[sz] += 1;
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        if self.nb_and != 0 {
            writeln!(f, "  And: {}", self.nb_and)?;
            for (i, nb) in self.and_arity.iter().enumerate() {
                if *nb != 0 {
                    writeln!(f, "      {}: {}", i, nb)?;
                }
            }
        }
        if self.nb_xor != 0 {
            writeln!(f, "  Xor: {}", self.nb_xor)?;
            for (i, nb) in self.xor_arity.iter().enumerate() {
                if *nb != 0 {
                    writeln!(f, "      {}: {}", i, nb)?;
                }
            }
        }
        if self.nb_mux != 0 {
            writeln!(f, "  Mux: {}", self.nb_mux)?;
        }
        if self.nb_maj != 0 {
            writeln!(f, "  Maj: {}", self.nb_maj)?;
        }
        if self.nb_lut != 0 {
            writeln!(f, "  Lut: {}", self.nb_lut)?;
        }
        if self.nb_not != 0 {
            writeln!(f, "  Not: {}", self.nb_not)?;
        }
        if self.nb_buf != 0 {
            writeln!(f, "  Buf: {}", self.nb_buf)?;
        }
        if self.nb_inverted != 0 {
            writeln!(f, "  Inverted signals: {}", self.nb_inverted)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the network
pub fn stats(a: &Network) -> NetworkStats {
    use Gate::*;
    let mut ret = NetworkStats {
        nb_inputs: a.nb_inputs(),
        nb_outputs: a.nb_outputs(),
        nb_inverted: a.inverted_signals().len(),
        ..NetworkStats::default()
    };
    for i in 0..a.nb_nodes() {
        let g = a.gate(i);
        match g {
            Ternary(_, TernaryType::Mux) => ret.nb_mux += 1,
            Ternary(_, TernaryType::Maj) => ret.nb_maj += 1,
            Buf(s) => {
                if s.is_inverted() {
                    ret.nb_not += 1;
                } else {
                    ret.nb_buf += 1;
                }
            }
            Lut(_) => ret.nb_lut += 1,
            _ if g.is_and_like() => ret.add_and(g.dependencies().len()),
            _ => {
                debug_assert!(g.is_xor_like());
                ret.add_xor(g.dependencies().len());
            }
        }
    }

    ret
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::network::variants::Variant;

    #[test]
    fn test_variants() {
        let s = stats(&Variant::Majority.build());
        assert_eq!(s.nb_inputs, 3);
        assert_eq!(s.nb_outputs, 2);
        assert_eq!(s.nb_maj, 1);
        assert_eq!(s.nb_xor, 1);
        assert_eq!(s.xor_arity, vec![0, 0, 0, 1]);
        assert_eq!(s.nb_gates(), 2);

        let s = stats(&Variant::Nand.build());
        assert_eq!(s.nb_and, 9);
        assert_eq!(s.and_arity[2], 9);
        assert_eq!(s.nb_xor, 0);
        assert!(s.nb_inverted > 0);

        let s = stats(&Variant::Lut.build());
        assert_eq!(s.nb_lut, 2);
        assert_eq!(s.nb_gates(), 2);
    }
}
