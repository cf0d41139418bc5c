use core::slice;
use std::fmt;

use volute::Lut;

use crate::network::signal::Signal;

/// Basic types of 2-input gates
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryType {
    /// 2-input And gate
    And,
    /// 2-input Or gate
    Or,
    /// 2-input Xor gate
    Xor,
}

/// Basic types of 3-input gates
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TernaryType {
    /// 3-input And gate
    And,
    /// 3-input Xor gate
    Xor,
    /// Majority gate (a + b + c >= 2)
    Maj,
    /// Multiplexer a ? b : c
    Mux,
}

/// Basic types of N-input gates, as found in netlist files
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NaryType {
    /// N-input And gate
    And,
    /// N-input Or gate
    Or,
    /// N-input Nand gate
    Nand,
    /// N-input Nor gate
    Nor,
    /// N-input Xor gate
    Xor,
    /// N-input Xnor gate
    Xnor,
}

/// Lut gate
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct LutGate {
    /// Inputs of the Lut; input i is variable i of the truth table
    pub inputs: Box<[Signal]>,
    /// Truth table
    pub lut: Lut,
}

/// Combinational logic gate with a single output
///
/// Inverted inputs and outputs are represented in the signals, so that a Nand2 is an And2
/// whose output is used inverted. N-ary gates keep the form they had in the netlist file.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Gate {
    /// 2-input gate (And/Or/Xor)
    Binary([Signal; 2], BinaryType),
    /// 3-input gate (And/Xor/Maj/Mux)
    Ternary([Signal; 3], TernaryType),
    /// N-input gate (And/Or/Nand/Nor/Xor/Xnor)
    Nary(Box<[Signal]>, NaryType),
    /// Buf or Not
    Buf(Signal),
    /// Lookup table
    Lut(Box<LutGate>),
}

impl Gate {
    /// Create a 2-input And
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::Binary([a, b], BinaryType::And)
    }

    /// Create a 2-input Or
    pub fn or(a: Signal, b: Signal) -> Gate {
        Gate::Binary([a, b], BinaryType::Or)
    }

    /// Create a 2-input Xor
    pub fn xor(a: Signal, b: Signal) -> Gate {
        Gate::Binary([a, b], BinaryType::Xor)
    }

    /// Create a 3-input Xor
    pub fn xor3(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary([a, b, c], TernaryType::Xor)
    }

    /// Create a Mux
    pub fn mux(s: Signal, a: Signal, b: Signal) -> Gate {
        Gate::Ternary([s, a, b], TernaryType::Mux)
    }

    /// Create a Maj
    pub fn maj(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary([a, b, c], TernaryType::Maj)
    }

    /// Create a n-input gate
    pub fn nary(v: &[Signal], tp: NaryType) -> Gate {
        Gate::Nary(v.into(), tp)
    }

    /// Create a n-input Lut
    pub fn lut(v: &[Signal], lut: Lut) -> Gate {
        assert_eq!(v.len(), lut.num_vars());
        Gate::Lut(Box::new(LutGate {
            inputs: v.into(),
            lut,
        }))
    }

    /// Obtain all signals feeding this gate
    pub fn dependencies(&self) -> &[Signal] {
        use Gate::*;
        match self {
            Binary(s, _) => s,
            Ternary(s, _) => s,
            Nary(v, _) => v,
            Buf(s) => slice::from_ref(s),
            Lut(lut) => lut.inputs.as_ref(),
        }
    }

    /// Obtain the gate indices feeding this gate (not inputs or constants)
    pub fn vars(&self) -> impl Iterator<Item = u32> + '_ {
        self.dependencies()
            .iter()
            .filter(|s| s.is_var())
            .map(|s| s.var())
    }

    /// Returns whether the gate is an And, Or, Nand or Nor of any arity
    pub fn is_and_like(&self) -> bool {
        matches!(
            self,
            Gate::Binary(_, BinaryType::And)
                | Gate::Binary(_, BinaryType::Or)
                | Gate::Ternary(_, TernaryType::And)
                | Gate::Nary(_, NaryType::And)
                | Gate::Nary(_, NaryType::Nand)
                | Gate::Nary(_, NaryType::Or)
                | Gate::Nary(_, NaryType::Nor)
        )
    }

    /// Returns whether the gate is a Xor, Xnor of any arity
    pub fn is_xor_like(&self) -> bool {
        matches!(
            self,
            Gate::Binary(_, BinaryType::Xor)
                | Gate::Ternary(_, TernaryType::Xor)
                | Gate::Nary(_, NaryType::Xor)
                | Gate::Nary(_, NaryType::Xnor)
        )
    }

    /// Apply a remapping of the signals to the gate
    pub(crate) fn remap<F: Fn(&Signal) -> Signal>(&self, t: F) -> Gate {
        use Gate::*;
        match self {
            Binary([a, b], tp) => Binary([t(a), t(b)], *tp),
            Ternary([a, b, c], tp) => Ternary([t(a), t(b), t(c)], *tp),
            Nary(v, tp) => Nary(v.iter().map(&t).collect(), *tp),
            Buf(s) => Buf(t(s)),
            Lut(lut) => Lut(Box::new(LutGate {
                inputs: lut.inputs.iter().map(t).collect(),
                lut: lut.lut.clone(),
            })),
        }
    }

    /// Apply a remapping of gate order to the gate
    pub(crate) fn remap_order(&self, t: &[Signal]) -> Gate {
        self.remap(|s: &Signal| s.remap_order(t))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Gate::*;
        match self {
            Binary([a, b], BinaryType::And) => write!(f, "{a} & {b}"),
            Binary([a, b], BinaryType::Or) => write!(f, "{a} | {b}"),
            Binary([a, b], BinaryType::Xor) => write!(f, "{a} ^ {b}"),
            Ternary([a, b, c], TernaryType::And) => write!(f, "{a} & {b} & {c}"),
            Ternary([a, b, c], TernaryType::Xor) => write!(f, "{a} ^ {b} ^ {c}"),
            Ternary([s, a, b], TernaryType::Mux) => write!(f, "{s} ? {a} : {b}"),
            Ternary([a, b, c], TernaryType::Maj) => write!(f, "Maj({a}, {b}, {c})"),
            Nary(v, tp) => {
                let sep = match tp {
                    NaryType::And | NaryType::Nand => " & ",
                    NaryType::Or | NaryType::Nor => " | ",
                    NaryType::Xor | NaryType::Xnor => " ^ ",
                };
                let st = v
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(sep);
                match tp {
                    NaryType::Nand | NaryType::Nor | NaryType::Xnor => write!(f, "!({st})"),
                    NaryType::And | NaryType::Or | NaryType::Xor => write!(f, "{st}"),
                }
            }
            Buf(s) => write!(f, "{s}"),
            Lut(lut) => {
                let st = lut
                    .inputs
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", lut.lut, st)
            }
        }
    }
}
