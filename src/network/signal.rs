use std::fmt;
use std::ops::{BitXor, BitXorAssign, Not};

/// A wire of the network: a constant, a primary input or a gate output, possibly inverted
///
/// Inverters are implicit and take one bit of the representation.
/// Inputs are stored with the high bit set, gate outputs and constants without.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct Signal {
    a: u32,
}

const INPUT_FLAG: u32 = 0x8000_0000;

impl Signal {
    /// Constant zero signal
    pub fn zero() -> Signal {
        Signal { a: 0 }
    }

    /// Constant one signal
    pub fn one() -> Signal {
        Signal { a: 1 }
    }

    /// Signal driven by the gate at this index
    pub fn from_var(v: u32) -> Signal {
        Self::from_ind(v + 1)
    }

    /// Signal driven by the primary input at this index
    pub fn from_input(v: u32) -> Signal {
        Self::from_ind(!v)
    }

    fn from_ind(v: u32) -> Signal {
        Signal { a: v << 1 }
    }

    /// Index of the gate driving the signal
    pub fn var(&self) -> u32 {
        assert!(self.is_var());
        self.ind() - 1u32
    }

    /// Index of the primary input driving the signal
    pub fn input(&self) -> u32 {
        assert!(self.is_input());
        !self.ind() & !INPUT_FLAG
    }

    /// Internal index: 0 for a constant, var() + 1 for a gate
    pub(crate) fn ind(&self) -> u32 {
        self.a >> 1
    }

    /// Returns true if the signal is constant
    pub fn is_constant(&self) -> bool {
        self.ind() == 0
    }

    /// Returns true if the signal is a primary input
    pub fn is_input(&self) -> bool {
        self.a & INPUT_FLAG != 0
    }

    /// Returns true if the signal is driven by a gate
    pub fn is_var(&self) -> bool {
        !self.is_input() && !self.is_constant()
    }

    /// Returns true if the signal is implicitly inverted
    ///
    /// False for inputs, gates and zero; true for their complement and for one.
    pub fn is_inverted(&self) -> bool {
        self.a & 1 != 0
    }

    /// Same signal without the inversion
    pub fn without_inversion(&self) -> Signal {
        Signal { a: self.a & !1u32 }
    }

    /// Translate a gate signal after the gates have been reordered
    pub(crate) fn remap_order(&self, t: &[Signal]) -> Signal {
        if !self.is_var() {
            *self
        } else {
            t[self.var() as usize] ^ self.is_inverted()
        }
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Signal {
        if b {
            Signal::one()
        } else {
            Signal::zero()
        }
    }
}

impl Not for Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        Signal { a: self.a ^ 1u32 }
    }
}

impl Not for &'_ Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        Signal { a: self.a ^ 1u32 }
    }
}

impl BitXorAssign<bool> for Signal {
    fn bitxor_assign(&mut self, rhs: bool) {
        self.a ^= rhs as u32;
    }
}

impl BitXor<bool> for Signal {
    type Output = Signal;
    fn bitxor(self, rhs: bool) -> Signal {
        let mut l = self;
        l ^= rhs;
        l
    }
}

impl BitXor<bool> for &'_ Signal {
    type Output = Signal;
    fn bitxor(self, rhs: bool) -> Signal {
        *self ^ rhs
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() {
            write!(f, "{}", self.a & 1)
        } else {
            if self.is_inverted() {
                write!(f, "!")?;
            }
            if self.is_input() {
                write!(f, "i{}", self.input())
            } else {
                write!(f, "x{}", self.var())
            }
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
