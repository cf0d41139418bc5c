use std::fmt;

use itertools::iproduct;

use crate::error::{Error, Result};

/// One test vector: the three input bits of a full adder
///
/// Each bit is guaranteed to be 0 or 1; invalid values are rejected on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitInput {
    a: u8,
    b: u8,
    cin: u8,
}

/// Sum and carry-out of a full adder
///
/// Expected outputs are always 0 or 1. Observed outputs hold whatever the system under test
/// reported, so that an out-of-range value shows up as a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitOutput {
    /// Sum bit
    pub sum: u8,
    /// Carry-out bit
    pub cout: u8,
}

fn check_bit(name: &'static str, value: u8) -> Result<u8> {
    if value > 1 {
        Err(Error::InvalidInput { name, value })
    } else {
        Ok(value)
    }
}

impl BitInput {
    /// Create a test vector, checking that all values are 0 or 1
    pub fn new(a: u8, b: u8, cin: u8) -> Result<BitInput> {
        Ok(BitInput {
            a: check_bit("a", a)?,
            b: check_bit("b", b)?,
            cin: check_bit("cin", cin)?,
        })
    }

    /// Create a test vector from boolean values
    pub fn from_bools(a: bool, b: bool, cin: bool) -> BitInput {
        BitInput {
            a: a.into(),
            b: b.into(),
            cin: cin.into(),
        }
    }

    /// First operand
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Second operand
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Carry-in
    pub fn cin(&self) -> u8 {
        self.cin
    }

    /// Values as booleans, in (a, b, cin) order
    pub fn to_bools(&self) -> [bool; 3] {
        [self.a != 0, self.b != 0, self.cin != 0]
    }

    /// All 8 test vectors, in lexicographic (a, b, cin) order
    pub fn all() -> impl Iterator<Item = BitInput> {
        iproduct!(0..2u8, 0..2u8, 0..2u8).map(|(a, b, cin)| BitInput { a, b, cin })
    }
}

impl fmt::Display for BitInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={}, b={}, cin={}", self.a, self.b, self.cin)
    }
}

impl BitOutput {
    /// Create an output pair
    pub fn new(sum: u8, cout: u8) -> BitOutput {
        BitOutput { sum, cout }
    }

    /// Create an output pair from boolean values
    pub fn from_bools(sum: bool, cout: bool) -> BitOutput {
        BitOutput {
            sum: sum.into(),
            cout: cout.into(),
        }
    }
}

impl From<(u8, u8)> for BitOutput {
    fn from((sum, cout): (u8, u8)) -> BitOutput {
        BitOutput { sum, cout }
    }
}

impl fmt::Display for BitOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sum={}, cout={}", self.sum, self.cout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain() {
        assert!(BitInput::new(0, 1, 1).is_ok());
        assert!(matches!(
            BitInput::new(2, 0, 0),
            Err(Error::InvalidInput { name: "a", value: 2 })
        ));
        assert!(matches!(
            BitInput::new(0, 7, 0),
            Err(Error::InvalidInput { name: "b", value: 7 })
        ));
        assert!(matches!(
            BitInput::new(0, 0, 255),
            Err(Error::InvalidInput {
                name: "cin",
                value: 255
            })
        ));
    }

    #[test]
    fn test_all_order() {
        let all: Vec<BitInput> = BitInput::all().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], BitInput::new(0, 0, 0).unwrap());
        assert_eq!(all[1], BitInput::new(0, 0, 1).unwrap());
        assert_eq!(all[6], BitInput::new(1, 1, 0).unwrap());
        assert_eq!(all[7], BitInput::new(1, 1, 1).unwrap());
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(sorted, all);
    }

    #[test]
    fn test_display() {
        let v = BitInput::from_bools(true, false, true);
        assert_eq!(v.to_string(), "a=1, b=0, cin=1");
        assert_eq!(v.to_bools(), [true, false, true]);
        assert_eq!(BitOutput::new(0, 1).to_string(), "sum=0, cout=1");
    }
}
