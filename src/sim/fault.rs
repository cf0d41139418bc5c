use std::fmt;

use crate::Network;

/// Representation of a fault, with its type and location
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fault {
    /// Output stuck-at fault: the output of the given gate is stuck at a fixed value
    OutputStuckAtFault {
        /// Gate where the fault is located
        gate: usize,
        /// Fault value
        value: bool,
    },
    /// Input stuck-at fault: an input pin of the given gate is stuck at a fixed value
    InputStuckAtFault {
        /// Gate where the fault is located
        gate: usize,
        /// Input pin where the fault is located
        input: usize,
        /// Fault value
        value: bool,
    },
}

impl Fault {
    /// Get all possible single stuck-at faults in a network
    pub fn all(aig: &Network) -> Vec<Fault> {
        let mut ret = Vec::new();
        for gate in 0..aig.nb_nodes() {
            for value in [false, true] {
                ret.push(Fault::OutputStuckAtFault { gate, value });
            }
            for input in 0..aig.gate(gate).dependencies().len() {
                for value in [false, true] {
                    ret.push(Fault::InputStuckAtFault { gate, input, value });
                }
            }
        }
        ret
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::OutputStuckAtFault { gate, value } => {
                write!(f, "Gate {} output stuck at {}", gate, i32::from(*value))
            }
            Fault::InputStuckAtFault { gate, input, value } => {
                write!(
                    f,
                    "Gate {} input {} stuck at {}",
                    gate,
                    input,
                    i32::from(*value)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Fault;
    use crate::network::variants::Variant;

    #[test]
    fn test_all() {
        // 2 output faults per gate, 2 faults per input pin
        let net = Variant::Majority.build();
        assert_eq!(Fault::all(&net).len(), 2 * 2 + 2 * 6);
        let net = Variant::Simple.build();
        assert_eq!(Fault::all(&net).len(), 5 * 2 + 10 * 2);
    }

    #[test]
    fn test_display() {
        let f = Fault::InputStuckAtFault {
            gate: 3,
            input: 1,
            value: true,
        };
        assert_eq!(f.to_string(), "Gate 3 input 1 stuck at 1");
    }
}
