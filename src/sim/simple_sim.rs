use fxhash::FxHashMap;
use volute::Lut;

use crate::network::{BinaryType, TernaryType};
use crate::sim::Fault;
use crate::{Gate, NaryType, Network, Signal};

/// Simulation based directly on the network representation, 64 patterns at a time
///
/// Faults are applied while evaluating: an output stuck-at fault replaces the value of the gate,
/// an input stuck-at fault replaces the value seen by one pin, after any implicit inversion.
pub struct SimpleSimulator<'a> {
    network: &'a Network,
    input_values: Vec<u64>,
    node_values: Vec<u64>,
    output_faults: FxHashMap<usize, u64>,
    input_faults: FxHashMap<(usize, usize), u64>,
}

/// Convert the inversion to a word for bitwise operations
fn pol_to_word(s: Signal) -> u64 {
    if s.is_inverted() {
        !0
    } else {
        0
    }
}

fn bool_to_word(b: bool) -> u64 {
    if b {
        !0
    } else {
        0
    }
}

fn maj(a: u64, b: u64, c: u64) -> u64 {
    (b & c) | (a & (b | c))
}

fn mux(s: u64, a: u64, b: u64) -> u64 {
    (s & a) | (!s & b)
}

fn lut_word(lut: &Lut, values: &[u64]) -> u64 {
    let mut ret = 0u64;
    for lane in 0..64 {
        let mut mask = 0usize;
        for (j, v) in values.iter().enumerate() {
            mask |= (((v >> lane) & 1) as usize) << j;
        }
        if lut.value(mask) {
            ret |= 1u64 << lane;
        }
    }
    ret
}

impl<'a> SimpleSimulator<'a> {
    pub fn from_network(network: &'a Network) -> SimpleSimulator<'a> {
        Self::with_faults(network, &[])
    }

    pub fn with_faults(network: &'a Network, faults: &[Fault]) -> SimpleSimulator<'a> {
        assert!(network.is_topo_sorted());
        let mut output_faults = FxHashMap::default();
        let mut input_faults = FxHashMap::default();
        for f in faults {
            match *f {
                Fault::OutputStuckAtFault { gate, value } => {
                    output_faults.insert(gate, bool_to_word(value));
                }
                Fault::InputStuckAtFault { gate, input, value } => {
                    input_faults.insert((gate, input), bool_to_word(value));
                }
            }
        }
        SimpleSimulator {
            network,
            input_values: vec![0; network.nb_inputs()],
            node_values: vec![0; network.nb_nodes()],
            output_faults,
            input_faults,
        }
    }

    pub fn run(&mut self, inputs: &[u64]) -> Vec<u64> {
        assert_eq!(inputs.len(), self.input_values.len());
        self.input_values.copy_from_slice(inputs);
        self.run_comb();
        self.get_output_values()
    }

    fn get_value(&self, s: Signal) -> u64 {
        if s == Signal::zero() {
            0
        } else if s == Signal::one() {
            !0
        } else if s.is_input() {
            self.input_values[s.input() as usize] ^ pol_to_word(s)
        } else {
            debug_assert!(s.is_var());
            self.node_values[s.var() as usize] ^ pol_to_word(s)
        }
    }

    /// Value seen by a pin of a gate
    fn get_pin_value(&self, gate: usize, pin: usize, s: Signal) -> u64 {
        match self.input_faults.get(&(gate, pin)) {
            Some(v) => *v,
            None => self.get_value(s),
        }
    }

    fn run_comb(&mut self) {
        for i in 0..self.network.nb_nodes() {
            let val = match self.output_faults.get(&i) {
                Some(v) => *v,
                None => self.compute_gate(i),
            };
            self.node_values[i] = val;
        }
    }

    fn compute_gate(&self, i: usize) -> u64 {
        use Gate::*;
        let g = self.network.gate(i);
        let v: Vec<u64> = g
            .dependencies()
            .iter()
            .enumerate()
            .map(|(pin, s)| self.get_pin_value(i, pin, *s))
            .collect();
        match g {
            Binary(_, BinaryType::And) => v[0] & v[1],
            Binary(_, BinaryType::Or) => v[0] | v[1],
            Binary(_, BinaryType::Xor) => v[0] ^ v[1],
            Ternary(_, TernaryType::And) => v[0] & v[1] & v[2],
            Ternary(_, TernaryType::Xor) => v[0] ^ v[1] ^ v[2],
            Ternary(_, TernaryType::Maj) => maj(v[0], v[1], v[2]),
            Ternary(_, TernaryType::Mux) => mux(v[0], v[1], v[2]),
            Nary(_, tp) => match tp {
                NaryType::And => v.iter().fold(!0, |acc, x| acc & x),
                NaryType::Nand => !v.iter().fold(!0, |acc, x| acc & x),
                NaryType::Or => v.iter().fold(0, |acc, x| acc | x),
                NaryType::Nor => !v.iter().fold(0, |acc, x| acc | x),
                NaryType::Xor => v.iter().fold(0, |acc, x| acc ^ x),
                NaryType::Xnor => !v.iter().fold(0, |acc, x| acc ^ x),
            },
            Buf(_) => v[0],
            Lut(lut) => lut_word(&lut.lut, &v),
        }
    }

    fn get_output_values(&self) -> Vec<u64> {
        (0..self.network.nb_outputs())
            .map(|o| self.get_value(self.network.output(o)))
            .collect()
    }
}
