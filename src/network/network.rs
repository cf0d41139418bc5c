use core::fmt;
use std::collections::HashSet;

use volute::Lut;

use crate::error::{Error, Result};
use crate::network::gates::Gate;
use crate::network::signal::Signal;

/// Combinational logic network, used to describe the implementations under test
///
/// Gates are kept in topological order: a gate only reads primary inputs, constants
/// and gates with a lower index.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nb_inputs: usize,
    nodes: Vec<Gate>,
    outputs: Vec<Signal>,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of gates in the network
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> Signal {
        assert!(i < self.nb_inputs());
        Signal::from_input(i as u32)
    }

    /// Get the output at index i
    pub fn output(&self, i: usize) -> Signal {
        self.outputs[i]
    }

    /// Get the signal driven by the gate at index i
    pub fn node(&self, i: usize) -> Signal {
        Signal::from_var(i as u32)
    }

    /// Get the gate at index i
    pub fn gate(&self, i: usize) -> &Gate {
        &self.nodes[i]
    }

    /// Add a new primary input
    pub fn add_input(&mut self) -> Signal {
        self.nb_inputs += 1;
        self.input(self.nb_inputs() - 1)
    }

    /// Add multiple primary inputs
    pub fn add_inputs(&mut self, nb: usize) {
        self.nb_inputs += nb;
    }

    /// Add a new primary output based on an existing signal
    pub fn add_output(&mut self, l: Signal) {
        self.outputs.push(l)
    }

    /// Create an And2 gate
    pub fn and(&mut self, a: Signal, b: Signal) -> Signal {
        self.add(Gate::and(a, b))
    }

    /// Create an Or2 gate
    pub fn or(&mut self, a: Signal, b: Signal) -> Signal {
        self.add(Gate::or(a, b))
    }

    /// Create a Nand2 gate, represented as an inverted And2
    pub fn nand(&mut self, a: Signal, b: Signal) -> Signal {
        !self.and(a, b)
    }

    /// Create a Xor2 gate
    pub fn xor(&mut self, a: Signal, b: Signal) -> Signal {
        self.add(Gate::xor(a, b))
    }

    /// Create a Xor3 gate
    pub fn xor3(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.add(Gate::xor3(a, b, c))
    }

    /// Create a Maj gate
    pub fn maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.add(Gate::maj(a, b, c))
    }

    /// Create a Lut gate
    pub fn lut(&mut self, inputs: &[Signal], lut: Lut) -> Signal {
        self.add(Gate::lut(inputs, lut))
    }

    /// Add a new gate
    pub fn add(&mut self, gate: Gate) -> Signal {
        let l = Signal::from_var(self.nodes.len() as u32);
        self.nodes.push(gate);
        l
    }

    /// Returns whether the network has the interface of a full adder: (a, b, cin) -> (sum, cout)
    pub fn check_adder_interface(&self) -> Result<()> {
        if self.nb_inputs() != 3 || self.nb_outputs() != 2 {
            Err(Error::Interface {
                nb_inputs: self.nb_inputs(),
                nb_outputs: self.nb_outputs(),
            })
        } else {
            Ok(())
        }
    }

    /// Signals that are used inverted, by a gate or an output, sorted
    ///
    /// Each of them requires an inverter in an actual implementation.
    pub fn inverted_signals(&self) -> Vec<Signal> {
        let mut signals_with_inv = HashSet::new();
        for o in 0..self.nb_outputs() {
            let s = self.output(o);
            if s.is_inverted() && !s.is_constant() {
                signals_with_inv.insert(!s);
            }
        }
        for g in &self.nodes {
            if matches!(g, Gate::Buf(_)) {
                // Buf(!x) is an inverter itself
                continue;
            }
            for s in g.dependencies() {
                if s.is_inverted() && !s.is_constant() {
                    signals_with_inv.insert(!s);
                }
            }
        }
        let mut signals_with_inv = signals_with_inv.into_iter().collect::<Vec<_>>();
        signals_with_inv.sort();
        signals_with_inv
    }

    /// Return whether the network is topologically sorted
    pub(crate) fn is_topo_sorted(&self) -> bool {
        for (i, g) in self.nodes.iter().enumerate() {
            let ind = i as u32;
            if g.vars().any(|v| v >= ind) {
                return false;
            }
        }
        true
    }

    /// Remap nodes to a new order, given as the list of old indices
    fn remap(&mut self, order: &[u32]) -> Box<[Signal]> {
        let mut translation = vec![Signal::zero(); self.nb_nodes()];
        for (new_i, old_i) in order.iter().enumerate() {
            translation[*old_i as usize] = Signal::from_var(new_i as u32);
        }

        let new_nodes = order
            .iter()
            .map(|o| self.gate(*o as usize).remap_order(translation.as_slice()))
            .collect();
        self.nodes = new_nodes;

        self.outputs = self
            .outputs
            .iter()
            .map(|s| s.remap_order(&translation))
            .collect();
        translation.into()
    }

    /// Topologically sort the network; this will invalidate all signals
    ///
    /// Returns the mapping of old gate indices to signals. Fails if there is a combinational loop.
    pub fn topo_sort(&mut self) -> Result<Box<[Signal]>> {
        // Count the users of each gate
        let mut count_deps = vec![0u32; self.nb_nodes()];
        for g in self.nodes.iter() {
            for v in g.vars() {
                count_deps[v as usize] += 1;
            }
        }

        // Visit from the gates with no user, in reverse order
        let mut rev_order: Vec<u32> = Vec::new();
        let mut visited = vec![false; self.nb_nodes()];
        let mut to_visit: Vec<u32> = (0..self.nb_nodes())
            .filter(|v| count_deps[*v] == 0)
            .map(|v| v as u32)
            .collect();
        while let Some(v) = to_visit.pop() {
            if visited[v as usize] {
                continue;
            }
            visited[v as usize] = true;
            rev_order.push(v);
            for d in self.gate(v as usize).vars() {
                count_deps[d as usize] -= 1;
                if count_deps[d as usize] == 0 {
                    to_visit.push(d);
                }
            }
        }

        if rev_order.len() != self.nb_nodes() {
            return Err(Error::Unsupported(
                "combinational loop in the network".to_string(),
            ));
        }
        rev_order.reverse();
        Ok(self.remap(rev_order.as_slice()))
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        for i in 0..self.nb_nodes() {
            for v in self.gate(i).dependencies() {
                assert!(self.is_valid(*v), "Invalid signal {v}");
            }
        }
        for i in 0..self.nb_outputs() {
            let v = self.output(i);
            assert!(self.is_valid(v), "Invalid output {v}");
        }
    }

    /// Returns whether a signal is valid (within bounds) in the network
    pub(crate) fn is_valid(&self, s: Signal) -> bool {
        if s.is_input() {
            s.input() < self.nb_inputs() as u32
        } else if s.is_var() {
            s.var() < self.nb_nodes() as u32
        } else {
            true
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs:",
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for i in 0..self.nb_nodes() {
            writeln!(f, "\t{} = {}", self.node(i), self.gate(i))?;
        }
        for i in 0..self.nb_outputs() {
            writeln!(f, "\to{} = {}", i, self.output(i))?;
        }
        Ok(())
    }
}
