//! Simulation of a logic network, with optional stuck-at faults
//!
//! A simulated network can be verified directly by the oracle:
//! ```
//! use adderkit::network::variants::Variant;
//! use adderkit::oracle::FullAdderOracle;
//! use adderkit::sim::SimulatedAdder;
//!
//! let net = Variant::Nand.build();
//! let mut dut = SimulatedAdder::new(&net).unwrap();
//! let summary = FullAdderOracle::new("nand").run_exhaustive(&mut dut);
//! assert!(summary.is_success());
//! ```

mod fault;
mod simple_sim;

use crate::error::Result;
use crate::oracle::{AdderUnderTest, BitInput, BitOutput};
use crate::Network;

pub use fault::Fault;
use simple_sim::SimpleSimulator;

fn bool_to_multi(values: &[bool]) -> Vec<u64> {
    values.iter().map(|b| if *b { !0 } else { 0 }).collect()
}

fn multi_to_bool(values: &[u64]) -> Vec<bool> {
    values.iter().map(|b| *b & 1 != 0).collect()
}

/// Simulate a network on one input pattern; return the output values
pub fn simulate_comb(a: &Network, input_values: &[bool]) -> Vec<bool> {
    simulate_comb_with_faults(a, input_values, &[])
}

/// Simulate a network on one input pattern, with faults injected; return the output values
pub fn simulate_comb_with_faults(a: &Network, input_values: &[bool], faults: &[Fault]) -> Vec<bool> {
    let mut sim = SimpleSimulator::with_faults(a, faults);
    multi_to_bool(&sim.run(&bool_to_multi(input_values)))
}

/// Simulate a network with 64 patterns packed in each input word; return the output words
pub fn simulate_multi(a: &Network, input_values: &[u64]) -> Vec<u64> {
    let mut sim = SimpleSimulator::from_network(a);
    sim.run(input_values)
}

/// A network seen as a full adder under test, possibly with injected faults
///
/// Input 0, 1 and 2 of the network are a, b and cin; output 0 and 1 are sum and cout.
pub struct SimulatedAdder<'a> {
    sim: SimpleSimulator<'a>,
}

impl<'a> SimulatedAdder<'a> {
    /// Wrap a network; fails if it does not have 3 inputs and 2 outputs
    pub fn new(network: &'a Network) -> Result<SimulatedAdder<'a>> {
        Self::with_faults(network, &[])
    }

    /// Wrap a network with faults injected
    pub fn with_faults(network: &'a Network, faults: &[Fault]) -> Result<SimulatedAdder<'a>> {
        network.check_adder_interface()?;
        Ok(SimulatedAdder {
            sim: SimpleSimulator::with_faults(network, faults),
        })
    }
}

impl AdderUnderTest for SimulatedAdder<'_> {
    fn eval(&mut self, input: BitInput) -> BitOutput {
        let out = multi_to_bool(&self.sim.run(&bool_to_multi(&input.to_bools())));
        BitOutput::from_bools(out[0], out[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::variants::Variant;
    use crate::oracle::FullAdderOracle;
    use crate::{Gate, NaryType};

    #[test]
    fn test_basic() {
        let mut aig = Network::default();
        let i0 = aig.add_input();
        let i1 = aig.add_input();
        let i2 = aig.add_input();
        let x1 = aig.xor(i0, i1);
        let x2 = aig.and(i0, i2);
        let x3 = aig.and(x2, !i1);
        aig.add_output(x1);
        aig.add_output(x3);

        assert_eq!(simulate_comb(&aig, &[false, false, false]), vec![false, false]);
        assert_eq!(simulate_comb(&aig, &[true, false, false]), vec![true, false]);
        assert_eq!(simulate_comb(&aig, &[true, false, true]), vec![true, true]);
        assert_eq!(simulate_comb(&aig, &[true, true, true]), vec![false, false]);
    }

    #[test]
    fn test_nary() {
        let mut aig = Network::default();
        let i0 = aig.add_input();
        let i1 = aig.add_input();
        let i2 = aig.add_input();
        let i3 = aig.add_input();
        let inputs = [i0, i1, i2, i3];
        for tp in [
            NaryType::And,
            NaryType::Xor,
            NaryType::Or,
            NaryType::Nand,
            NaryType::Nor,
            NaryType::Xnor,
        ] {
            let x = aig.add(Gate::nary(&inputs, tp));
            aig.add_output(x);
        }

        let patterns = [
            [false, false, false, false],
            [true, false, false, false],
            [false, false, true, false],
            [true, true, true, true],
        ];
        let expected = [
            vec![false, false, false, true, true, true],
            vec![false, true, true, true, false, false],
            vec![false, true, true, true, false, false],
            vec![true, false, true, false, false, true],
        ];
        for (p, e) in patterns.iter().zip(expected.iter()) {
            assert_eq!(&simulate_comb(&aig, p), e);
        }
    }

    #[test]
    fn test_multi() {
        // All 8 vectors at once: bit k of each word is vector k
        let net = Variant::Simple.build();
        let a = 0b1111_0000u64;
        let b = 0b1100_1100u64;
        let cin = 0b1010_1010u64;
        let out = simulate_multi(&net, &[a, b, cin]);
        assert_eq!(out[0] & 0xff, 0b1001_0110);
        assert_eq!(out[1] & 0xff, 0b1110_1000);
    }

    #[test]
    fn test_faults() {
        let net = Variant::Simple.build();
        // Gate 4 is the Or producing the carry
        let fault = Fault::OutputStuckAtFault {
            gate: 4,
            value: false,
        };
        assert_eq!(
            simulate_comb_with_faults(&net, &[true, true, false], &[fault]),
            vec![false, false]
        );
        let fault = Fault::InputStuckAtFault {
            gate: 1,
            input: 1,
            value: true,
        };
        assert_eq!(
            simulate_comb_with_faults(&net, &[false, false, false], &[fault]),
            vec![true, false]
        );
    }

    #[test]
    fn test_faulty_adder_fails() {
        let net = Variant::Majority.build();
        let fault = Fault::OutputStuckAtFault {
            gate: 1,
            value: false,
        };
        let mut dut = SimulatedAdder::with_faults(&net, &[fault]).unwrap();
        let summary = FullAdderOracle::new("faulty").run_exhaustive(&mut dut);
        assert_eq!(summary.nb_failed(), 4);
        assert_eq!(summary.nb_cout_mismatches(), 4);
        assert_eq!(summary.nb_sum_mismatches(), 0);
    }

    #[test]
    fn test_interface() {
        let mut net = Network::new();
        let i0 = net.add_input();
        net.add_output(i0);
        assert!(SimulatedAdder::new(&net).is_err());
    }
}
