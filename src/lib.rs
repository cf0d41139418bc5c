//! Full adder reference model, verification oracle and resource analysis
//!
//! This crate checks implementations of the one-bit full adder against a reference model, and
//! estimates what they cost in gates, transistors and FPGA LUTs.
//!
//! # Usage
//!
//! The oracle verifies anything that maps an input (a, b, cin) to an output (sum, cout): a closure,
//! a gate-level network, or a wrapper around an external simulator.
//! Every vector is checked, and mismatches are accumulated in a [`Summary`] rather than raised.
//!
//! ```bash
//! # Verify the built-in gate-level variants, with 1000 additional random vectors
//! adderkit verify --random -n 1000 --seed 7
//! # Verify an external implementation, and write a Markdown report
//! adderkit verify my_adder.bench --report verification.md
//! # Measure the stuck-at fault coverage of exhaustive verification
//! adderkit coverage -v nand
//! # Analyze netlists synthesized by Yosys, or mapped to Xilinx primitives
//! adderkit gates full_adder_simple_synth.v full_adder_half_adder_synth.v
//! adderkit fpga --xilinx full_adder_simple_xilinx.v -o fpga.md
//! ```
//!
//! # Development
//!
//! ## Datastructures
//!
//! Gate-level implementations use `Network`, a Gate-Inverter-Graph representation of a logic
//! circuit. Inverters are implicit, occupying just one bit in `Signal`.
//! The network is kept in topological order, so that a given gate has an index higher than its inputs.
//!
//! For example, here is a full adder circuit, verified by the oracle:
//! ```
//! # use adderkit::{Network, FullAdderOracle};
//! # use adderkit::sim::SimulatedAdder;
//! let mut net = Network::new();
//! let a = net.add_input();
//! let b = net.add_input();
//! let cin = net.add_input();
//! let sum = net.xor3(a, b, cin);
//! let cout = net.maj(a, b, cin);
//! net.add_output(sum);
//! net.add_output(cout);
//!
//! let mut dut = SimulatedAdder::new(&net).unwrap();
//! let summary = FullAdderOracle::new("majority").run_exhaustive(&mut dut);
//! assert!(summary.is_success());
//! ```
//!
//! ## Estimates
//!
//! Transistor and LUT counts, whether computed on a `Network` or scanned from a netlist, are
//! rough estimates meant to compare implementations with each other.

#![warn(missing_docs)]

pub mod cmd;
pub mod coverage;
pub mod error;
pub mod io;
pub mod netlist;
pub mod network;
pub mod oracle;
pub mod report;
pub mod sim;

pub use error::{Error, Result};
pub use network::{area, stats, Gate, NaryType, Network, Signal};
pub use oracle::{compute_expected, AdderUnderTest, BitInput, BitOutput, FullAdderOracle, Summary, TestResult};
