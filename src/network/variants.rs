//! Gate-level implementations of the full adder
//!
//! All variants have the same interface: inputs (a, b, cin) and outputs (sum, cout).
//!
//! ```
//! use adderkit::network::variants::Variant;
//!
//! for v in Variant::all() {
//!     let net = v.build();
//!     assert_eq!(net.nb_inputs(), 3);
//!     assert_eq!(net.nb_outputs(), 2);
//! }
//! ```

use std::fmt;

use clap::ValueEnum;
use volute::Lut;

use crate::{Network, Signal};

/// The implementations of the full adder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    /// Cascaded Xor for the sum, And-Or for the carry
    Simple,
    /// Generate and propagate signals, with an Or-based propagate
    CarryLookahead,
    /// Two half adders and an Or gate
    HalfAdder,
    /// A single Maj gate for the carry and a Xor3 for the sum
    Majority,
    /// Two 3-input Luts, as mapped on an FPGA
    Lut,
    /// Nine Nand2 gates
    Nand,
}

impl Variant {
    /// All variants, in a fixed order
    pub fn all() -> [Variant; 6] {
        [
            Variant::Simple,
            Variant::CarryLookahead,
            Variant::HalfAdder,
            Variant::Majority,
            Variant::Lut,
            Variant::Nand,
        ]
    }

    /// Human-readable name, for reports
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Simple => "Simple XOR/AND",
            Variant::CarryLookahead => "Carry Lookahead",
            Variant::HalfAdder => "Half Adder",
            Variant::Majority => "Majority",
            Variant::Lut => "LUT",
            Variant::Nand => "NAND",
        }
    }

    /// Build the network
    pub fn build(&self) -> Network {
        let mut ret = Network::new();
        let a = ret.add_input();
        let b = ret.add_input();
        let cin = ret.add_input();
        let (sum, cout) = match self {
            Variant::Simple => simple(&mut ret, a, b, cin),
            Variant::CarryLookahead => carry_lookahead(&mut ret, a, b, cin),
            Variant::HalfAdder => modular(&mut ret, a, b, cin),
            Variant::Majority => (ret.xor3(a, b, cin), ret.maj(a, b, cin)),
            Variant::Lut => lut_mapped(&mut ret, a, b, cin),
            Variant::Nand => nand_only(&mut ret, a, b, cin),
        };
        ret.add_output(sum);
        ret.add_output(cout);
        ret.check();
        ret
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn simple(net: &mut Network, a: Signal, b: Signal, cin: Signal) -> (Signal, Signal) {
    let p = net.xor(a, b);
    let sum = net.xor(p, cin);
    let g = net.and(a, b);
    let t = net.and(p, cin);
    let cout = net.or(g, t);
    (sum, cout)
}

fn carry_lookahead(net: &mut Network, a: Signal, b: Signal, cin: Signal) -> (Signal, Signal) {
    let g = net.and(a, b);
    // Or-propagate: the a & b case is already covered by g
    let p = net.or(a, b);
    let t = net.and(p, cin);
    let cout = net.or(g, t);
    let sum = net.xor3(a, b, cin);
    (sum, cout)
}

/// Half adder: (a ^ b, a & b)
pub fn half_adder(net: &mut Network, a: Signal, b: Signal) -> (Signal, Signal) {
    (net.xor(a, b), net.and(a, b))
}

fn modular(net: &mut Network, a: Signal, b: Signal, cin: Signal) -> (Signal, Signal) {
    let (s1, c1) = half_adder(net, a, b);
    let (sum, c2) = half_adder(net, s1, cin);
    let cout = net.or(c1, c2);
    (sum, cout)
}

fn lut_mapped(net: &mut Network, a: Signal, b: Signal, cin: Signal) -> (Signal, Signal) {
    let va = Lut::nth_var(3, 0);
    let vb = Lut::nth_var(3, 1);
    let vc = Lut::nth_var(3, 2);
    let sum_lut = va.clone() ^ vb.clone() ^ vc.clone();
    let cout_lut = (va.clone() & vb.clone()) | (vc & (va ^ vb));
    let sum = net.lut(&[a, b, cin], sum_lut);
    let cout = net.lut(&[a, b, cin], cout_lut);
    (sum, cout)
}

fn nand_only(net: &mut Network, a: Signal, b: Signal, cin: Signal) -> (Signal, Signal) {
    let n1 = net.nand(a, b);
    let n2 = net.nand(a, n1);
    let n3 = net.nand(b, n1);
    let s1 = net.nand(n2, n3);
    let n4 = net.nand(s1, cin);
    let n5 = net.nand(s1, n4);
    let n6 = net.nand(cin, n4);
    let sum = net.nand(n5, n6);
    let cout = net.nand(n1, n4);
    (sum, cout)
}
