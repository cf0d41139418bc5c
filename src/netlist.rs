//! Resource estimation from synthesized Verilog netlists
//!
//! Netlists are scanned textually with regular expressions: cells are counted by name, without
//! building any connectivity. All figures are advisory estimates.

pub mod xilinx;
pub mod yosys;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

pub use xilinx::{analyze_xilinx, XilinxAnalysis};
pub use yosys::{analyze_gates, CellType, GateAnalysis};

lazy_static! {
    static ref INSTANCE_RE: Regex = Regex::new(r"(\w+)\s+(\w+)\s*\(").unwrap();
}

const VERILOG_KEYWORDS: [&str; 7] = ["module", "input", "output", "inout", "wire", "reg", "assign"];

/// Whether a design instantiates user modules or is a single flat module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesignStyle {
    /// Only primitive cells
    Flat,
    /// At least one instance of a user module
    Hierarchical,
}

impl DesignStyle {
    fn from_instances(instances: &BTreeMap<String, usize>) -> DesignStyle {
        if instances.is_empty() {
            DesignStyle::Flat
        } else {
            DesignStyle::Hierarchical
        }
    }
}

impl fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignStyle::Flat => write!(f, "Flat"),
            DesignStyle::Hierarchical => write!(f, "Hierarchical"),
        }
    }
}

/// Estimated cost of a known submodule, used to account for hierarchical designs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmoduleCost {
    /// Primitive gates
    pub gates: usize,
    /// Transistors
    pub transistors: usize,
    /// FPGA LUTs
    pub luts: usize,
}

/// Cost of the submodules whose content is known
///
/// A half adder is one Xor and one And.
pub fn known_submodule(name: &str) -> Option<SubmoduleCost> {
    match name {
        "half_adder" => Some(SubmoduleCost {
            gates: 2,
            transistors: CellType::Xor.transistors() + CellType::And.transistors(),
            luts: 2,
        }),
        _ => None,
    }
}

/// Count the module instances in a netlist, skipping Verilog keywords and names rejected by `skip`
fn count_instances<F: Fn(&str) -> bool>(content: &str, skip: F) -> BTreeMap<String, usize> {
    let mut ret = BTreeMap::new();
    for cap in INSTANCE_RE.captures_iter(content) {
        let module = &cap[1];
        if VERILOG_KEYWORDS.contains(&module) || module.starts_with('_') || skip(module) {
            continue;
        }
        *ret.entry(module.to_string()).or_insert(0) += 1;
    }
    ret
}

/// Read a netlist file as text
pub fn read_netlist_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Label of an implementation, from the name of its netlist file
///
/// The `full_adder_` prefix and `_synth` suffix used by the synthesis flow are removed.
pub fn implementation_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = stem.strip_prefix("full_adder_").unwrap_or(&stem);
    let stem = stem
        .strip_suffix("_synth")
        .or_else(|| stem.strip_suffix("_xilinx"))
        .unwrap_or(stem);
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_instances() {
        let content = "module full_adder(a, b, cin, sum, cout);
  input a;
  wire w1;
  half_adder ha1 (.a(a), .b(b), .sum(s1), .carry(c1));
  half_adder ha2 (.a(s1), .b(cin), .sum(sum), .carry(c2));
  \\$_OR_ _1_ (.A(c1), .B(c2), .Y(cout));
endmodule
";
        let instances = count_instances(content, |_| false);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances["half_adder"], 2);
        assert_eq!(DesignStyle::from_instances(&instances), DesignStyle::Hierarchical);
        assert_eq!(DesignStyle::from_instances(&BTreeMap::new()), DesignStyle::Flat);
    }

    #[test]
    fn test_known_submodule() {
        let cost = known_submodule("half_adder").unwrap();
        assert_eq!(cost.gates, 2);
        assert_eq!(cost.transistors, 14);
        assert_eq!(cost.luts, 2);
        assert!(known_submodule("ripple_adder").is_none());
    }

    #[test]
    fn test_implementation_name() {
        let p = PathBuf::from("synth/full_adder_simple_synth.v");
        assert_eq!(implementation_name(&p), "simple");
        let p = PathBuf::from("full_adder_half_adder_xilinx.v");
        assert_eq!(implementation_name(&p), "half_adder");
        let p = PathBuf::from("custom.v");
        assert_eq!(implementation_name(&p), "custom");
    }
}
