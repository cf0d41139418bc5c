//! Yosys generic gate-level netlists
//!
//! Yosys writes its internal cells as `\$_AND_ _1_ (...)`; each such instance is counted by type.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{count_instances, known_submodule, DesignStyle};

lazy_static! {
    static ref CELL_RE: Regex = Regex::new(r"\\?\$_([A-Z0-9]+(?:_[A-Z0-9]+)*)_\s").unwrap();
}

/// Yosys internal cell types
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellType {
    /// 2-input And
    And,
    /// 2-input Or
    Or,
    /// 2-input Xor
    Xor,
    /// 2-input Xnor
    Xnor,
    /// And with the second input inverted
    AndNot,
    /// Or with the second input inverted
    OrNot,
    /// 2-input Nand
    Nand,
    /// 2-input Nor
    Nor,
    /// Inverter
    Not,
    /// 2:1 multiplexer
    Mux,
    /// Flip-flop, any clock polarity or enable/reset variant
    Dff,
    /// Latch, any polarity or reset variant
    Dlatch,
}

impl CellType {
    /// Identify a cell from the name between `$_` and the trailing `_`
    pub fn from_cell_name(name: &str) -> Option<CellType> {
        use CellType::*;
        let ret = match name {
            "AND" => And,
            "OR" => Or,
            "XOR" => Xor,
            "XNOR" => Xnor,
            "ANDNOT" => AndNot,
            "ORNOT" => OrNot,
            "NAND" => Nand,
            "NOR" => Nor,
            "NOT" => Not,
            "MUX" => Mux,
            _ => {
                if name.starts_with("DFF") || name.starts_with("SDFF") {
                    Dff
                } else if name.starts_with("DLATCH") {
                    Dlatch
                } else {
                    return None;
                }
            }
        };
        Some(ret)
    }

    /// Approximate transistor count in static CMOS
    pub fn transistors(&self) -> usize {
        use CellType::*;
        match self {
            And | Or => 6,
            Xor | Xnor => 8,
            AndNot | OrNot | Nand | Nor => 4,
            Not => 2,
            Mux => 12,
            Dff => 20,
            Dlatch => 12,
        }
    }

    /// Approximate number of FPGA LUTs; sequential cells map to dedicated flip-flops
    pub fn luts(&self) -> usize {
        match self {
            CellType::Dff | CellType::Dlatch => 0,
            _ => 1,
        }
    }

    /// Whether the cell holds state
    pub fn is_sequential(&self) -> bool {
        matches!(self, CellType::Dff | CellType::Dlatch)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CellType::*;
        let s = match self {
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Xnor => "XNOR",
            AndNot => "ANDNOT",
            OrNot => "ORNOT",
            Nand => "NAND",
            Nor => "NOR",
            Not => "NOT",
            Mux => "MUX",
            Dff => "DFF",
            Dlatch => "LATCH",
        };
        write!(f, "{}", s)
    }
}

/// Cell counts of a Yosys netlist
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateAnalysis {
    /// Number of instances of each known cell type
    pub gate_counts: BTreeMap<CellType, usize>,
    /// Yosys cells that are not handled, by name
    pub other_cells: BTreeMap<String, usize>,
    /// Number of instances of each user module
    pub module_instances: BTreeMap<String, usize>,
}

impl GateAnalysis {
    /// Number of instances of a cell type
    pub fn count(&self, tp: CellType) -> usize {
        self.gate_counts.get(&tp).copied().unwrap_or(0)
    }

    /// Number of primitive cells, including those of known submodules
    pub fn total_primitive_gates(&self) -> usize {
        self.gate_counts.values().sum::<usize>() + self.submodule_cost(|c| c.gates)
    }

    /// Estimated transistors, including those of known submodules
    pub fn total_transistors(&self) -> usize {
        self.gate_counts
            .iter()
            .map(|(tp, nb)| tp.transistors() * nb)
            .sum::<usize>()
            + self.submodule_cost(|c| c.transistors)
    }

    /// Estimated LUTs, including those of submodules; unknown submodules count as one LUT
    pub fn estimated_luts(&self) -> usize {
        let gates: usize = self
            .gate_counts
            .iter()
            .map(|(tp, nb)| tp.luts() * nb)
            .sum();
        let modules: usize = self
            .module_instances
            .iter()
            .map(|(name, nb)| known_submodule(name).map(|c| c.luts).unwrap_or(1) * nb)
            .sum();
        gates + modules
    }

    /// Number of sequential cells
    pub fn nb_sequential(&self) -> usize {
        self.gate_counts
            .iter()
            .filter(|(tp, _)| tp.is_sequential())
            .map(|(_, nb)| nb)
            .sum()
    }

    /// Flat or hierarchical design
    pub fn style(&self) -> DesignStyle {
        DesignStyle::from_instances(&self.module_instances)
    }

    fn submodule_cost<F: Fn(&super::SubmoduleCost) -> usize>(&self, f: F) -> usize {
        self.module_instances
            .iter()
            .filter_map(|(name, nb)| known_submodule(name).map(|c| f(&c) * nb))
            .sum()
    }
}

impl fmt::Display for GateAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cells:")?;
        for (tp, nb) in &self.gate_counts {
            writeln!(f, "\t{}: {}", tp, nb)?;
        }
        for (name, nb) in &self.other_cells {
            writeln!(f, "\t{} (unknown): {}", name, nb)?;
        }
        for (name, nb) in &self.module_instances {
            writeln!(f, "\tInstances of {}: {}", name, nb)?;
        }
        writeln!(f, "Primitive gates: {}", self.total_primitive_gates())?;
        writeln!(f, "Transistors: {}", self.total_transistors())?;
        writeln!(f, "LUTs: {}", self.estimated_luts())?;
        writeln!(f, "Style: {}", self.style())
    }
}

/// Count the cells and module instances of a Yosys netlist
pub fn analyze_gates(content: &str) -> GateAnalysis {
    let mut ret = GateAnalysis::default();
    for cap in CELL_RE.captures_iter(content) {
        let name = &cap[1];
        match CellType::from_cell_name(name) {
            Some(tp) => *ret.gate_counts.entry(tp).or_insert(0) += 1,
            None => {
                debug!("Unknown Yosys cell $_{}_", name);
                *ret.other_cells.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }
    ret.module_instances = count_instances(content, |_| false);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "module full_adder_simple(a, b, cin, sum, cout);
  input a;
  input b;
  input cin;
  output sum;
  output cout;
  wire _0_;
  wire _1_;
  \\$_XOR_  _2_ (
    .A(a),
    .B(b),
    .Y(_0_)
  );
  \\$_XOR_  _3_ (
    .A(_0_),
    .B(cin),
    .Y(sum)
  );
  \\$_AND_  _4_ (
    .A(a),
    .B(b),
    .Y(_1_)
  );
  \\$_ANDNOT_  _5_ (
    .A(_0_),
    .B(cin),
    .Y(_6_)
  );
  \\$_OR_  _7_ (
    .A(_1_),
    .B(_6_),
    .Y(cout)
  );
endmodule
";

    const HIERARCHICAL: &str = "module full_adder_half_adder(a, b, cin, sum, cout);
  input a;
  input b;
  input cin;
  output sum;
  output cout;
  wire c1;
  wire c2;
  wire s1;
  \\$_OR_  _0_ (
    .A(c1),
    .B(c2),
    .Y(cout)
  );
  half_adder ha1 (
    .a(a),
    .b(b),
    .carry(c1),
    .sum(s1)
  );
  half_adder ha2 (
    .a(s1),
    .b(cin),
    .carry(c2),
    .sum(sum)
  );
endmodule
";

    #[test]
    fn test_cell_names() {
        assert_eq!(CellType::from_cell_name("AND"), Some(CellType::And));
        assert_eq!(CellType::from_cell_name("ANDNOT"), Some(CellType::AndNot));
        assert_eq!(CellType::from_cell_name("DFF_P"), Some(CellType::Dff));
        assert_eq!(CellType::from_cell_name("DFFE_PP0P"), Some(CellType::Dff));
        assert_eq!(CellType::from_cell_name("DLATCH_N"), Some(CellType::Dlatch));
        assert_eq!(CellType::from_cell_name("AOI3"), None);
    }

    #[test]
    fn test_flat() {
        let a = analyze_gates(SIMPLE);
        assert_eq!(a.count(CellType::Xor), 2);
        assert_eq!(a.count(CellType::And), 1);
        assert_eq!(a.count(CellType::AndNot), 1);
        assert_eq!(a.count(CellType::Or), 1);
        assert_eq!(a.total_primitive_gates(), 5);
        assert_eq!(a.total_transistors(), 8 + 8 + 6 + 4 + 6);
        assert_eq!(a.estimated_luts(), 5);
        assert_eq!(a.style(), DesignStyle::Flat);
        assert!(a.module_instances.is_empty());
    }

    #[test]
    fn test_hierarchical() {
        let a = analyze_gates(HIERARCHICAL);
        assert_eq!(a.count(CellType::Or), 1);
        assert_eq!(a.module_instances["half_adder"], 2);
        assert_eq!(a.total_primitive_gates(), 1 + 2 * 2);
        assert_eq!(a.total_transistors(), 6 + 2 * 14);
        assert_eq!(a.estimated_luts(), 1 + 2 * 2);
        assert_eq!(a.style(), DesignStyle::Hierarchical);
    }

    #[test]
    fn test_sequential_and_unknown() {
        let content = "  \\$_DFF_P_  _0_ (.C(clk), .D(d), .Q(q));
  \\$_DLATCH_N_  _1_ (.E(e), .D(d), .Q(r));
  \\$_AOI3_  _2_ (.A(a), .B(b), .C(c), .Y(y));
";
        let a = analyze_gates(content);
        assert_eq!(a.count(CellType::Dff), 1);
        assert_eq!(a.count(CellType::Dlatch), 1);
        assert_eq!(a.nb_sequential(), 2);
        assert_eq!(a.other_cells["AOI3"], 1);
        assert_eq!(a.total_transistors(), 20 + 12);
        assert_eq!(a.estimated_luts(), 0);
    }

    #[test]
    fn test_empty() {
        let a = analyze_gates("");
        assert_eq!(a, GateAnalysis::default());
        assert_eq!(a.total_primitive_gates(), 0);
        assert_eq!(a.style(), DesignStyle::Flat);
    }
}
