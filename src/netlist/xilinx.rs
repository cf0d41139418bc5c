//! Netlists mapped to Xilinx 7-series primitives

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::{count_instances, DesignStyle};

/// Primitives that are counted, in display order
pub const PRIMITIVES: [&str; 16] = [
    "LUT1", "LUT2", "LUT3", "LUT4", "LUT5", "LUT6", "FDRE", "FDSE", "CARRY4", "MUXF7", "MUXF8",
    "DSP48E1", "RAMB36E1", "BUFG", "IBUF", "OBUF",
];

const PRIMITIVE_PREFIXES: [&str; 9] = [
    "LUT", "FD", "CARRY", "MUX", "DSP", "RAMB", "BUF", "IBUF", "OBUF",
];

lazy_static! {
    static ref PRIMITIVE_RE: Regex = Regex::new(&format!(r"\b({})\b", PRIMITIVES.join("|"))).unwrap();
}

/// Primitive counts of a Xilinx netlist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XilinxAnalysis {
    /// Number of occurrences of each primitive, including those not present
    pub primitive_counts: BTreeMap<&'static str, usize>,
    /// Number of instances of each user module
    pub module_instances: BTreeMap<String, usize>,
}

impl Default for XilinxAnalysis {
    fn default() -> Self {
        XilinxAnalysis {
            primitive_counts: PRIMITIVES.iter().map(|p| (*p, 0)).collect(),
            module_instances: BTreeMap::new(),
        }
    }
}

impl XilinxAnalysis {
    /// Number of occurrences of a primitive
    pub fn count(&self, primitive: &str) -> usize {
        self.primitive_counts.get(primitive).copied().unwrap_or(0)
    }

    /// Counts of LUT1 to LUT6
    pub fn lut_counts(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        PRIMITIVES[..6].iter().map(|p| (*p, self.count(p)))
    }

    /// Total number of LUTs of any size
    pub fn total_luts(&self) -> usize {
        self.lut_counts().map(|(_, nb)| nb).sum()
    }

    /// Number of flip-flops
    pub fn flip_flops(&self) -> usize {
        self.count("FDRE") + self.count("FDSE")
    }

    /// Flat or hierarchical design
    pub fn style(&self) -> DesignStyle {
        DesignStyle::from_instances(&self.module_instances)
    }
}

impl fmt::Display for XilinxAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Primitives:")?;
        for p in PRIMITIVES {
            let nb = self.count(p);
            if nb != 0 {
                writeln!(f, "\t{}: {}", p, nb)?;
            }
        }
        for (name, nb) in &self.module_instances {
            writeln!(f, "\tInstances of {}: {}", name, nb)?;
        }
        writeln!(f, "LUTs: {}", self.total_luts())?;
        writeln!(f, "Flip-flops: {}", self.flip_flops())?;
        writeln!(f, "Style: {}", self.style())
    }
}

/// Count the primitives and module instances of a Xilinx netlist
pub fn analyze_xilinx(content: &str) -> XilinxAnalysis {
    let mut ret = XilinxAnalysis::default();
    for cap in PRIMITIVE_RE.captures_iter(content) {
        if let Some(p) = PRIMITIVES.iter().find(|p| **p == &cap[1]) {
            *ret.primitive_counts.entry(*p).or_insert(0) += 1;
        }
    }
    ret.module_instances = count_instances(content, |m| {
        PRIMITIVE_PREFIXES.iter().any(|p| m.starts_with(p))
    });
    ret
}
