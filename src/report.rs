//! Markdown reports
//!
//! Each report wraps the results of several implementations, labeled by name, and is rendered
//! with [`std::fmt::Display`]:
//! ```
//! use adderkit::network::variants::Variant;
//! use adderkit::oracle::FullAdderOracle;
//! use adderkit::report::VerificationReport;
//! use adderkit::sim::SimulatedAdder;
//!
//! let net = Variant::Majority.build();
//! let mut dut = SimulatedAdder::new(&net).unwrap();
//! let summary = FullAdderOracle::new("majority").run_exhaustive(&mut dut);
//! let results = vec![("majority".to_string(), summary)];
//! let report = VerificationReport::new(&results).to_string();
//! assert!(report.contains("| Majority | 8 | 8 | 0 | 100.00% | PASS |"));
//! ```

use std::fmt;

use crate::netlist::{GateAnalysis, XilinxAnalysis};
use crate::network::area::AreaParameters;
use crate::network::stats::stats;
use crate::network::variants::Variant;
use crate::oracle::Summary;

/// Human-readable form of an implementation name: `half_adder` becomes `Half Adder`
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r),
        None => "n/a".to_string(),
    }
}

/// Verification results of several implementations
pub struct VerificationReport<'a> {
    results: &'a [(String, Summary)],
}

impl<'a> VerificationReport<'a> {
    /// Create a report from labeled summaries
    pub fn new(results: &'a [(String, Summary)]) -> Self {
        VerificationReport { results }
    }

    /// Whether every implementation passed
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, s)| s.is_success())
    }
}

impl fmt::Display for VerificationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Full Adder Verification Report")?;
        writeln!(f)?;
        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(
            f,
            "| Implementation | Tests | Passed | Failed | Success Rate | Status |"
        )?;
        writeln!(
            f,
            "|----------------|-------|--------|--------|--------------|--------|"
        )?;
        for (name, s) in self.results {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} |",
                title_case(name),
                s.nb_tests(),
                s.nb_passed(),
                s.nb_failed(),
                format_rate(s.success_rate()),
                if s.is_success() { "PASS" } else { "FAIL" }
            )?;
        }
        writeln!(f)?;

        for (name, s) in self.results {
            if s.is_success() {
                continue;
            }
            writeln!(f, "## {} Failures", title_case(name))?;
            writeln!(f)?;
            writeln!(
                f,
                "{} sum mismatches, {} carry mismatches",
                s.nb_sum_mismatches(),
                s.nb_cout_mismatches()
            )?;
            writeln!(f)?;
            writeln!(
                f,
                "| a | b | cin | Expected sum | Observed sum | Expected cout | Observed cout |"
            )?;
            writeln!(
                f,
                "|---|---|-----|--------------|--------------|---------------|---------------|"
            )?;
            for r in s.failures() {
                writeln!(
                    f,
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    r.input.a(),
                    r.input.b(),
                    r.input.cin(),
                    r.expected.sum,
                    r.observed.sum,
                    r.expected.cout,
                    r.observed.cout
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Conclusion")?;
        writeln!(f)?;
        if self.is_success() {
            writeln!(f, "All implementations match the reference full adder.")
        } else {
            let nb_failed = self.results.iter().filter(|(_, s)| !s.is_success()).count();
            writeln!(
                f,
                "{} of {} implementations do not match the reference full adder.",
                nb_failed,
                self.results.len()
            )
        }
    }
}

/// Gate-level analysis of several Yosys netlists
pub struct GateReport<'a> {
    results: &'a [(String, GateAnalysis)],
}

impl<'a> GateReport<'a> {
    /// Create a report from labeled analyses
    pub fn new(results: &'a [(String, GateAnalysis)]) -> Self {
        GateReport { results }
    }
}

impl fmt::Display for GateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Full Adder Gate-Level Analysis Report")?;
        writeln!(f)?;
        writeln!(f, "## Gate Count Summary")?;
        writeln!(f)?;
        writeln!(
            f,
            "| Implementation | Primitive Gates | Transistors | Design Style |"
        )?;
        writeln!(
            f,
            "|----------------|-----------------|-------------|--------------|"
        )?;
        for (name, a) in self.results {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                title_case(name),
                a.total_primitive_gates(),
                a.total_transistors(),
                a.style()
            )?;
        }
        writeln!(f)?;

        for (name, a) in self.results {
            writeln!(f, "## {} Implementation", title_case(name))?;
            writeln!(f)?;
            writeln!(f, "### Gate Breakdown")?;
            writeln!(f)?;
            if a.gate_counts.is_empty() {
                writeln!(f, "No primitive gates found.")?;
            } else {
                writeln!(f, "| Gate Type | Count | Transistors |")?;
                writeln!(f, "|-----------|-------|-------------|")?;
                for (tp, nb) in &a.gate_counts {
                    writeln!(f, "| {} | {} | {} |", tp, nb, nb * tp.transistors())?;
                }
            }
            writeln!(f)?;
            if !a.other_cells.is_empty() {
                writeln!(f, "Unrecognized cells, not counted:")?;
                for (cell, nb) in &a.other_cells {
                    writeln!(f, "- $_{}_: {}", cell, nb)?;
                }
                writeln!(f)?;
            }
            if !a.module_instances.is_empty() {
                writeln!(f, "### Module Instances")?;
                writeln!(f)?;
                writeln!(f, "| Module | Instances |")?;
                writeln!(f, "|--------|-----------|")?;
                for (module, nb) in &a.module_instances {
                    writeln!(f, "| {} | {} |", module, nb)?;
                }
                writeln!(f)?;
            }
            writeln!(f, "### Total Statistics")?;
            writeln!(f)?;
            writeln!(f, "- **Primitive Gates**: {}", a.total_primitive_gates())?;
            writeln!(f, "- **Estimated Transistors**: {}", a.total_transistors())?;
            writeln!(f, "- **Design Style**: {}", a.style())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// FPGA resource estimation, from Yosys netlists or from Xilinx netlists
pub enum FpgaReport<'a> {
    /// LUT estimates from generic gates
    Estimate(&'a [(String, GateAnalysis)]),
    /// Actual primitives of mapped netlists
    Xilinx(&'a [(String, XilinxAnalysis)]),
}

impl FpgaReport<'_> {
    fn fmt_estimate(f: &mut fmt::Formatter<'_>, results: &[(String, GateAnalysis)]) -> fmt::Result {
        writeln!(
            f,
            "| Implementation | Estimated LUTs | Gate Count | Design Style |"
        )?;
        writeln!(
            f,
            "|----------------|----------------|------------|--------------|"
        )?;
        for (name, a) in results {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                title_case(name),
                a.estimated_luts(),
                a.gate_counts.values().sum::<usize>(),
                a.style()
            )?;
        }
        writeln!(f)?;
        for (name, a) in results {
            writeln!(f, "## {} Implementation", title_case(name))?;
            writeln!(f)?;
            writeln!(f, "**Gate Breakdown:**")?;
            for (tp, nb) in &a.gate_counts {
                writeln!(f, "- {}: {}", tp, nb)?;
            }
            if !a.module_instances.is_empty() {
                writeln!(f)?;
                writeln!(f, "**Module Instances:**")?;
                for (module, nb) in &a.module_instances {
                    writeln!(f, "- {}: {}", module, nb)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "**LUT Estimation:**")?;
            writeln!(f, "- **Estimated LUTs**: {}", a.estimated_luts())?;
            if a.nb_sequential() != 0 {
                writeln!(f, "- **Flip-Flops and Latches**: {}", a.nb_sequential())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn fmt_xilinx(f: &mut fmt::Formatter<'_>, results: &[(String, XilinxAnalysis)]) -> fmt::Result {
        writeln!(f, "| Implementation | Total LUTs | Flip-Flops | Design Style |")?;
        writeln!(f, "|----------------|------------|------------|--------------|")?;
        for (name, a) in results {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                title_case(name),
                a.total_luts(),
                a.flip_flops(),
                a.style()
            )?;
        }
        writeln!(f)?;
        for (name, a) in results {
            writeln!(f, "## {} Implementation", title_case(name))?;
            writeln!(f)?;
            writeln!(f, "**LUT Utilization:**")?;
            for (lut, nb) in a.lut_counts() {
                if nb != 0 {
                    writeln!(f, "- {}: {}", lut, nb)?;
                }
            }
            writeln!(f, "- **Total LUTs**: {}", a.total_luts())?;
            writeln!(f)?;
            writeln!(f, "**Other Resources:**")?;
            for (p, nb) in &a.primitive_counts {
                if nb != &0 && !p.starts_with("LUT") {
                    writeln!(f, "- {}: {}", p, nb)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for FpgaReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# FPGA Resource Analysis Report")?;
        writeln!(f)?;
        writeln!(f, "## Summary")?;
        writeln!(f)?;
        match self {
            FpgaReport::Estimate(results) => Self::fmt_estimate(f, results),
            FpgaReport::Xilinx(results) => Self::fmt_xilinx(f, results),
        }
    }
}

/// Size of the built-in gate-level variants
pub struct VariantReport<'a> {
    variants: &'a [Variant],
}

impl<'a> VariantReport<'a> {
    /// Create a report on the given variants
    pub fn new(variants: &'a [Variant]) -> Self {
        VariantReport { variants }
    }
}

impl fmt::Display for VariantReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transistors = AreaParameters::transistors();
        let luts = AreaParameters::luts();
        writeln!(f, "# Full Adder Variants")?;
        writeln!(f)?;
        writeln!(
            f,
            "| Variant | Gates | Inverters | Transistors | LUTs |"
        )?;
        writeln!(
            f,
            "|---------|-------|-----------|-------------|------|"
        )?;
        for v in self.variants {
            let net = v.build();
            let st = stats(&net);
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                v.label(),
                st.nb_gates(),
                st.nb_inverted,
                transistors.area(&net),
                luts.area(&net)
            )?;
        }
        Ok(())
    }
}
