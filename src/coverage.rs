//! Fault coverage of the verification vectors
//!
//! Each single stuck-at fault is injected in turn, and the faulty network is verified by the oracle.
//! A fault is detected if at least one vector fails. This measures how much of an implementation
//! the exhaustive (or random) verification actually exercises.

use std::fmt;

use kdam::{tqdm, BarExt};
use log::info;

use crate::error::Result;
use crate::oracle::{random_vectors, BitInput, FullAdderOracle};
use crate::sim::{Fault, SimulatedAdder};
use crate::Network;

/// Faults found and missed by a set of test vectors
#[derive(Clone, Debug, Default)]
pub struct FaultCoverage {
    /// Faults causing at least one failing vector
    pub detected: Vec<Fault>,
    /// Faults with no visible effect on the vectors
    pub undetected: Vec<Fault>,
}

impl FaultCoverage {
    /// Total number of faults considered
    pub fn nb_faults(&self) -> usize {
        self.detected.len() + self.undetected.len()
    }

    /// Percentage of detected faults; 100% if there is no fault at all
    pub fn coverage(&self) -> f64 {
        if self.nb_faults() == 0 {
            100.0
        } else {
            100.0 * self.detected.len() as f64 / self.nb_faults() as f64
        }
    }
}

impl fmt::Display for FaultCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Detected {}/{} faults ({:.2}% coverage)",
            self.detected.len(),
            self.nb_faults(),
            self.coverage()
        )?;
        for fault in &self.undetected {
            writeln!(f, "  Undetected: {}", fault)?;
        }
        Ok(())
    }
}

/// Vectors used for coverage analysis: all 8 combinations, then optionally `count` random ones
pub fn coverage_vectors(random: Option<(usize, u64)>) -> Vec<BitInput> {
    let mut ret: Vec<BitInput> = BitInput::all().collect();
    if let Some((count, seed)) = random {
        ret.extend(random_vectors(count, seed));
    }
    ret
}

/// Compute which stuck-at faults of the network are detected by the vectors
pub fn fault_coverage(network: &Network, vectors: &[BitInput]) -> Result<FaultCoverage> {
    network.check_adder_interface()?;
    let faults = Fault::all(network);
    let oracle = FullAdderOracle::new("fault coverage");
    let mut ret = FaultCoverage::default();

    let mut progress = tqdm!(total = faults.len());
    progress.set_description("Faults processed");
    for fault in faults {
        let mut dut = SimulatedAdder::with_faults(network, &[fault])?;
        let summary = oracle.run_vectors(&mut dut, vectors.iter().copied());
        if summary.is_success() {
            ret.undetected.push(fault);
        } else {
            ret.detected.push(fault);
        }
        progress.set_postfix(format!("undetected={}", ret.undetected.len()));
        progress.update(1)?;
    }
    info!(
        "{} vectors detect {}/{} faults ({:.2}% coverage)",
        vectors.len(),
        ret.detected.len(),
        ret.nb_faults(),
        ret.coverage()
    );
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::variants::Variant;

    #[test]
    fn test_full_coverage() {
        for v in [Variant::Simple, Variant::HalfAdder, Variant::Majority] {
            let net = v.build();
            let cov = fault_coverage(&net, &coverage_vectors(None)).unwrap();
            assert_eq!(cov.nb_faults(), Fault::all(&net).len());
            assert!(cov.undetected.is_empty(), "{v}: {cov}");
            assert_eq!(cov.coverage(), 100.0);
        }
    }

    #[test]
    fn test_single_vector() {
        // (0, 0, 0) only sees faults that force a one somewhere visible
        let net = Variant::Simple.build();
        let vectors = [BitInput::new(0, 0, 0).unwrap()];
        let cov = fault_coverage(&net, &vectors).unwrap();
        assert!(!cov.detected.is_empty());
        assert!(!cov.undetected.is_empty());
        assert!(cov.coverage() < 100.0);
    }

    #[test]
    fn test_random_vectors() {
        assert_eq!(coverage_vectors(None).len(), 8);
        let v = coverage_vectors(Some((20, 3)));
        assert_eq!(v.len(), 28);
        assert_eq!(&v[8..], random_vectors(20, 3).as_slice());
    }
}
