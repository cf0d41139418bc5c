//! Reference model of the full adder and verification of implementations against it
//!
//! The oracle drives any [`AdderUnderTest`] (a closure, a simulated network, ...) and
//! accumulates the outcome in a [`Summary`]. Mismatches are recorded, never raised,
//! so that a run always reports every failing vector.
//!
//! ```
//! use adderkit::oracle::{BitInput, BitOutput, FullAdderOracle};
//!
//! let oracle = FullAdderOracle::new("behavioral");
//! let mut dut = |v: BitInput| {
//!     let total = v.a() + v.b() + v.cin();
//!     BitOutput::new(total & 1, total >> 1)
//! };
//! let summary = oracle.run_exhaustive(&mut dut);
//! assert_eq!(summary.nb_passed(), 8);
//! assert!(summary.is_success());
//! ```

mod summary;
mod vector;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;

pub use summary::{Summary, TestResult};
pub use vector::{BitInput, BitOutput};

/// Seed used by default for random runs
pub const DEFAULT_SEED: u64 = 42;

/// Number of random vectors used by default
pub const DEFAULT_RANDOM_COUNT: usize = 100;

/// An implementation of the full adder that can be queried synchronously
pub trait AdderUnderTest {
    /// Apply the inputs and return the outputs
    fn eval(&mut self, input: BitInput) -> BitOutput;
}

impl<F: FnMut(BitInput) -> BitOutput> AdderUnderTest for F {
    fn eval(&mut self, input: BitInput) -> BitOutput {
        self(input)
    }
}

/// Full adder function on a validated input
pub fn full_add(input: BitInput) -> BitOutput {
    let (a, b, cin) = (input.a(), input.b(), input.cin());
    BitOutput {
        sum: a ^ b ^ cin,
        cout: (a & b) | ((a ^ b) & cin),
    }
}

/// Expected sum and carry-out; fails if a value is not 0 or 1
pub fn compute_expected(a: u8, b: u8, cin: u8) -> Result<BitOutput> {
    Ok(full_add(BitInput::new(a, b, cin)?))
}

/// Draw random test vectors with a deterministic generator
pub fn random_vectors(count: usize, seed: u64) -> Vec<BitInput> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| BitInput::from_bools(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// Verification driver, shared by all implementations of the full adder
///
/// It holds no state besides the label of the implementation, used in log messages.
#[derive(Debug, Clone, Default)]
pub struct FullAdderOracle {
    name: String,
}

impl FullAdderOracle {
    /// Create an oracle for the implementation with this label
    pub fn new(name: impl Into<String>) -> FullAdderOracle {
        FullAdderOracle { name: name.into() }
    }

    /// Label of the implementation under test
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expected sum and carry-out; fails if a value is not 0 or 1
    pub fn compute_expected(&self, a: u8, b: u8, cin: u8) -> Result<BitOutput> {
        compute_expected(a, b, cin)
    }

    /// Compare observed outputs to the expected ones
    ///
    /// A mismatch is a normal outcome; only invalid inputs are errors.
    pub fn verify(
        &self,
        observed_sum: u8,
        observed_cout: u8,
        a: u8,
        b: u8,
        cin: u8,
    ) -> Result<TestResult> {
        let input = BitInput::new(a, b, cin)?;
        Ok(self.check(input, BitOutput::new(observed_sum, observed_cout)))
    }

    /// Compare an observed output for a validated input
    pub fn check(&self, input: BitInput, observed: BitOutput) -> TestResult {
        let result = TestResult::new(input, full_add(input), observed);
        if result.passed {
            debug!("[{}] {}", self.name, result);
        } else {
            warn!("[{}] {}", self.name, result);
        }
        result
    }

    /// Apply the given vectors to the system under test
    pub fn run_vectors<S, I>(&self, sut: &mut S, vectors: I) -> Summary
    where
        S: AdderUnderTest + ?Sized,
        I: IntoIterator<Item = BitInput>,
    {
        let summary: Summary = vectors
            .into_iter()
            .map(|v| {
                let observed = sut.eval(v);
                self.check(v, observed)
            })
            .collect();
        info!(
            "[{}] {} tests, {} passed, {} failed",
            self.name,
            summary.nb_tests(),
            summary.nb_passed(),
            summary.nb_failed()
        );
        summary
    }

    /// Apply all 8 input combinations, in lexicographic order
    pub fn run_exhaustive<S: AdderUnderTest + ?Sized>(&self, sut: &mut S) -> Summary {
        self.run_vectors(sut, BitInput::all())
    }

    /// Apply random input combinations; the same seed gives the same vectors
    pub fn run_random<S: AdderUnderTest + ?Sized>(
        &self,
        sut: &mut S,
        count: usize,
        seed: u64,
    ) -> Summary {
        self.run_vectors(sut, random_vectors(count, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn behavioral(v: BitInput) -> BitOutput {
        let total = v.a() + v.b() + v.cin();
        BitOutput::new(total & 1, total >> 1)
    }

    #[test]
    fn test_truth_table() {
        let expected = [
            (0, 0, 0, 0, 0),
            (0, 0, 1, 1, 0),
            (0, 1, 0, 1, 0),
            (0, 1, 1, 0, 1),
            (1, 0, 0, 1, 0),
            (1, 0, 1, 0, 1),
            (1, 1, 0, 0, 1),
            (1, 1, 1, 1, 1),
        ];
        for (a, b, cin, sum, cout) in expected {
            assert_eq!(
                compute_expected(a, b, cin).unwrap(),
                BitOutput::new(sum, cout)
            );
        }
    }

    #[test]
    fn test_equations() {
        for v in BitInput::all() {
            let (a, b, cin) = (v.a(), v.b(), v.cin());
            let out = compute_expected(a, b, cin).unwrap();
            assert_eq!(out.sum, a ^ b ^ cin);
            assert_eq!(out.cout, (a & b) | ((a ^ b) & cin));
            assert_eq!(out, behavioral(v));
        }
    }

    #[test]
    fn test_commutative() {
        for v in BitInput::all() {
            assert_eq!(
                compute_expected(v.a(), v.b(), v.cin()).unwrap(),
                compute_expected(v.b(), v.a(), v.cin()).unwrap()
            );
        }
    }

    #[test]
    fn test_invalid_input() {
        let oracle = FullAdderOracle::new("dut");
        assert!(matches!(
            compute_expected(2, 0, 0),
            Err(Error::InvalidInput { name: "a", value: 2 })
        ));
        assert!(matches!(
            oracle.compute_expected(0, 0, 3),
            Err(Error::InvalidInput { name: "cin", .. })
        ));
        assert!(oracle.verify(0, 0, 0, 2, 0).is_err());
    }

    #[test]
    fn test_verify() {
        let oracle = FullAdderOracle::new("dut");
        let pass = oracle.verify(0, 1, 1, 1, 0).unwrap();
        assert!(pass.passed);
        let fail = oracle.verify(0, 0, 1, 1, 0).unwrap();
        assert!(!fail.passed);
        assert!(fail.cout_mismatch());
        assert!(!fail.sum_mismatch());
        // Out of range outputs are recorded, not coerced
        let fail = oracle.verify(2, 0, 0, 0, 1).unwrap();
        assert!(!fail.passed);
        assert_eq!(fail.observed.sum, 2);
    }

    #[test]
    fn test_exhaustive_correct() {
        let oracle = FullAdderOracle::new("behavioral");
        let summary = oracle.run_exhaustive(&mut behavioral);
        assert_eq!(summary.nb_tests(), 8);
        assert_eq!(summary.nb_passed(), 8);
        assert_eq!(summary.nb_failed(), 0);
        assert!(summary.is_success());
    }

    #[test]
    fn test_exhaustive_stuck_at_zero() {
        init_logger();
        let oracle = FullAdderOracle::new("zero");
        let mut dut = |_: BitInput| BitOutput::new(0, 0);
        let summary = oracle.run_exhaustive(&mut dut);
        assert_eq!(summary.nb_tests(), 8);
        assert_eq!(summary.nb_passed(), 1);
        assert_eq!(summary.nb_failed(), 7);
        assert_eq!(summary.nb_sum_mismatches(), 4);
        assert_eq!(summary.nb_cout_mismatches(), 4);
        let failing: Vec<BitInput> = summary.failures().iter().map(|r| r.input).collect();
        assert!(failing.contains(&BitInput::new(1, 1, 0).unwrap()));
        assert!(!failing.contains(&BitInput::new(0, 0, 0).unwrap()));
        // Every vector with an expected sum of 1 fails on the sum bit
        for v in BitInput::all() {
            if full_add(v).sum == 1 {
                let r = summary.failures().iter().find(|r| r.input == v).unwrap();
                assert!(r.sum_mismatch());
            }
        }
    }

    #[test]
    fn test_run_continues_after_failure() {
        init_logger();
        let oracle = FullAdderOracle::new("broken");
        let mut calls = 0;
        let mut dut = |v: BitInput| {
            calls += 1;
            let mut out = behavioral(v);
            out.cout ^= v.a();
            out
        };
        let summary = oracle.run_exhaustive(&mut dut);
        assert_eq!(calls, 8);
        assert_eq!(summary.nb_failed(), 4);
        assert!(summary.into_result("broken").is_err());
    }

    #[test]
    fn test_random_deterministic() {
        assert_eq!(random_vectors(50, 42), random_vectors(50, 42));
        assert_eq!(random_vectors(0, 42), Vec::new());
        assert_ne!(random_vectors(64, 1), random_vectors(64, 2));

        let oracle = FullAdderOracle::new("behavioral");
        let mut seen1 = Vec::new();
        let mut seen2 = Vec::new();
        let s1 = oracle.run_random(
            &mut |v: BitInput| {
                seen1.push(v);
                behavioral(v)
            },
            100,
            DEFAULT_SEED,
        );
        let s2 = oracle.run_random(
            &mut |v: BitInput| {
                seen2.push(v);
                behavioral(v)
            },
            100,
            DEFAULT_SEED,
        );
        assert_eq!(seen1, seen2);
        assert_eq!(s1, s2);
        assert_eq!(s1.nb_passed(), 100);
    }

    #[test]
    fn test_random_covers_all() {
        let vectors = random_vectors(1000, DEFAULT_SEED);
        for v in BitInput::all() {
            assert!(vectors.contains(&v));
        }
    }
}
