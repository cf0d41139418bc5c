use std::fmt;

use crate::error::{Error, Result};
use crate::oracle::{BitInput, BitOutput};

/// Outcome of a single test vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Input triple that was applied
    pub input: BitInput,
    /// Output computed by the reference model
    pub expected: BitOutput,
    /// Output reported by the system under test
    pub observed: BitOutput,
    /// Whether the observed output matches the expected one
    pub passed: bool,
}

impl TestResult {
    /// Compare an observed output to the expected one
    pub fn new(input: BitInput, expected: BitOutput, observed: BitOutput) -> TestResult {
        TestResult {
            input,
            expected,
            observed,
            passed: expected == observed,
        }
    }

    /// Returns whether the sum bit differs from the expected value
    pub fn sum_mismatch(&self) -> bool {
        self.expected.sum != self.observed.sum
    }

    /// Returns whether the carry-out bit differs from the expected value
    pub fn cout_mismatch(&self) -> bool {
        self.expected.cout != self.observed.cout
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "PASS {}: {}", self.input, self.observed)
        } else {
            write!(
                f,
                "FAIL {}: sum={} (expected {}), cout={} (expected {})",
                self.input,
                self.observed.sum,
                self.expected.sum,
                self.observed.cout,
                self.expected.cout
            )
        }
    }
}

/// Tally of a verification run
///
/// Summaries are plain values: a run builds one, and partial runs combine with [`Summary::merge`].
/// Merging adds the counts and concatenates the failing vectors, so it is associative and,
/// up to the order of the failure list, commutative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    nb_tests: usize,
    nb_passed: usize,
    failures: Vec<TestResult>,
}

impl Summary {
    /// Create an empty summary
    pub fn new() -> Summary {
        Summary::default()
    }

    /// Record the outcome of a test vector
    pub fn record(&mut self, result: TestResult) {
        self.nb_tests += 1;
        if result.passed {
            self.nb_passed += 1;
        } else {
            self.failures.push(result);
        }
    }

    /// Combine two summaries
    pub fn merge(mut self, other: Summary) -> Summary {
        self.nb_tests += other.nb_tests;
        self.nb_passed += other.nb_passed;
        self.failures.extend(other.failures);
        self
    }

    /// Number of vectors run
    pub fn nb_tests(&self) -> usize {
        self.nb_tests
    }

    /// Number of passing vectors
    pub fn nb_passed(&self) -> usize {
        self.nb_passed
    }

    /// Number of failing vectors
    pub fn nb_failed(&self) -> usize {
        self.failures.len()
    }

    /// Failing vectors, in the order they were run
    pub fn failures(&self) -> &[TestResult] {
        &self.failures
    }

    /// Number of failing vectors with a wrong sum bit
    pub fn nb_sum_mismatches(&self) -> usize {
        self.failures.iter().filter(|r| r.sum_mismatch()).count()
    }

    /// Number of failing vectors with a wrong carry-out bit
    pub fn nb_cout_mismatches(&self) -> usize {
        self.failures.iter().filter(|r| r.cout_mismatch()).count()
    }

    /// Returns whether no vector failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Percentage of passing vectors; None if nothing was run
    pub fn success_rate(&self) -> Option<f64> {
        if self.nb_tests == 0 {
            None
        } else {
            Some(100.0 * self.nb_passed as f64 / self.nb_tests as f64)
        }
    }

    /// Turn a failed run into an error
    pub fn into_result(self, name: &str) -> Result<Summary> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Mismatch {
                name: name.to_string(),
                nb_failed: self.nb_failed(),
                nb_tests: self.nb_tests,
            })
        }
    }
}

impl Extend<TestResult> for Summary {
    fn extend<T: IntoIterator<Item = TestResult>>(&mut self, iter: T) {
        for r in iter {
            self.record(r);
        }
    }
}

impl FromIterator<TestResult> for Summary {
    fn from_iter<T: IntoIterator<Item = TestResult>>(iter: T) -> Summary {
        let mut ret = Summary::new();
        ret.extend(iter);
        ret
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tests: {}", self.nb_tests)?;
        writeln!(f, "Passed: {}", self.nb_passed)?;
        writeln!(f, "Failed: {}", self.nb_failed())?;
        match self.success_rate() {
            Some(rate) => writeln!(f, "Success rate: {:.1}%", rate)?,
            None => writeln!(f, "Success rate: n/a")?,
        }
        for r in &self.failures {
            writeln!(f, "  {}", r)?;
        }
        fmt::Result::Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(a: u8, b: u8, cin: u8, expected: (u8, u8), observed: (u8, u8)) -> TestResult {
        TestResult::new(
            BitInput::new(a, b, cin).unwrap(),
            expected.into(),
            observed.into(),
        )
    }

    #[test]
    fn test_record() {
        let mut s = Summary::new();
        assert_eq!(s.success_rate(), None);
        s.record(result(0, 0, 0, (0, 0), (0, 0)));
        s.record(result(1, 1, 0, (0, 1), (0, 0)));
        assert_eq!(s.nb_tests(), 2);
        assert_eq!(s.nb_passed(), 1);
        assert_eq!(s.nb_failed(), 1);
        assert_eq!(s.nb_sum_mismatches(), 0);
        assert_eq!(s.nb_cout_mismatches(), 1);
        assert_eq!(s.success_rate(), Some(50.0));
        assert!(!s.is_success());
        assert!(matches!(
            s.into_result("dut"),
            Err(Error::Mismatch {
                nb_failed: 1,
                nb_tests: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_merge() {
        let s1: Summary = vec![result(0, 0, 1, (1, 0), (0, 0))].into_iter().collect();
        let s2: Summary = vec![result(0, 1, 1, (0, 1), (0, 1))].into_iter().collect();
        let s3: Summary = vec![result(1, 0, 0, (1, 0), (1, 1))].into_iter().collect();

        let left = s1.clone().merge(s2.clone()).merge(s3.clone());
        let right = s1.clone().merge(s2.clone().merge(s3.clone()));
        assert_eq!(left, right);

        let swapped = s3.merge(s2).merge(s1);
        assert_eq!(swapped.nb_tests(), left.nb_tests());
        assert_eq!(swapped.nb_passed(), left.nb_passed());
        assert_eq!(swapped.nb_failed(), left.nb_failed());
        assert_eq!(left.nb_failed(), 2);
    }

    #[test]
    fn test_display() {
        let r = result(1, 1, 0, (0, 1), (0, 0));
        assert_eq!(
            r.to_string(),
            "FAIL a=1, b=1, cin=0: sum=0 (expected 0), cout=0 (expected 1)"
        );
        let r = result(0, 0, 0, (0, 0), (0, 0));
        assert_eq!(r.to_string(), "PASS a=0, b=0, cin=0: sum=0, cout=0");
        let s: Summary = vec![r].into_iter().collect();
        assert!(s.to_string().contains("Success rate: 100.0%"));
        assert!(s.into_result("dut").is_ok());
    }
}
