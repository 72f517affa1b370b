//! Concurrency configuration for the scheduler.

use std::num::NonZeroUsize;

use super::types::SchedulerError;

/// Job count used when the operator does not specify one.
pub const DEFAULT_JOBS: i64 = 4;

/// Maximum number of work units deployed at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concurrency(NonZeroUsize);

impl Concurrency {
    /// Validates an operator-supplied job count.
    pub fn new(jobs: i64) -> Result<Self, SchedulerError> {
        usize::try_from(jobs)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(SchedulerError::InvalidConcurrency { jobs })
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_JOBS as usize).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<i64> for Concurrency {
    type Error = SchedulerError;

    fn try_from(jobs: i64) -> Result<Self, Self::Error> {
        Self::new(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_four() {
        assert_eq!(Concurrency::default().get(), 4);
    }

    #[test]
    fn test_positive_accepted() {
        assert_eq!(Concurrency::new(1).unwrap().get(), 1);
        assert_eq!(Concurrency::try_from(16).unwrap().get(), 16);
    }

    #[test]
    fn test_non_positive_rejected() {
        for jobs in [0, -1, i64::MIN] {
            let err = Concurrency::new(jobs).unwrap_err();
            assert!(matches!(err, SchedulerError::InvalidConcurrency { jobs: j } if j == jobs));
        }
    }

    #[test]
    fn test_error_message() {
        let err = Concurrency::new(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--jobs (-j) argument has invalid value. It must be greater than 0"
        );
    }
}
