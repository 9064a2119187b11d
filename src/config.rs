//! Construction options for `HashTable`.

use crate::error::ConfigError;
use core::num::NonZeroUsize;

/// Number of buckets a table gets when none is specified.
pub const DEFAULT_BUCKET_COUNT: usize = 8;

/// Validated table configuration.
///
/// The bucket count is fixed for the lifetime of a table built from this
/// configuration; there is no resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    bucket_count: NonZeroUsize,
}

impl TableConfig {
    pub fn new(bucket_count: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(bucket_count)
            .map(Self::from_nonzero)
            .ok_or(ConfigError::ZeroBuckets)
    }

    pub const fn from_nonzero(bucket_count: NonZeroUsize) -> Self {
        Self { bucket_count }
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::from_nonzero(match NonZeroUsize::new(DEFAULT_BUCKET_COUNT) {
            Some(n) => n,
            None => unreachable!(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_eight_buckets() {
        assert_eq!(TableConfig::default().bucket_count(), 8);
    }

    #[test]
    fn zero_buckets_rejected() {
        assert_eq!(TableConfig::new(0), Err(ConfigError::ZeroBuckets));
    }

    #[test]
    fn nonzero_accepted() {
        let cfg = TableConfig::new(1).unwrap();
        assert_eq!(cfg.bucket_count(), 1);
        let cfg = TableConfig::new(1024).unwrap();
        assert_eq!(cfg.bucket_count(), 1024);
    }
}
