//! Capabilities every identifier generator provides

use crate::error::IdError;

/// Construction of a generator from its typed configuration.
///
/// Initialization validates the configuration and fails with
/// [`IdError::Configuration`] when it is out of range. A generator is
/// ready to use as soon as `initialize` returns.
pub trait Initialize: Sized {
    type Config;

    fn initialize(config: Self::Config) -> Result<Self, IdError>;
}

/// On-demand issuance of 64-bit identifiers.
///
/// Implementations are internally synchronized: any number of threads may
/// call [`IdGenerator::next_id`] on a shared instance without extra locking.
/// Every returned value is unique for the lifetime of the instance, and
/// values never decrease across calls ordered in real time.
pub trait IdGenerator: Send + Sync {
    /// Issue the next identifier, or fail with exactly one error kind.
    fn next_id(&self) -> Result<i64, IdError>;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    #[inline]
    fn next_id(&self) -> Result<i64, IdError> {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
    #[inline]
    fn next_id(&self) -> Result<i64, IdError> {
        (**self).next_id()
    }
}
