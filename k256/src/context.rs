//! Explicit configuration record for secret-key operations.

use crate::{GeneratorTable, ProjectivePoint, Scalar};
use alloc::sync::Arc;

/// Shared state for operations that multiply the generator by a secret.
///
/// Holds a reference-counted [`GeneratorTable`]. Cloning a `Context` shares
/// the table; building a second one with [`Context::new`] computes a fresh
/// table. A `Context` is immutable, so it can be shared freely between
/// threads.
#[derive(Clone, Debug)]
pub struct Context {
    table: Arc<GeneratorTable>,
}

impl Context {
    /// Creates a context with a newly computed generator table.
    pub fn new() -> Self {
        Self::from_table(Arc::new(GeneratorTable::new()))
    }

    /// Creates a context around an existing table.
    pub fn from_table(table: Arc<GeneratorTable>) -> Self {
        Self { table }
    }

    /// The shared generator table.
    pub fn table(&self) -> &Arc<GeneratorTable> {
        &self.table
    }

    /// Constant-time `k·G`.
    pub fn mul_generator(&self, k: &Scalar) -> ProjectivePoint {
        self.table.mul(k)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Context;
    use crate::{ProjectivePoint, Scalar};
    use alloc::sync::Arc;

    #[test]
    fn clones_share_the_table() {
        let ctx = Context::new();
        let copy = ctx.clone();
        assert!(Arc::ptr_eq(ctx.table(), copy.table()));

        let injected = Context::from_table(Arc::clone(ctx.table()));
        assert!(Arc::ptr_eq(ctx.table(), injected.table()));
    }

    #[test]
    fn mul_generator() {
        let ctx = Context::new();
        let k = Scalar::from(3u64);
        assert_eq!(ctx.mul_generator(&k), ProjectivePoint::GENERATOR * k);
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
