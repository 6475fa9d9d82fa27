use alloc::sync::Arc;

use crate::exclusion::{DisjunctExclusionStrategy, ExclusionStrategy};

/// Per-call settings handed to a [`Context`](super::Context).
///
/// # Examples
///
/// ```
/// use graft_serializer::context::ContextOptions;
///
/// let options = ContextOptions::new().with_serialize_null(true);
/// assert!(options.should_serialize_null());
/// assert!(options.exclusion_strategy().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ContextOptions {
    serialize_null: bool,
    exclusion: Option<Arc<dyn ExclusionStrategy>>,
}

impl ContextOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            serialize_null: false,
            exclusion: None,
        }
    }

    /// Write `null` property values instead of omitting them.
    #[inline]
    pub fn with_serialize_null(mut self, serialize_null: bool) -> Self {
        self.serialize_null = serialize_null;
        self
    }

    /// Adds an exclusion strategy.
    ///
    /// Several strategies combine into a [`DisjunctExclusionStrategy`]: an
    /// element is skipped if any of them skips it.
    pub fn with_exclusion_strategy(mut self, strategy: impl ExclusionStrategy + 'static) -> Self {
        let strategy: Arc<dyn ExclusionStrategy> = Arc::new(strategy);
        self.exclusion = Some(match self.exclusion.take() {
            None => strategy,
            Some(existing) => Arc::new(DisjunctExclusionStrategy::new(alloc::vec![existing, strategy])),
        });
        self
    }

    #[inline]
    pub fn should_serialize_null(&self) -> bool {
        self.serialize_null
    }

    #[inline]
    pub fn exclusion_strategy(&self) -> Option<&dyn ExclusionStrategy> {
        self.exclusion.as_deref()
    }
}
