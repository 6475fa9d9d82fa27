//! Skip policies for classes and properties.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::context::Context;
use crate::metadata::{ClassMetadata, PropertyMetadata};

// -----------------------------------------------------------------------------
// ExclusionStrategy

/// Decides which classes and properties a call leaves out.
///
/// A skipped class makes its node visit to `null`; a skipped property is
/// never handed to the visitor.
pub trait ExclusionStrategy: Send + Sync {
    fn should_skip_class(&self, metadata: &ClassMetadata, context: &Context<'_>) -> bool;

    fn should_skip_property(&self, property: &PropertyMetadata, context: &Context<'_>) -> bool;
}

// -----------------------------------------------------------------------------
// DisjunctExclusionStrategy

/// Skips whatever any of its delegates skips, asking them in order.
#[derive(Default)]
pub struct DisjunctExclusionStrategy {
    delegates: Vec<Arc<dyn ExclusionStrategy>>,
}

impl DisjunctExclusionStrategy {
    #[inline]
    pub fn new(delegates: Vec<Arc<dyn ExclusionStrategy>>) -> Self {
        Self { delegates }
    }

    #[inline]
    pub fn add_strategy(&mut self, strategy: Arc<dyn ExclusionStrategy>) {
        self.delegates.push(strategy);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }
}

impl ExclusionStrategy for DisjunctExclusionStrategy {
    fn should_skip_class(&self, metadata: &ClassMetadata, context: &Context<'_>) -> bool {
        self.delegates
            .iter()
            .any(|delegate| delegate.should_skip_class(metadata, context))
    }

    fn should_skip_property(&self, property: &PropertyMetadata, context: &Context<'_>) -> bool {
        self.delegates
            .iter()
            .any(|delegate| delegate.should_skip_property(property, context))
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::{DisjunctExclusionStrategy, ExclusionStrategy};
    use crate::context::{Context, ContextOptions, Direction};
    use crate::metadata::{ClassMetadata, MetadataRegistry, PropertyMetadata};
    use crate::navigator::GraphNavigator;

    struct SkipNamed(&'static str);

    impl ExclusionStrategy for SkipNamed {
        fn should_skip_class(&self, metadata: &ClassMetadata, _: &Context<'_>) -> bool {
            metadata.name() == self.0
        }

        fn should_skip_property(&self, property: &PropertyMetadata, _: &Context<'_>) -> bool {
            property.name() == self.0
        }
    }

    #[test]
    fn any_delegate_skips() {
        let strategy = DisjunctExclusionStrategy::new(alloc::vec![
            Arc::new(SkipNamed("password")) as Arc<dyn ExclusionStrategy>,
            Arc::new(SkipNamed("Secret")),
        ]);

        let navigator = GraphNavigator::new(Arc::new(MetadataRegistry::new()));
        let context = Context::new(&navigator, Direction::Serialization, "json", ContextOptions::new());

        assert!(strategy.should_skip_property(&PropertyMetadata::new("password"), &context));
        assert!(!strategy.should_skip_property(&PropertyMetadata::new("email"), &context));
        assert!(strategy.should_skip_class(&ClassMetadata::new("Secret"), &context));
        assert!(!strategy.should_skip_class(&ClassMetadata::new("User"), &context));
    }
}
