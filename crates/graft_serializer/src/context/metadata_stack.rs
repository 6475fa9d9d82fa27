use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::slice::Iter;

use crate::metadata::ClassMetadata;

/// The class metadata entered so far, outermost first.
///
/// The `Debug` form renders the chain, one class per line:
///
/// ```text
/// `Order`
///  -> `Customer`
///  -> `Address`
/// ```
#[derive(Default, Clone)]
pub struct MetadataStack {
    stack: Vec<Arc<ClassMetadata>>,
}

impl MetadataStack {
    /// Create a new empty [`MetadataStack`].
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub(crate) fn push(&mut self, metadata: Arc<ClassMetadata>) {
        self.stack.push(metadata);
    }

    pub(crate) fn pop(&mut self) -> Option<Arc<ClassMetadata>> {
        self.stack.pop()
    }

    /// The innermost class.
    #[inline]
    pub fn last(&self) -> Option<&Arc<ClassMetadata>> {
        self.stack.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Get an iterator over the stack in the order they were pushed.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Arc<ClassMetadata>> {
        self.stack.iter()
    }
}

impl Debug for MetadataStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.iter();

        if let Some(first) = iter.next() {
            writeln!(f, "`{}`", first.name())?;
        }

        for metadata in iter {
            writeln!(f, " -> `{}`", metadata.name())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::MetadataStack;
    use crate::metadata::ClassMetadata;

    #[test]
    fn debug_chain() {
        let mut stack = MetadataStack::new();
        stack.push(Arc::new(ClassMetadata::new("Order")));
        stack.push(Arc::new(ClassMetadata::new("Customer")));
        assert_eq!(alloc::format!("{stack:?}"), "`Order`\n -> `Customer`\n");

        stack.pop();
        assert_eq!(stack.last().unwrap().name(), "Order");
    }
}
