use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use graft_utils::hash::HashSet;

use super::{ContextOptions, Direction, MetadataStack};
use crate::error::Result;
use crate::exclusion::ExclusionStrategy;
use crate::metadata::{ClassMetadata, MetadataFactory, PropertyMetadata};
use crate::navigator::GraphNavigator;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::visitor::Visitor;

/// What [`Context::enter_scope`] recorded for a node, released by
/// [`Context::leave_scope`].
#[derive(Debug)]
#[must_use]
pub(crate) struct Scope {
    object: Option<usize>,
}

// -----------------------------------------------------------------------------
// Context

/// The mutable state of one top-level serialize or deserialize call.
///
/// Only the navigator mutates traversal state; visitors, handlers and
/// listeners read it and recurse through [`Context::accept`].
pub struct Context<'a> {
    direction: Direction,
    format: String,
    navigator: &'a GraphNavigator,
    options: ContextOptions,
    visiting: HashSet<usize>,
    metadata_stack: MetadataStack,
    property_stack: Vec<Arc<PropertyMetadata>>,
    depth: usize,
}

impl<'a> Context<'a> {
    pub fn new(
        navigator: &'a GraphNavigator,
        direction: Direction,
        format: impl Into<String>,
        options: ContextOptions,
    ) -> Self {
        Self {
            direction,
            format: format.into(),
            navigator,
            options,
            visiting: HashSet::default(),
            metadata_stack: MetadataStack::new(),
            property_stack: Vec::new(),
            depth: 0,
        }
    }

    /// Visits `data` as a nested node.
    ///
    /// This is the recursion entry for visitors and handlers. `ty` may be
    /// `None` only when serializing, in which case the type is inferred.
    #[inline]
    pub fn accept(
        &mut self,
        visitor: &mut dyn Visitor,
        data: &Value,
        ty: Option<&TypeDescriptor>,
    ) -> Result<Value> {
        let navigator = self.navigator;
        navigator.accept(visitor, data, ty, self)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn format(&self) -> &str {
        &self.format
    }

    #[inline]
    pub fn navigator(&self) -> &'a GraphNavigator {
        self.navigator
    }

    #[inline]
    pub fn metadata_factory(&self) -> &'a dyn MetadataFactory {
        self.navigator.metadata_factory()
    }

    /// Nesting depth of the node being visited; the root is `1`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn should_serialize_null(&self) -> bool {
        self.options.should_serialize_null()
    }

    #[inline]
    pub fn exclusion_strategy(&self) -> Option<&dyn ExclusionStrategy> {
        self.options.exclusion_strategy()
    }

    #[inline]
    pub fn metadata_stack(&self) -> &MetadataStack {
        &self.metadata_stack
    }

    /// The innermost class being visited.
    #[inline]
    pub fn current_class(&self) -> Option<&Arc<ClassMetadata>> {
        self.metadata_stack.last()
    }

    /// The innermost property being visited.
    #[inline]
    pub fn current_property(&self) -> Option<&Arc<PropertyMetadata>> {
        self.property_stack.last()
    }

    /// The property path from the root, such as `owner.address.street`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for (index, property) in self.property_stack.iter().enumerate() {
            if index > 0 {
                path.push('.');
            }
            path.push_str(property.name());
        }
        path
    }

    // -------------------------------------------------------------------------
    // Traversal state, navigator only

    /// Enters a node. Returns `None` when serializing an object that is
    /// already being visited higher up the graph.
    pub(crate) fn enter_scope(&mut self, data: &Value) -> Option<Scope> {
        let object = match (self.direction, data) {
            (Direction::Serialization, Value::Object(object)) => {
                let id = object.id();
                if !self.visiting.insert(id) {
                    log::debug!(
                        "cycle detected at `{}`, visiting `{}` as null",
                        self.path(),
                        object.class_name(),
                    );
                    return None;
                }
                Some(id)
            }
            _ => None,
        };

        self.depth += 1;
        log::trace!("enter scope, depth {}", self.depth);
        Some(Scope { object })
    }

    pub(crate) fn leave_scope(&mut self, scope: Scope) {
        if let Some(id) = scope.object {
            self.visiting.remove(&id);
        }
        self.depth -= 1;
        log::trace!("leave scope, depth {}", self.depth);
    }

    #[inline]
    pub(crate) fn push_class_metadata(&mut self, metadata: Arc<ClassMetadata>) {
        self.metadata_stack.push(metadata);
    }

    #[inline]
    pub(crate) fn pop_class_metadata(&mut self) {
        self.metadata_stack.pop();
    }

    #[inline]
    pub(crate) fn push_property_metadata(&mut self, property: Arc<PropertyMetadata>) {
        self.property_stack.push(property);
    }

    #[inline]
    pub(crate) fn pop_property_metadata(&mut self) {
        self.property_stack.pop();
    }

    /// Returns `true` if the object is on the current visiting path.
    #[inline]
    pub fn is_visiting(&self, data: &Value) -> bool {
        data.as_object()
            .is_some_and(|object| self.visiting.contains(&object.id()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use crate::context::{Context, ContextOptions, Direction};
    use crate::metadata::{MetadataRegistry, PropertyMetadata};
    use crate::navigator::GraphNavigator;
    use crate::value::{ObjectRef, Value};

    fn navigator() -> GraphNavigator {
        GraphNavigator::new(Arc::new(MetadataRegistry::new()))
    }

    #[test]
    fn serialization_scope_guards_cycles() {
        let navigator = navigator();
        let mut context = Context::new(&navigator, Direction::Serialization, "json", ContextOptions::new());
        let node = Value::Object(ObjectRef::new("Node"));

        let outer = context.enter_scope(&node).unwrap();
        assert!(context.is_visiting(&node));
        assert!(context.enter_scope(&node).is_none());
        assert_eq!(context.depth(), 1);

        context.leave_scope(outer);
        assert!(!context.is_visiting(&node));
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn deserialization_scope_only_counts_depth() {
        let navigator = navigator();
        let mut context = Context::new(&navigator, Direction::Deserialization, "json", ContextOptions::new());
        let node = Value::Object(ObjectRef::new("Node"));

        let a = context.enter_scope(&node).unwrap();
        let b = context.enter_scope(&node).unwrap();
        assert_eq!(context.depth(), 2);
        assert!(!context.is_visiting(&node));
        context.leave_scope(b);
        context.leave_scope(a);
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn property_path() {
        let navigator = navigator();
        let mut context = Context::new(&navigator, Direction::Serialization, "json", ContextOptions::new());
        assert_eq!(context.path(), "");

        context.push_property_metadata(Arc::new(PropertyMetadata::new("owner")));
        context.push_property_metadata(Arc::new(PropertyMetadata::new("address")));
        assert_eq!(context.path(), "owner.address");
        assert_eq!(context.current_property().unwrap().name(), "address");

        context.pop_property_metadata();
        assert_eq!(context.path(), "owner");
    }
}
