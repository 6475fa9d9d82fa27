use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{ObjectEvent, Phase};
use crate::context::Direction;
use crate::error::Result;

/// An event listener. Returning an error aborts the whole call.
pub type Listener = Arc<dyn Fn(&mut ObjectEvent<'_, '_>) -> Result<()> + Send + Sync>;

struct ListenerEntry {
    class: Option<String>,
    format: Option<String>,
    listener: Listener,
}

impl ListenerEntry {
    #[inline]
    fn matches(&self, class: &str, format: &str) -> bool {
        self.class.as_deref().is_none_or(|c| c == class)
            && self.format.as_deref().is_none_or(|f| f == format)
    }
}

// -----------------------------------------------------------------------------
// EventDispatcher

/// Ordered listener lists, one per phase and direction.
///
/// # Examples
///
/// ```
/// use graft_serializer::context::Direction;
/// use graft_serializer::event::{EventDispatcher, Phase};
///
/// let mut dispatcher = EventDispatcher::new();
/// dispatcher.add_listener(Phase::Pre, Some(Direction::Serialization), Some("Money"), None, |_event| Ok(()));
///
/// assert!(dispatcher.has_listeners(Phase::Pre, "Money", Direction::Serialization, "json"));
/// assert!(!dispatcher.has_listeners(Phase::Pre, "User", Direction::Serialization, "json"));
/// assert!(!dispatcher.has_listeners(Phase::Post, "Money", Direction::Serialization, "json"));
/// ```
#[derive(Default)]
pub struct EventDispatcher {
    lists: [Vec<ListenerEntry>; 4],
}

#[inline]
const fn slot(phase: Phase, direction: Direction) -> usize {
    match (phase, direction) {
        (Phase::Pre, Direction::Serialization) => 0,
        (Phase::Post, Direction::Serialization) => 1,
        (Phase::Pre, Direction::Deserialization) => 2,
        (Phase::Post, Direction::Deserialization) => 3,
    }
}

impl EventDispatcher {
    #[inline]
    pub const fn new() -> Self {
        Self {
            lists: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Appends a listener.
    ///
    /// `None` for `direction` registers it for both directions; `None` for
    /// `class` or `format` matches any.
    pub fn add_listener(
        &mut self,
        phase: Phase,
        direction: Option<Direction>,
        class: Option<&str>,
        format: Option<&str>,
        listener: impl Fn(&mut ObjectEvent<'_, '_>) -> Result<()> + Send + Sync + 'static,
    ) -> &mut Self {
        let listener: Listener = Arc::new(listener);
        let directions: &[Direction] = match direction {
            Some(Direction::Serialization) => &[Direction::Serialization],
            Some(Direction::Deserialization) => &[Direction::Deserialization],
            None => &[Direction::Serialization, Direction::Deserialization],
        };
        for &direction in directions {
            self.lists[slot(phase, direction)].push(ListenerEntry {
                class: class.map(String::from),
                format: format.map(String::from),
                listener: Arc::clone(&listener),
            });
        }
        self
    }

    /// Returns `true` if any listener matches.
    pub fn has_listeners(
        &self,
        phase: Phase,
        class: &str,
        direction: Direction,
        format: &str,
    ) -> bool {
        self.lists[slot(phase, direction)]
            .iter()
            .any(|entry| entry.matches(class, format))
    }

    /// Runs matching listeners in registration order until one stops
    /// propagation or fails.
    pub fn dispatch(
        &self,
        phase: Phase,
        class: &str,
        direction: Direction,
        format: &str,
        event: &mut ObjectEvent<'_, '_>,
    ) -> Result<()> {
        for entry in &self.lists[slot(phase, direction)] {
            if !entry.matches(class, format) {
                continue;
            }
            (entry.listener)(event)?;
            if event.is_propagation_stopped() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::EventDispatcher;
    use crate::context::{Context, ContextOptions, Direction};
    use crate::event::{ObjectEvent, Phase};
    use crate::metadata::MetadataRegistry;
    use crate::navigator::GraphNavigator;
    use crate::types::TypeDescriptor;
    use crate::value::Value;

    #[test]
    fn wildcard_direction_and_format_filter() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_listener(Phase::Post, None, None, Some("xml"), |_| Ok(()));

        assert!(dispatcher.has_listeners(Phase::Post, "Any", Direction::Serialization, "xml"));
        assert!(dispatcher.has_listeners(Phase::Post, "Any", Direction::Deserialization, "xml"));
        assert!(!dispatcher.has_listeners(Phase::Post, "Any", Direction::Deserialization, "json"));
    }

    #[test]
    fn stop_propagation_skips_later_listeners() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::new();
        for stop in [false, true, false] {
            let calls = Arc::clone(&calls);
            dispatcher.add_listener(Phase::Pre, None, None, None, move |event| {
                calls.fetch_add(1, Ordering::Relaxed);
                if stop {
                    event.stop_propagation();
                }
                Ok(())
            });
        }

        let navigator = GraphNavigator::new(Arc::new(MetadataRegistry::new()));
        let context = Context::new(&navigator, Direction::Serialization, "json", ContextOptions::new());
        let mut event = ObjectEvent::new(&context, Value::Null, TypeDescriptor::new("Money"));
        dispatcher
            .dispatch(Phase::Pre, "Money", Direction::Serialization, "json", &mut event)
            .unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
