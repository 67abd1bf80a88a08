use std::collections::BTreeSet;

use super::EventType;

/// Event types forwarded when configuration names no inclusions.
pub const DEFAULT_INCLUDED_EVENTS: &[EventType] = &[EventType::UpdateProfile];

/// The set of domain event types eligible for forwarding.
///
/// Computed once as `(base ∪ included) \ excluded`, where `base` is
/// [`DEFAULT_INCLUDED_EVENTS`] when no include list is given and empty
/// otherwise. Read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionFilter {
    events: BTreeSet<EventType>,
}

impl Default for InclusionFilter {
    fn default() -> Self {
        Self::compute(None, None)
    }
}

impl InclusionFilter {
    /// Compute the filter from optional include and exclude lists.
    ///
    /// An include list that is `None` or empty starts from the default set.
    pub fn compute(include: Option<&[EventType]>, exclude: Option<&[EventType]>) -> Self {
        let mut events: BTreeSet<EventType> = match include {
            Some(include) if !include.is_empty() => include.iter().copied().collect(),
            _ => DEFAULT_INCLUDED_EVENTS.iter().copied().collect(),
        };

        for event_type in exclude.unwrap_or_default() {
            events.remove(event_type);
        }

        Self { events }
    }

    /// A filter containing exactly the given types.
    pub fn only(events: impl IntoIterator<Item = EventType>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn contains(&self, event_type: EventType) -> bool {
        self.events.contains(&event_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = EventType> + '_ {
        self.events.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
