use tracing::debug;

use super::ConfigScope;
use crate::error::ConfigurationError;
use crate::events::{EventType, InclusionFilter};

pub const CONNECTION_FACTORY_NAME: &str = "connection-factory-name";
pub const EVENT_DESTINATION_NAME: &str = "event-destination-name";
pub const ADMIN_EVENT_DESTINATION_NAME: &str = "admin-event-destination-name";
pub const INCLUDE_EVENTS: &str = "include-events";
pub const EXCLUDE_EVENTS: &str = "exclude-events";

/// Registry name of the broker's connection factory when none is configured.
pub const DEFAULT_CONNECTION_FACTORY: &str = "ConnectionFactory";
/// Registry name of the domain event destination when none is configured.
pub const DEFAULT_EVENT_DESTINATION: &str = "queue/IdentityEvents";

/// Everything a publisher needs to know, resolved from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublisherSettings {
    pub connection_factory_name: String,
    /// `None` disables domain event publication.
    pub event_destination_name: Option<String>,
    /// `None` disables admin event publication.
    pub admin_event_destination_name: Option<String>,
    pub included_events: InclusionFilter,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            connection_factory_name: DEFAULT_CONNECTION_FACTORY.to_string(),
            event_destination_name: Some(DEFAULT_EVENT_DESTINATION.to_string()),
            admin_event_destination_name: None,
            included_events: InclusionFilter::default(),
        }
    }
}

impl PublisherSettings {
    /// Read settings from a configuration scope.
    ///
    /// A blank destination name disables that kind of publication. Unknown
    /// event type names and unreadable options fail the whole read.
    pub fn from_scope(scope: &dyn ConfigScope) -> Result<Self, ConfigurationError> {
        let connection_factory_name = scope
            .get(CONNECTION_FACTORY_NAME)?
            .unwrap_or_else(|| DEFAULT_CONNECTION_FACTORY.to_string());

        let event_destination_name = match scope.get(EVENT_DESTINATION_NAME)? {
            None => Some(DEFAULT_EVENT_DESTINATION.to_string()),
            Some(name) => non_blank(name),
        };

        let admin_event_destination_name = scope
            .get(ADMIN_EVENT_DESTINATION_NAME)?
            .and_then(non_blank);

        let include = parse_event_types(scope, INCLUDE_EVENTS)?;
        let exclude = parse_event_types(scope, EXCLUDE_EVENTS)?;
        let included_events = InclusionFilter::compute(include.as_deref(), exclude.as_deref());

        let included: Vec<&str> = included_events.iter().map(EventType::name).collect();
        debug!(
            connection_factory = %connection_factory_name,
            event_destination = ?event_destination_name,
            admin_event_destination = ?admin_event_destination_name,
            included_events = ?included,
            "resolved event publisher settings"
        );

        Ok(Self {
            connection_factory_name,
            event_destination_name,
            admin_event_destination_name,
            included_events,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_event_types(
    scope: &dyn ConfigScope,
    option: &str,
) -> Result<Option<Vec<EventType>>, ConfigurationError> {
    let Some(names) = scope.get_array(option)? else {
        return Ok(None);
    };

    names
        .iter()
        .map(|name| {
            EventType::parse(name).ok_or_else(|| ConfigurationError::UnknownEventType {
                option: option.to_string(),
                name: name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
