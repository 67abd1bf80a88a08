use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::domain_event::now_millis;

/// What an administrator did to a resource.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum OperationType {
    Create,
    Update,
    Delete,
    Action,
}

impl OperationType {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Who performed an administrative action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDetails {
    pub realm_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// An administrative action in the identity system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEvent {
    /// Milliseconds since the Unix epoch.
    pub time: u64,
    pub realm_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_details: Option<AuthDetails>,
    pub operation_type: OperationType,
    /// Path of the affected resource, e.g. `users/1234`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    /// JSON representation of the resource, when the producer chose to include one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminEvent {
    pub fn new(realm_id: impl Into<String>, operation_type: OperationType) -> Self {
        Self {
            time: now_millis(),
            realm_id: realm_id.into(),
            auth_details: None,
            operation_type,
            resource_path: None,
            representation: None,
            error: None,
        }
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    pub fn with_auth_details(mut self, auth_details: AuthDetails) -> Self {
        self.auth_details = Some(auth_details);
        self
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = Some(path.into());
        self
    }

    pub fn with_representation(mut self, representation: impl Into<String>) -> Self {
        self.representation = Some(representation.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
