//! Shared types for the Klaw console UI
//!
//! These types mirror the Klaw API request and response structures.

use serde::{Deserialize, Serialize};

/// Schema registry environment paired with a Kafka environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssociatedEnv {
    pub id: String,
    pub name: String,
}

/// Kafka environment as returned by the environments endpoint.
///
/// The DTO carries many more fields (cluster, tenant, params); only the ones
/// the console reads are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_env: Option<AssociatedEnv>,
}

impl Environment {
    /// Only environments backed by a schema registry can receive schema requests.
    pub fn accepts_schema_requests(&self) -> bool {
        self.associated_env.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    #[default]
    Avro,
    Json,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Avro => "AVRO",
            SchemaType::Json => "JSON",
        }
    }
}

/// Body of `POST /uploadSchema`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRequestPayload {
    pub environment: String,
    pub remarks: String,
    pub schemafull: String,
    pub topicname: String,
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_register: Option<bool>,
}

/// Generic Klaw response for mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KlawApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KlawApiErrorData {
    pub message: String,
}

/// Rejection body produced by the Klaw API.
///
/// Depending on the failing layer the message sits at the top level or under
/// `data`, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KlawApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<KlawApiErrorData>,
}

pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error.";

impl KlawApiError {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Message suitable for display: top-level first, then `data.message`.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.data.as_ref().map(|d| d.message.as_str()))
            .unwrap_or(UNEXPECTED_ERROR_MESSAGE)
    }
}

impl From<KlawApiResponse> for KlawApiError {
    fn from(response: KlawApiResponse) -> Self {
        Self {
            status: None,
            success: Some(response.success),
            message: Some(response.message),
            data: None,
        }
    }
}

/// Subset of Klaw's `AuthenticationInfo`. Permission flags arrive as
/// `"true"` / `"false"` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationInfo {
    pub username: String,
    pub teamname: String,
    pub userrole: String,
    pub can_switch_teams: String,
    pub can_shutdown_kw: String,
    pub can_update_permissions: String,
    pub add_edit_roles: String,
    pub view_topics: String,
    pub request_items: String,
    pub view_kafka_connect: String,
    pub sync_back_topics: String,
    pub sync_back_acls: String,
    pub update_server_config: String,
    pub add_user: String,
    pub add_teams: String,
    pub sync_topics_acls: String,
    pub sync_connectors: String,
    pub approve_atleast_one_request: String,
    pub approve_decline_topics: String,
    pub approve_decline_subscriptions: String,
    pub approve_decline_schemas: String,
    pub approve_decline_connectors: String,
    pub add_delete_edit_clusters: String,
    pub add_delete_edit_envs: String,
}

/// Runtime configuration served by the console host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    #[serde(default)]
    pub feature_flags: std::collections::BTreeMap<String, bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_omits_force_register_unless_set() {
        let payload = SchemaRequestPayload {
            environment: "1".to_string(),
            remarks: String::new(),
            schemafull: "{}".to_string(),
            topicname: "my-awesome-topic".to_string(),
            schema_type: SchemaType::Avro,
            force_register: None,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "environment": "1",
                "remarks": "",
                "schemafull": "{}",
                "topicname": "my-awesome-topic",
                "schemaType": "AVRO"
            })
        );

        let forced = SchemaRequestPayload {
            schema_type: SchemaType::Json,
            force_register: Some(true),
            ..payload
        };
        let value = serde_json::to_value(&forced).unwrap();
        assert_eq!(value["forceRegister"], json!(true));
        assert_eq!(value["schemaType"], json!("JSON"));
    }

    #[test]
    fn test_environment_ignores_unknown_fields() {
        let env: Environment = serde_json::from_value(json!({
            "id": "1",
            "name": "DEV",
            "clusterName": "dev-cluster",
            "associatedEnv": { "id": "3", "name": "DEV_SCH" }
        }))
        .unwrap();
        assert!(env.accepts_schema_requests());

        let bare: Environment =
            serde_json::from_value(json!({ "id": "3", "name": "SOME" })).unwrap();
        assert!(!bare.accepts_schema_requests());
    }

    #[test]
    fn test_error_message_falls_back_to_data_then_default() {
        let top = KlawApiError::with_message("Oh no");
        assert_eq!(top.message(), "Oh no");

        let nested: KlawApiError = serde_json::from_value(json!({
            "status": "400 BAD_REQUEST",
            "data": { "message": "Error in request" }
        }))
        .unwrap();
        assert_eq!(nested.message(), "Error in request");

        assert_eq!(KlawApiError::default().message(), UNEXPECTED_ERROR_MESSAGE);
    }
}
