//! API client for the Klaw backend and the console host

use crate::types::*;
use gloo_net::http::{Request, Response};

const API_BASE: &str = "/api";
const CONSOLE_CONFIG_URL: &str = "/console/config";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("{}", .0.message())]
    Rejected(KlawApiError),
}

impl ApiError {
    /// Structured rejection as sent by the server, or a synthesized one for
    /// transport and decode failures.
    pub fn rejection(&self) -> KlawApiError {
        match self {
            ApiError::Rejected(error) => error.clone(),
            other => KlawApiError::with_message(other.to_string()),
        }
    }
}

// ============================================================================
// Topics and environments
// ============================================================================

pub async fn get_topic_names() -> Result<Vec<String>, ApiError> {
    let url = format!("{}/getTopicsOnly?isMyTeamTopics=false", API_BASE);
    fetch_json::<Vec<String>>(&url).await
}

/// Environments the current team may request schemas or ACLs for.
pub async fn get_all_environments_for_topic_and_acl() -> Result<Vec<Environment>, ApiError> {
    let url = format!("{}/getEnvsBaseCluster", API_BASE);
    fetch_json::<Vec<Environment>>(&url).await
}

// ============================================================================
// Schema requests
// ============================================================================

/// Create a schema request. The body is returned as sent, `success: false`
/// included.
pub async fn request_schema_creation(
    payload: &SchemaRequestPayload,
) -> Result<KlawApiResponse, ApiError> {
    let url = format!("{}/uploadSchema", API_BASE);
    post_json::<SchemaRequestPayload, KlawApiResponse>(&url, payload).await
}

// ============================================================================
// Session and console configuration
// ============================================================================

pub async fn get_auth() -> Result<AuthenticationInfo, ApiError> {
    let url = format!("{}/getAuth", API_BASE);
    fetch_json::<AuthenticationInfo>(&url).await
}

pub async fn get_console_config() -> Result<ConsoleConfig, ApiError> {
    fetch_json::<ConsoleConfig>(CONSOLE_CONFIG_URL).await
}

// ============================================================================
// Helper functions
// ============================================================================

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    decode_response(response).await
}

async fn post_json<T: serde::Serialize, R: serde::de::DeserializeOwned>(
    url: &str,
    body: &T,
) -> Result<R, ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize body: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    decode_response(response).await
}

async fn decode_response<R: serde::de::DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Rejected(rejection_from_body(
            response.status(),
            &response.status_text(),
            &body,
        )));
    }

    serde_json::from_str::<R>(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a non-2xx body. Bodies that are not a Klaw error (proxy pages,
/// empty bodies) keep only the status line.
fn rejection_from_body(status: u16, status_text: &str, body: &str) -> KlawApiError {
    let mut error = serde_json::from_str::<KlawApiError>(body).unwrap_or_default();
    if error.status.is_none() {
        error.status = Some(format!("{} {}", status, status_text).trim_end().to_string());
    }
    error
}
