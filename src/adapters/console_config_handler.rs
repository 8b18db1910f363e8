//! Runtime configuration read by the console UI at startup.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfigDto {
    pub feature_flags: BTreeMap<String, bool>,
}

impl From<&Settings> for ConsoleConfigDto {
    fn from(settings: &Settings) -> Self {
        Self {
            feature_flags: settings.feature_flags.clone(),
        }
    }
}

/// GET /console/config
pub async fn get_console_config(State(settings): State<Arc<Settings>>) -> impl IntoResponse {
    (StatusCode::OK, Json(ConsoleConfigDto::from(settings.as_ref())))
}
