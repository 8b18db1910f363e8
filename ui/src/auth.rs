//! Permissions of the signed-in user
//!
//! Built from Klaw's `AuthenticationInfo` and provided to the component tree
//! as an [`AuthContext`].

use std::collections::BTreeMap;

use crate::types::AuthenticationInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions(BTreeMap<&'static str, bool>);

impl Permissions {
    pub fn has(&self, permission: &str) -> bool {
        self.0.get(permission).copied().unwrap_or(false)
    }
}

impl FromIterator<(&'static str, bool)> for Permissions {
    fn from_iter<I: IntoIterator<Item = (&'static str, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&AuthenticationInfo> for Permissions {
    fn from(info: &AuthenticationInfo) -> Self {
        let granted = |value: &str| value == "true";
        [
            ("canSwitchTeams", granted(&info.can_switch_teams)),
            ("canShutdownKw", granted(&info.can_shutdown_kw)),
            ("canUpdatePermissions", granted(&info.can_update_permissions)),
            ("addEditRoles", granted(&info.add_edit_roles)),
            ("viewTopics", granted(&info.view_topics)),
            ("requestItems", granted(&info.request_items)),
            ("viewKafkaConnect", granted(&info.view_kafka_connect)),
            ("syncBackTopics", granted(&info.sync_back_topics)),
            ("syncBackAcls", granted(&info.sync_back_acls)),
            ("updateServerConfig", granted(&info.update_server_config)),
            ("addUser", granted(&info.add_user)),
            ("addTeams", granted(&info.add_teams)),
            ("syncTopicsAcls", granted(&info.sync_topics_acls)),
            ("syncConnectors", granted(&info.sync_connectors)),
            ("approveAtleastOneRequest", granted(&info.approve_atleast_one_request)),
            ("approveDeclineTopics", granted(&info.approve_decline_topics)),
            ("approveDeclineSubscriptions", granted(&info.approve_decline_subscriptions)),
            ("approveDeclineSchemas", granted(&info.approve_decline_schemas)),
            ("approveDeclineConnectors", granted(&info.approve_decline_connectors)),
            ("addDeleteEditClusters", granted(&info.add_delete_edit_clusters)),
            ("addDeleteEditEnvs", granted(&info.add_delete_edit_envs)),
        ]
        .into_iter()
        .collect()
    }
}

/// Injected through `provide_context` once `/getAuth` has resolved.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub username: String,
    pub permissions: Permissions,
}

impl AuthContext {
    pub fn new(info: &AuthenticationInfo) -> Self {
        Self {
            username: info.username.clone(),
            permissions: Permissions::from(info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_from_authentication_info() {
        let info = AuthenticationInfo {
            request_items: "true".to_string(),
            approve_decline_schemas: "false".to_string(),
            ..Default::default()
        };
        let permissions = Permissions::from(&info);

        assert!(permissions.has("requestItems"));
        assert!(!permissions.has("approveDeclineSchemas"));
        assert!(!permissions.has("viewTopics"));
        assert!(!permissions.has("unknownPermission"));
    }
}
