//! Checks the URL-supplied topic and environment before the form is usable.

use crate::types::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightMismatch {
    UnknownTopic,
    UnknownEnvironment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// Topic names or environments are still loading.
    Pending,
    Proceed {
        locked_environment: Option<Environment>,
    },
    GoBack(PreflightMismatch),
}

impl Preflight {
    /// The form stays hidden once a mismatch is known, even if the back
    /// navigation has nowhere to go.
    pub fn renders_form(&self) -> bool {
        !matches!(self, Preflight::GoBack(_))
    }

    pub fn allows_submit(&self) -> bool {
        matches!(self, Preflight::Proceed { .. })
    }
}

/// Decide once both lists have resolved. An empty `env` query counts as
/// absent. The query must name an environment offered in the selector.
pub fn check_preflight(
    preset_topic_name: &str,
    env_query: Option<&str>,
    topic_names: Option<&[String]>,
    environments: Option<&[Environment]>,
) -> Preflight {
    let (Some(topic_names), Some(environments)) = (topic_names, environments) else {
        return Preflight::Pending;
    };

    if !topic_names.iter().any(|name| name == preset_topic_name) {
        return Preflight::GoBack(PreflightMismatch::UnknownTopic);
    }

    match env_query.filter(|query| !query.is_empty()) {
        None => Preflight::Proceed {
            locked_environment: None,
        },
        Some(query) => match find_environment(&environment_options(environments), query) {
            Some(environment) => Preflight::Proceed {
                locked_environment: Some(environment.clone()),
            },
            None => Preflight::GoBack(PreflightMismatch::UnknownEnvironment),
        },
    }
}

/// First environment whose id or name equals `query`.
pub fn find_environment<'a>(environments: &'a [Environment], query: &str) -> Option<&'a Environment> {
    environments
        .iter()
        .find(|environment| environment.id == query || environment.name == query)
}

/// Environments offered in the selector.
pub fn environment_options(environments: &[Environment]) -> Vec<Environment> {
    environments
        .iter()
        .filter(|environment| environment.accepts_schema_requests())
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::AssociatedEnv;

    pub(crate) const TEST_TOPIC_NAME: &str = "my-awesome-topic";

    fn env(name: &str, id: &str, associated: Option<(&str, &str)>) -> Environment {
        Environment {
            id: id.to_string(),
            name: name.to_string(),
            associated_env: associated.map(|(id, name)| AssociatedEnv {
                id: id.to_string(),
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn mocked_environments() -> Vec<Environment> {
        vec![
            env("DEV", "1", Some(("3", "DEV_SCH"))),
            env("TST", "2", Some(("9", "TST_SCH"))),
            env("INFRA", "3", Some(("9", "INFRA_SCH"))),
            env("SOME", "3", None),
        ]
    }

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_pending_until_both_lists_resolve() {
        let envs = mocked_environments();
        let names = topics(&[TEST_TOPIC_NAME]);

        assert_eq!(check_preflight(TEST_TOPIC_NAME, None, None, Some(&envs)), Preflight::Pending);
        assert_eq!(check_preflight(TEST_TOPIC_NAME, None, Some(&names), None), Preflight::Pending);
    }

    #[test]
    fn test_proceeds_when_topic_is_known() {
        let names = topics(&["topic-1", "topic-2", TEST_TOPIC_NAME]);
        assert_eq!(
            check_preflight(TEST_TOPIC_NAME, None, Some(&names), Some(&mocked_environments())),
            Preflight::Proceed {
                locked_environment: None
            }
        );
    }

    #[test]
    fn test_goes_back_when_topic_is_unknown() {
        let names = topics(&["topic-1", "topic-2"]);
        assert_eq!(
            check_preflight(TEST_TOPIC_NAME, None, Some(&names), Some(&mocked_environments())),
            Preflight::GoBack(PreflightMismatch::UnknownTopic)
        );
    }

    #[test]
    fn test_locks_environment_matched_by_id() {
        let names = topics(&[TEST_TOPIC_NAME]);
        let envs = mocked_environments();

        match check_preflight(TEST_TOPIC_NAME, Some("1"), Some(&names), Some(&envs)) {
            Preflight::Proceed {
                locked_environment: Some(environment),
            } => {
                assert_eq!(environment.id, "1");
                assert_eq!(environment.name, "DEV");
            }
            other => panic!("Expected locked environment, got {:?}", other),
        }
    }

    #[test]
    fn test_locks_environment_matched_by_name() {
        let names = topics(&[TEST_TOPIC_NAME]);
        let envs = mocked_environments();

        match check_preflight(TEST_TOPIC_NAME, Some("INFRA"), Some(&names), Some(&envs)) {
            Preflight::Proceed {
                locked_environment: Some(environment),
            } => {
                assert_eq!(environment.id, "3");
                assert_eq!(environment.name, "INFRA");
            }
            other => panic!("Expected locked environment, got {:?}", other),
        }
    }

    #[test]
    fn test_goes_back_when_environment_is_unknown() {
        let names = topics(&[TEST_TOPIC_NAME]);
        let envs = mocked_environments();

        for query in ["999", "HELLO"] {
            assert_eq!(
                check_preflight(TEST_TOPIC_NAME, Some(query), Some(&names), Some(&envs)),
                Preflight::GoBack(PreflightMismatch::UnknownEnvironment)
            );
        }
    }

    #[test]
    fn test_goes_back_when_environment_has_no_schema_registry() {
        let names = topics(&[TEST_TOPIC_NAME]);
        let mut envs = mocked_environments();
        envs.push(env("PROD", "7", None));

        for query in ["7", "PROD", "SOME"] {
            assert_eq!(
                check_preflight(TEST_TOPIC_NAME, Some(query), Some(&names), Some(&envs)),
                Preflight::GoBack(PreflightMismatch::UnknownEnvironment)
            );
        }
    }

    #[test]
    fn test_shared_id_locks_the_registry_environment() {
        let names = topics(&[TEST_TOPIC_NAME]);
        let envs = vec![env("SOME", "3", None), env("INFRA", "3", Some(("9", "INFRA_SCH")))];

        match check_preflight(TEST_TOPIC_NAME, Some("3"), Some(&names), Some(&envs)) {
            Preflight::Proceed {
                locked_environment: Some(environment),
            } => assert_eq!(environment.name, "INFRA"),
            other => panic!("Expected locked environment, got {:?}", other),
        }
    }

    #[test]
    fn test_form_hidden_only_on_mismatch() {
        let proceed = Preflight::Proceed {
            locked_environment: None,
        };

        assert!(Preflight::Pending.renders_form());
        assert!(proceed.renders_form());
        assert!(!Preflight::GoBack(PreflightMismatch::UnknownTopic).renders_form());
        assert!(!Preflight::GoBack(PreflightMismatch::UnknownEnvironment).renders_form());

        assert!(proceed.allows_submit());
        assert!(!Preflight::Pending.allows_submit());
        assert!(!Preflight::GoBack(PreflightMismatch::UnknownTopic).allows_submit());
    }

    #[test]
    fn test_empty_env_query_is_ignored() {
        let names = topics(&[TEST_TOPIC_NAME]);
        assert_eq!(
            check_preflight(TEST_TOPIC_NAME, Some(""), Some(&names), Some(&mocked_environments())),
            Preflight::Proceed {
                locked_environment: None
            }
        );
    }

    #[test]
    fn test_options_only_include_associated_environments() {
        let options = environment_options(&mocked_environments());
        let names: Vec<&str> = options.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["DEV", "TST", "INFRA"]);
    }
}
