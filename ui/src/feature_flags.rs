//! Feature flags for console routes
//!
//! Flags are loaded once from the console host at startup and passed to the
//! route table explicitly. A flag is active only when the host reports it as
//! `true`; names this build does not know are ignored.

use std::collections::BTreeSet;

use crate::types::ConsoleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureFlag {
    /// "My requests" list of schema requests.
    MyRequests,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 1] = [FeatureFlag::MyRequests];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureFlag::MyRequests => "MY_REQUESTS",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    active: BTreeSet<FeatureFlag>,
}

impl FeatureFlags {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        config
            .feature_flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .filter_map(|(name, _)| {
                let flag = FeatureFlag::from_name(name);
                if flag.is_none() {
                    log::debug!("Ignoring unknown feature flag {}", name);
                }
                flag
            })
            .collect()
    }

    pub fn is_active(&self, flag: FeatureFlag) -> bool {
        self.active.contains(&flag)
    }
}

impl FromIterator<FeatureFlag> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = FeatureFlag>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}
