//! Group configuration models.
//!
//! Group membership and the ignore-list are explicit values handed to the
//! engine per call. Deep logic never reads ambient configuration state; the
//! collaborator that manages groups owns loading, caching, and invalidation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the "total" ignore-list is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionMode {
    /// Ignored accounts stay listed as members of "total" but contribute
    /// nothing to its sum.
    #[default]
    SumOnly,
    /// Ignored accounts are dropped from the reported membership as well.
    Membership,
}

/// Explicit group configuration for one user.
///
/// Stored groups may reference accounts with no balance records yet
/// (forward-declared) and must tolerate accounts that later disappear;
/// absent members simply contribute nothing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    /// Stored groups: group name -> member account names.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,

    /// Accounts excluded from the synthetic "total" group (bridge accounts
    /// and other non-principal holdings).
    #[serde(default)]
    pub ignored_for_total: Vec<String>,

    #[serde(default)]
    pub exclusion_mode: ExclusionMode,
}

impl GroupConfig {
    pub fn is_ignored_for_total(&self, account: &str) -> bool {
        self.ignored_for_total.iter().any(|a| a == account)
    }

    /// Resolved membership of every group, synthetics included, for display.
    ///
    /// `accounts` are the account names present in the current results.
    /// Whether "total" lists ignored accounts depends on the exclusion mode;
    /// its SUM excludes them in both modes.
    pub fn resolved_members(&self, accounts: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut resolved: BTreeMap<String, Vec<String>> = self
            .groups
            .iter()
            .map(|(name, members)| (name.clone(), members.clone()))
            .collect();

        resolved.insert(
            crate::constants::NETWORTH_GROUP.to_string(),
            accounts.to_vec(),
        );

        let total_members: Vec<String> = match self.exclusion_mode {
            ExclusionMode::SumOnly => accounts.to_vec(),
            ExclusionMode::Membership => accounts
                .iter()
                .filter(|a| !self.is_ignored_for_total(a))
                .cloned()
                .collect(),
        };
        resolved.insert(crate::constants::TOTAL_GROUP.to_string(), total_members);

        resolved
    }
}
