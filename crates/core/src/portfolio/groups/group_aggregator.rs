use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::groups_model::GroupConfig;
use crate::constants::{NETWORTH_GROUP, TOTAL_GROUP};
use crate::portfolio::reconstruction::DailySeries;

/// Builds group-level daily series from already-converted account series.
///
/// Runs strictly after valuation: a group total is the plain sum of its
/// members' converted values for each date, so groups never re-convert.
/// Members without data contribute 0 for every date. Synthetic groups are
/// derived here, never stored, and win over a stored group of the same name.
pub fn aggregate_groups(
    account_series: &BTreeMap<String, DailySeries>,
    config: &GroupConfig,
) -> BTreeMap<String, DailySeries> {
    let mut groups = BTreeMap::new();

    for (name, members) in &config.groups {
        groups.insert(
            name.clone(),
            sum_members(account_series, members.iter().map(String::as_str)),
        );
    }

    // "networth": every account present in the results.
    groups.insert(
        NETWORTH_GROUP.to_string(),
        sum_members(account_series, account_series.keys().map(String::as_str)),
    );

    // "total": every account minus the ignore-list. The sum excludes ignored
    // accounts regardless of the exclusion mode; the mode only affects
    // reported membership.
    groups.insert(
        TOTAL_GROUP.to_string(),
        sum_members(
            account_series,
            account_series
                .keys()
                .map(String::as_str)
                .filter(|a| !config.is_ignored_for_total(a)),
        ),
    );

    groups
}

fn sum_members<'a>(
    account_series: &BTreeMap<String, DailySeries>,
    members: impl Iterator<Item = &'a str>,
) -> DailySeries {
    let mut out = DailySeries::new();
    for member in members {
        let Some(series) = account_series.get(member) else {
            // Forward-declared or vanished account: contributes 0.
            continue;
        };
        for (&date, &value) in series {
            *out.entry(date).or_insert(Decimal::ZERO) += value;
        }
    }
    out
}
