//! Account groups - explicit configuration model and group-level aggregation.

mod group_aggregator;
mod groups_model;

pub use group_aggregator::aggregate_groups;
pub use groups_model::{ExclusionMode, GroupConfig};
