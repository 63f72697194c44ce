//! Jenkins domain records

use serde::{
    Deserialize,
    Deserializer,
};

mod build;
mod job;
mod plugin;
mod queue;
mod statistics;
mod system;
mod user;

pub use build::{
    Action,
    Artifact,
    Branch,
    BuildInfo,
    BuildRef,
    Cause,
    ChangeSet,
    ChangeSetList,
    Culprit,
    Parameter,
    ProgressiveText,
    Revision,
};
pub use job::{
    Job,
    JobInfo,
    JobList,
};
pub use plugin::{
    Plugin,
    Plugins,
};
pub(crate) use queue::QueueResponse;
pub use queue::{
    Executable,
    QueueItem,
    Task,
};
pub use statistics::OverallLoad;
pub use system::SystemInfo;
pub use user::{
    ApiToken,
    ApiTokenData,
    User,
};

/// Treats an explicit `null` like a missing field. Jenkins writes `null` for
/// unset collections.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
