// Fan-out/fan-in over section branches.
// Branches run as independent tokio tasks over shared, immutable inputs and
// the join waits for every one of them before anything is reported.

pub mod topology;

use std::collections::BTreeMap;
use std::future::Future;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::models::scoring::SectionName;
use crate::pipeline::topology::{Topology, TopologyError};
use crate::sections::TaskError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),

    #[error("prepare step failed: {0}")]
    Prepare(#[source] TaskError),

    #[error("{section} branch failed: {source}")]
    Branch {
        section: SectionName,
        #[source]
        source: TaskError,
    },

    #[error("a branch panicked: {0}")]
    Panicked(String),
}

/// Runs one task per branch of `topology` and waits for all of them.
///
/// Results are keyed by section. When several branches fail, the error of
/// the first one in `SectionName` order is returned.
pub async fn run_branches<T, F, Fut>(
    topology: &Topology,
    branch: F,
) -> Result<BTreeMap<SectionName, T>, PipelineError>
where
    T: Send + 'static,
    F: Fn(SectionName) -> Fut,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    topology.validate()?;

    let sections = topology.branches();
    let total = sections.len();
    let mut set = JoinSet::new();
    for section in sections {
        let task = branch(section);
        set.spawn(async move { (section, task.await) });
    }

    let mut results = BTreeMap::new();
    let mut failures = BTreeMap::new();
    let mut panics = Vec::new();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((section, Ok(value))) => {
                results.insert(section, value);
            }
            Ok((section, Err(e))) => {
                error!("{section} branch failed: {e}");
                failures.insert(section, e);
            }
            Err(join_error) => {
                error!("Branch task did not complete: {join_error}");
                panics.push(join_error.to_string());
            }
        }
    }

    info!(
        "Join: {} of {total} branches succeeded",
        results.len()
    );

    if let Some((section, source)) = failures.into_iter().next() {
        return Err(PipelineError::Branch { section, source });
    }
    if let Some(message) = panics.into_iter().next() {
        return Err(PipelineError::Panicked(message));
    }

    Ok(results)
}
