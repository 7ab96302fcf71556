use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::task;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rafka_assignor::config::Config;
use rafka_assignor::plan::AssignmentPlan;
use rafka_assignor::StrategyRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    // Every built-in strategy is bound before any group is assigned.
    let registry = Arc::new(StrategyRegistry::with_builtins());
    info!(strategies = ?registry.names(), "strategy registry ready");

    let plan = AssignmentPlan::load(&config.assignment_plan)
        .await
        .with_context(|| format!("failed to load plan {}", config.assignment_plan))?;
    let cluster = Arc::new(plan.cluster());
    info!(topics = plan.topics.len(), groups = plan.groups.len(), "loaded assignment plan");

    let mut handles = Vec::with_capacity(plan.groups.len());
    for group in plan.groups {
        let registry = Arc::clone(&registry);
        let cluster = Arc::clone(&cluster);
        let fallback = config.fallback_strategy.clone();

        handles.push(task::spawn(async move {
            let result = group.rebalance(&registry, &*cluster, fallback.as_deref());
            (group.group_id, result)
        }));
    }

    let mut assignments = BTreeMap::new();
    let mut failed = 0;
    for handle in handles {
        let (group_id, result) = handle.await.context("rebalance task panicked")?;
        match result {
            Ok(assignment) => {
                assignments.insert(group_id, assignment);
            }
            Err(e) => {
                error!(group = %group_id, code = i16::from(e.error_code()), "rebalance failed: {}", e);
                failed += 1;
            }
        }
    }

    let output = if config.pretty_output {
        serde_json::to_string_pretty(&assignments)?
    } else {
        serde_json::to_string(&assignments)?
    };
    println!("{}", output);

    if failed > 0 {
        bail!("{} group(s) failed to rebalance", failed);
    }
    Ok(())
}
