use std::sync::Arc;

use tracing::{info, warn};

use crate::core::consumer_group::{Assignment, GroupMember, TopicPartition};
use crate::core::registry::StrategyRegistry;
use crate::core::strategy::AssignmentStrategy;
use crate::core::topic::ClusterMetadata;
use crate::error::{AssignorError, Result};

/// Runs a group's negotiated strategy over the partitions its members
/// subscribe to.
pub struct GroupAssignor<'a> {
    registry: &'a StrategyRegistry,
    cluster: &'a dyn ClusterMetadata,
    strategy: String,
    fallback: Option<String>,
}

impl<'a> GroupAssignor<'a> {
    pub fn new(
        registry: &'a StrategyRegistry,
        cluster: &'a dyn ClusterMetadata,
        strategy: impl Into<String>,
    ) -> Self {
        GroupAssignor {
            registry,
            cluster,
            strategy: strategy.into(),
            fallback: None,
        }
    }

    /// Strategy to use when the negotiated one is not registered.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn assign(&self, members: &[GroupMember]) -> Result<Assignment> {
        let (name, strategy) = self.resolve_strategy()?;
        let partitions = self.subscribed_partitions(members)?;

        let assignment = strategy.assign(members, &partitions);
        info!(
            strategy = %name,
            members = members.len(),
            partitions = partitions.len(),
            assigned = assignment.partition_count(),
            "computed group assignment"
        );
        Ok(assignment)
    }

    /// Partitions of every topic any member subscribes to, topics in first
    /// seen order and partition ids ascending.
    pub fn subscribed_partitions(&self, members: &[GroupMember]) -> Result<Vec<TopicPartition>> {
        let mut topics: Vec<&str> = Vec::new();
        for topic in members.iter().flat_map(|m| m.metadata.topics.iter()) {
            if !topics.contains(&topic.as_str()) {
                topics.push(topic.as_str());
            }
        }

        let mut partitions = Vec::new();
        for topic in topics {
            let mut ids = self.cluster.partitions_for(topic)?;
            ids.sort_unstable();
            ids.dedup();
            partitions.extend(ids.into_iter().map(|id| TopicPartition::new(topic, id)));
        }
        Ok(partitions)
    }

    /// The strategy to run and the name it is registered under.
    fn resolve_strategy(&self) -> Result<(&str, Arc<dyn AssignmentStrategy>)> {
        match self.registry.lookup(&self.strategy) {
            Ok(strategy) => Ok((self.strategy.as_str(), strategy)),
            Err(AssignorError::UnknownStrategy(name)) => {
                let Some(fallback) = self.fallback.as_deref() else {
                    return Err(AssignorError::UnknownStrategy(name));
                };
                warn!(strategy = %name, fallback, "unknown assignment strategy, using fallback");
                self.registry
                    .lookup(fallback)
                    .map(|strategy| (fallback, strategy))
                    .map_err(|_| AssignorError::UnknownStrategy(name))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::{StaticCluster, TopicMetadata};

    fn cluster() -> StaticCluster {
        StaticCluster::new([
            TopicMetadata::with_partition_count("orders", 3),
            TopicMetadata {
                name: "payments".to_string(),
                partitions: vec![1, 0],
            },
        ])
    }

    #[test]
    fn test_assigns_subscribed_topics() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();
        let members = vec![
            GroupMember::new("a", &["orders"]),
            GroupMember::new("b", &["payments", "orders"]),
        ];

        let assignment = GroupAssignor::new(&registry, &cluster, "roundrobin")
            .assign(&members)
            .unwrap();

        assert_eq!(
            assignment.get("a").unwrap(),
            &[
                TopicPartition::new("orders", 0),
                TopicPartition::new("orders", 2),
                TopicPartition::new("payments", 1),
            ]
        );
        assert_eq!(
            assignment.get("b").unwrap(),
            &[
                TopicPartition::new("orders", 1),
                TopicPartition::new("payments", 0),
            ]
        );
    }

    #[test]
    fn test_unknown_strategy_fails() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();
        let members = vec![GroupMember::new("a", &["orders"])];

        let err = GroupAssignor::new(&registry, &cluster, "sticky")
            .assign(&members)
            .unwrap_err();
        assert!(matches!(err, AssignorError::UnknownStrategy(ref name) if name == "sticky"));
    }

    #[test]
    fn test_fallback_strategy() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();
        let members = vec![GroupMember::new("a", &["orders"])];

        let assignment = GroupAssignor::new(&registry, &cluster, "sticky")
            .with_fallback("roundrobin")
            .assign(&members)
            .unwrap();
        assert_eq!(assignment.partition_count(), 3);
    }

    #[test]
    fn test_resolve_strategy_names_the_strategy_that_runs() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();

        let primary = GroupAssignor::new(&registry, &cluster, "roundrobin");
        let (name, _) = primary.resolve_strategy().unwrap();
        assert_eq!(name, "roundrobin");

        let fallen_back =
            GroupAssignor::new(&registry, &cluster, "sticky").with_fallback("roundrobin");
        let (name, _) = fallen_back.resolve_strategy().unwrap();
        assert_eq!(name, "roundrobin");
    }

    #[test]
    fn test_unknown_fallback_reports_primary_name() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();
        let members = vec![GroupMember::new("a", &["orders"])];

        let err = GroupAssignor::new(&registry, &cluster, "sticky")
            .with_fallback("range")
            .assign(&members)
            .unwrap_err();
        assert!(matches!(err, AssignorError::UnknownStrategy(ref name) if name == "sticky"));
    }

    #[test]
    fn test_unknown_topic_propagates() {
        let registry = StrategyRegistry::with_builtins();
        let cluster = cluster();
        let members = vec![GroupMember::new("a", &["ghost"])];

        let err = GroupAssignor::new(&registry, &cluster, "roundrobin")
            .assign(&members)
            .unwrap_err();
        assert!(matches!(err, AssignorError::Topic(_)));
    }

    #[test]
    fn test_subscribed_partitions_dedupes_topics() {
        let registry = StrategyRegistry::new();
        let cluster = cluster();
        let members = vec![
            GroupMember::new("a", &["payments"]),
            GroupMember::new("b", &["payments"]),
        ];

        let partitions = GroupAssignor::new(&registry, &cluster, "roundrobin")
            .subscribed_partitions(&members)
            .unwrap();
        assert_eq!(
            partitions,
            vec![
                TopicPartition::new("payments", 0),
                TopicPartition::new("payments", 1),
            ]
        );
    }
}
