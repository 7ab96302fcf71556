use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicMetadata {
    pub name: String,
    pub partitions: Vec<i32>,
}

impl TopicMetadata {
    /// A topic with partitions `0..count`.
    pub fn with_partition_count(name: impl Into<String>, count: i32) -> Self {
        TopicMetadata {
            name: name.into(),
            partitions: (0..count).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}

/// Source of partition ids for the topics a group subscribes to.
pub trait ClusterMetadata: Send + Sync {
    fn partitions_for(&self, topic: &str) -> Result<Vec<i32>, TopicError>;
}

/// Cluster metadata held in memory.
#[derive(Debug, Default, Clone)]
pub struct StaticCluster {
    topics: HashMap<String, Vec<i32>>,
}

impl StaticCluster {
    pub fn new(topics: impl IntoIterator<Item = TopicMetadata>) -> Self {
        StaticCluster {
            topics: topics
                .into_iter()
                .map(|topic| (topic.name, topic.partitions))
                .collect(),
        }
    }
}

impl ClusterMetadata for StaticCluster {
    fn partitions_for(&self, topic: &str) -> Result<Vec<i32>, TopicError> {
        self.topics
            .get(topic)
            .cloned()
            .ok_or_else(|| TopicError::UnknownTopic(topic.to_string()))
    }
}
