//! Partition assignment for consumer groups.
//!
//! A coordinator negotiates a strategy name among a group's members, looks
//! it up in a [`StrategyRegistry`] and runs it over the group's members and
//! subscribed partitions. Strategies are pure: the same ordered inputs always
//! yield the same [`Assignment`].

pub mod config;
pub mod core;
pub mod error;
pub mod plan;

pub use crate::core::assignor::GroupAssignor;
pub use crate::core::consumer_group::{Assignment, GroupMember, MemberMetadata, TopicPartition};
pub use crate::core::registry::StrategyRegistry;
pub use crate::core::round_robin::RoundRobinAssignmentStrategy;
pub use crate::core::strategy::AssignmentStrategy;
pub use crate::core::topic::{ClusterMetadata, StaticCluster, TopicError, TopicMetadata};
pub use crate::error::{AssignorError, KafkaErrorCode, Result};
