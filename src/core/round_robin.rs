use tracing::{debug, warn};

use crate::core::consumer_group::{Assignment, GroupMember, TopicPartition};
use crate::core::strategy::AssignmentStrategy;

/// Deals partitions to members like cards: partition `i` goes to member
/// `i % members.len()`. Topics are interleaved purely by input position.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobinAssignmentStrategy;

impl RoundRobinAssignmentStrategy {
    pub const NAME: &'static str = "roundrobin";
}

impl AssignmentStrategy for RoundRobinAssignmentStrategy {
    fn assign(&self, members: &[GroupMember], partitions: &[TopicPartition]) -> Assignment {
        if members.is_empty() {
            if !partitions.is_empty() {
                warn!(
                    partitions = partitions.len(),
                    "no members to receive partitions, leaving them unassigned"
                );
            }
            return Assignment::new();
        }

        let mut assignment = Assignment::with_members(members);
        for (index, partition) in partitions.iter().enumerate() {
            assignment.push_at(index % members.len(), partition.clone());
        }

        debug!(
            members = members.len(),
            partitions = partitions.len(),
            "round-robin assignment computed"
        );
        assignment
    }
}
