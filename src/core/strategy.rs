use crate::core::consumer_group::{Assignment, GroupMember, TopicPartition};

/// A named, swappable partition assignment algorithm.
///
/// Implementations must be deterministic: every member of a group may run the
/// same strategy on the same ordered inputs and has to arrive at the same
/// result. `members` order is significant and must be respected.
pub trait AssignmentStrategy: Send + Sync {
    fn assign(&self, members: &[GroupMember], partitions: &[TopicPartition]) -> Assignment;
}

impl<F> AssignmentStrategy for F
where
    F: Fn(&[GroupMember], &[TopicPartition]) -> Assignment + Send + Sync,
{
    fn assign(&self, members: &[GroupMember], partitions: &[TopicPartition]) -> Assignment {
        self(members, partitions)
    }
}
