use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// One shard of a topic, identified by `(topic, partition)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize)]
pub struct TopicPartition {
    pub topic: String,
    pub partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        TopicPartition {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.topic, self.partition)
    }
}

/// Subscription metadata a member sent in its JoinGroup request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberMetadata {
    #[serde(default)]
    pub version: i16,
    pub topics: Vec<String>,
    #[serde(default)]
    pub user_data: Option<Bytes>,
}

impl MemberMetadata {
    pub fn new(topics: Vec<String>) -> Self {
        MemberMetadata {
            version: 0,
            topics,
            user_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub member_id: String,
    pub metadata: MemberMetadata,
}

impl GroupMember {
    pub fn new(member_id: impl Into<String>, topics: &[&str]) -> Self {
        GroupMember {
            member_id: member_id.into(),
            metadata: MemberMetadata::new(topics.iter().map(|t| t.to_string()).collect()),
        }
    }

    pub fn with_metadata(member_id: impl Into<String>, metadata: MemberMetadata) -> Self {
        GroupMember {
            member_id: member_id.into(),
            metadata,
        }
    }
}

/// Partitions owned by each member for one generation.
///
/// Keys keep the order in which members were supplied, so two coordinators
/// fed the same member list produce byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(String, Vec<TopicPartition>)>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment::default()
    }

    /// Starts with every member mapped to an empty sequence.
    pub fn with_members(members: &[GroupMember]) -> Self {
        Assignment {
            entries: members
                .iter()
                .map(|m| (m.member_id.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Appends `partition` to `member_id`, adding the member if it is new.
    pub fn push(&mut self, member_id: &str, partition: TopicPartition) {
        match self.entries.iter_mut().find(|(id, _)| id == member_id) {
            Some((_, partitions)) => partitions.push(partition),
            None => self.entries.push((member_id.to_string(), vec![partition])),
        }
    }

    /// Appends to the member at `index` in supply order.
    pub(crate) fn push_at(&mut self, index: usize, partition: TopicPartition) {
        self.entries[index].1.push(partition);
    }

    pub fn get(&self, member_id: &str) -> Option<&[TopicPartition]> {
        self.entries
            .iter()
            .find(|(id, _)| id == member_id)
            .map(|(_, partitions)| partitions.as_slice())
    }

    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TopicPartition])> {
        self.entries
            .iter()
            .map(|(id, partitions)| (id.as_str(), partitions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total partitions across all members.
    pub fn partition_count(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.len()).sum()
    }

    /// Keyed by member id in sorted order, not supply order.
    pub fn into_map(self) -> BTreeMap<String, Vec<TopicPartition>> {
        self.entries.into_iter().collect()
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (member_id, partitions) in &self.entries {
            map.serialize_entry(member_id, partitions)?;
        }
        map.end()
    }
}
