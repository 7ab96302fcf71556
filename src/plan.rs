//! Rebalance plans read by the host process.
//!
//! A plan describes the cluster's topics and, for each consumer group, its
//! members in join order:
//!
//! ```text
//! {
//!   "topics": [{"name": "orders", "partitions": [0, 1, 2]}],
//!   "groups": [{
//!     "group_id": "billing",
//!     "protocol": "roundrobin",
//!     "members": [{"member_id": "a", "topics": ["orders"], "protocols": ["roundrobin"]}]
//!   }]
//! }
//! ```
//!
//! `protocol` may be omitted, in which case it is negotiated from the members'
//! `protocols` preference lists.

use std::path::Path;

use serde::Deserialize;

use crate::core::assignor::GroupAssignor;
use crate::core::consumer_group::{Assignment, GroupMember, MemberMetadata};
use crate::core::registry::StrategyRegistry;
use crate::core::topic::{ClusterMetadata, StaticCluster, TopicMetadata};
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentPlan {
    #[serde(default)]
    pub topics: Vec<TopicMetadata>,
    pub groups: Vec<GroupPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupPlan {
    pub group_id: String,
    #[serde(default)]
    pub protocol: Option<String>,
    pub members: Vec<MemberPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberPlan {
    pub member_id: String,
    #[serde(flatten)]
    pub metadata: MemberMetadata,
    #[serde(default)]
    pub protocols: Vec<String>,
}

impl AssignmentPlan {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_slice(&bytes)
    }

    pub fn cluster(&self) -> StaticCluster {
        StaticCluster::new(self.topics.iter().cloned())
    }
}

impl GroupPlan {
    pub fn members(&self) -> Vec<GroupMember> {
        self.members
            .iter()
            .map(|m| GroupMember::with_metadata(m.member_id.clone(), m.metadata.clone()))
            .collect()
    }

    /// The group's strategy name, negotiated from member preferences when
    /// the plan does not pin one.
    pub fn negotiate(&self, registry: &StrategyRegistry) -> Result<String> {
        if let Some(protocol) = &self.protocol {
            return Ok(protocol.clone());
        }
        let preferences: Vec<Vec<String>> =
            self.members.iter().map(|m| m.protocols.clone()).collect();
        registry.select_common(&preferences)
    }

    pub fn rebalance(
        &self,
        registry: &StrategyRegistry,
        cluster: &dyn ClusterMetadata,
        fallback: Option<&str>,
    ) -> Result<Assignment> {
        let strategy = self.negotiate(registry)?;
        let mut assignor = GroupAssignor::new(registry, cluster, strategy);
        if let Some(fallback) = fallback {
            assignor = assignor.with_fallback(fallback);
        }
        assignor.assign(&self.members())
    }
}
