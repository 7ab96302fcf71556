pub mod assignor;
pub mod consumer_group;
pub mod registry;
pub mod round_robin;
pub mod strategy;
pub mod topic;
