use rafka_assignor::{
    Assignment, AssignmentStrategy, AssignorError, GroupAssignor, GroupMember, KafkaErrorCode,
    StaticCluster, StrategyRegistry, TopicMetadata, TopicPartition,
};

fn p(topic: &str, partition: i32) -> TopicPartition {
    TopicPartition::new(topic, partition)
}

#[test]
fn test_roundrobin_registered_at_startup() {
    let registry = StrategyRegistry::with_builtins();
    let members = vec![
        GroupMember::new("a", &["t"]),
        GroupMember::new("b", &["t"]),
        GroupMember::new("c", &["t"]),
    ];
    let partitions = vec![p("t", 0), p("t", 1), p("t", 2), p("t", 3)];

    let result = registry
        .lookup("roundrobin")
        .unwrap()
        .assign(&members, &partitions);

    assert_eq!(result.get("a").unwrap(), &[p("t", 0), p("t", 3)]);
    assert_eq!(result.get("b").unwrap(), &[p("t", 1)]);
    assert_eq!(result.get("c").unwrap(), &[p("t", 2)]);
}

#[test]
fn test_missing_strategy_fails_the_rebalance() {
    let registry = StrategyRegistry::with_builtins();
    let cluster = StaticCluster::new([TopicMetadata::with_partition_count("t", 2)]);
    let members = vec![GroupMember::new("a", &["t"])];

    let err = GroupAssignor::new(&registry, &cluster, "missing")
        .assign(&members)
        .unwrap_err();

    assert!(matches!(err, AssignorError::UnknownStrategy(_)));
    assert_eq!(err.error_code(), KafkaErrorCode::InconsistentGroupProtocol);
}

#[test]
fn test_custom_strategy_added_without_touching_callers() {
    let registry = StrategyRegistry::with_builtins();
    registry.register(
        "reverse",
        |members: &[GroupMember], partitions: &[TopicPartition]| {
            let mut assignment = Assignment::with_members(members);
            if let Some(last) = members.last() {
                for partition in partitions.iter().rev() {
                    assignment.push(&last.member_id, partition.clone());
                }
            }
            assignment
        },
    );

    let cluster = StaticCluster::new([TopicMetadata::with_partition_count("t", 2)]);
    let members = vec![GroupMember::new("a", &["t"]), GroupMember::new("b", &["t"])];

    let result = GroupAssignor::new(&registry, &cluster, "reverse")
        .assign(&members)
        .unwrap();

    assert!(result.get("a").unwrap().is_empty());
    assert_eq!(result.get("b").unwrap(), &[p("t", 1), p("t", 0)]);
}

#[tokio::test]
async fn test_concurrent_group_rebalances() {
    let registry = std::sync::Arc::new(StrategyRegistry::with_builtins());
    let cluster = std::sync::Arc::new(StaticCluster::new([
        TopicMetadata::with_partition_count("orders", 12),
        TopicMetadata::with_partition_count("payments", 5),
    ]));

    let handles: Vec<_> = (0..16)
        .map(|group| {
            let registry = registry.clone();
            let cluster = cluster.clone();
            tokio::spawn(async move {
                let members: Vec<GroupMember> = (0..=(group % 5))
                    .map(|i| GroupMember::new(format!("g{group}-m{i}"), &["orders", "payments"]))
                    .collect();
                GroupAssignor::new(&registry, &*cluster, "roundrobin")
                    .assign(&members)
                    .map(|a| (members.len(), a))
            })
        })
        .collect();

    for handle in handles {
        let (member_count, assignment) = handle.await.unwrap().unwrap();
        assert_eq!(assignment.len(), member_count);
        assert_eq!(assignment.partition_count(), 17);
    }
}
