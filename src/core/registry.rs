use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::core::round_robin::RoundRobinAssignmentStrategy;
use crate::core::strategy::AssignmentStrategy;
use crate::error::{AssignorError, Result};

/// Name → strategy bindings consulted by the coordinator on every rebalance.
///
/// Written at startup, read on every rebalance. Registering an existing name
/// replaces the old binding.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: RwLock<HashMap<String, Arc<dyn AssignmentStrategy>>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        StrategyRegistry::default()
    }

    /// A registry holding every built-in strategy.
    pub fn with_builtins() -> Self {
        let registry = StrategyRegistry::new();
        registry.register(RoundRobinAssignmentStrategy::NAME, RoundRobinAssignmentStrategy);
        registry
    }

    /// Binds `name` to `strategy`, returning the binding it replaced.
    pub fn register<S>(&self, name: &str, strategy: S) -> Option<Arc<dyn AssignmentStrategy>>
    where
        S: AssignmentStrategy + 'static,
    {
        let previous = self.write().insert(name.to_string(), Arc::new(strategy));

        if previous.is_some() {
            warn!(strategy = name, "replacing registered assignment strategy");
        } else {
            info!(strategy = name, "registered assignment strategy");
        }
        previous
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<dyn AssignmentStrategy>> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| AssignorError::UnknownStrategy(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Picks the strategy for a group from each member's preference list.
    ///
    /// The first member's preferences decide the order; the chosen name must
    /// be listed by every member and be registered here.
    pub fn select_common(&self, preferences: &[Vec<String>]) -> Result<String> {
        let Some((first, rest)) = preferences.split_first() else {
            return Err(AssignorError::NoCommonStrategy);
        };

        let strategies = self.read();
        let selected = first
            .iter()
            .find(|name| {
                strategies.contains_key(name.as_str())
                    && rest.iter().all(|member| member.contains(name))
            })
            .cloned()
            .ok_or(AssignorError::NoCommonStrategy)?;

        debug!(strategy = %selected, members = preferences.len(), "selected common strategy");
        Ok(selected)
    }

    // Writers only ever insert a fully built Arc, so a poisoned map is still valid.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn AssignmentStrategy>>> {
        self.strategies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn AssignmentStrategy>>> {
        self.strategies.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}
