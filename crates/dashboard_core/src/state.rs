use shared::domain::{OrderRecord, ProductRecord, UserRecord};

use crate::loader::LoadOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    Products,
    Orders,
}

impl ResourceKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Users => "/api/users",
            Self::Products => "/api/products",
            Self::Orders => "/api/orders",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Products => "product",
            Self::Orders => "order",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation-observable loader state. Re-enters `Loading` on every cycle;
/// there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
    Failed(String),
}

/// One resource's slot in the application state: the last successfully
/// fetched record list plus the display state derived from the latest cycle.
///
/// Records are either the fully-replaced latest successful non-empty fetch or
/// the previous records unchanged; `Empty` and `Failed` outcomes touch only
/// the display state.
#[derive(Debug, Clone)]
pub struct ResourceSlot<T> {
    records: Vec<T>,
    display: LoadState,
    next_seq: u64,
    last_applied_seq: u64,
}

// Manual impl: a derived Default would demand `T: Default`, and record types
// have no meaningful default value.
impl<T> Default for ResourceSlot<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            display: LoadState::Idle,
            next_seq: 0,
            last_applied_seq: 0,
        }
    }
}

impl<T> ResourceSlot<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn display(&self) -> &LoadState {
        &self.display
    }

    /// Marks the slot `Loading` and hands out the sequence number for the
    /// dispatched fetch. Sequence numbers are assigned at issue time.
    pub fn begin_load(&mut self) -> u64 {
        self.next_seq += 1;
        self.display = LoadState::Loading;
        self.next_seq
    }

    /// Applies a settled outcome. An outcome whose sequence number is not the
    /// highest applied so far is discarded, so a stale response from an
    /// overlapping cycle cannot overwrite a newer snapshot. Returns whether
    /// the outcome was applied.
    pub fn apply(&mut self, seq: u64, outcome: LoadOutcome<T>) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        match outcome {
            LoadOutcome::Loaded(records) => {
                self.records = records;
                self.display = LoadState::Loaded;
            }
            LoadOutcome::Empty => self.display = LoadState::Empty,
            LoadOutcome::Failed(reason) => self.display = LoadState::Failed(reason),
        }
        true
    }
}

/// Three independent counts, each zero when its source fetch fails or omits
/// the count field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub user_count: u64,
    pub product_count: u64,
    pub order_count: u64,
}

/// Explicit application state shared between the orchestrator and the
/// presentation layer. Each slot has exactly one writer path (its loader,
/// through the orchestrator); presentation reads cloned snapshots.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub users: ResourceSlot<UserRecord>,
    pub products: ResourceSlot<ProductRecord>,
    pub orders: ResourceSlot<OrderRecord>,
    pub stats: StatsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str) -> UserRecord {
        UserRecord {
            id: shared::domain::UserId(id),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            created_at: None,
        }
    }

    // Record types carry no Default of their own; the state must still
    // default to empty idle slots.
    #[test]
    fn default_state_starts_idle_and_empty() {
        let state = DashboardState::default();
        assert!(state.orders.records().is_empty());
        assert_eq!(state.orders.display(), &LoadState::Idle);
        assert_eq!(state.stats, StatsSnapshot::default());
    }

    #[test]
    fn loaded_outcome_replaces_records_wholesale() {
        let mut slot = ResourceSlot::default();
        let seq = slot.begin_load();
        assert_eq!(slot.display(), &LoadState::Loading);
        assert!(slot.apply(seq, LoadOutcome::Loaded(vec![user(1, "a"), user(2, "b")])));

        let seq = slot.begin_load();
        assert!(slot.apply(seq, LoadOutcome::Loaded(vec![user(3, "c")])));
        assert_eq!(slot.records().len(), 1);
        assert_eq!(slot.records()[0].username, "c");
        assert_eq!(slot.display(), &LoadState::Loaded);
    }

    #[test]
    fn empty_and_failed_keep_prior_records() {
        let mut slot = ResourceSlot::default();
        let seq = slot.begin_load();
        slot.apply(seq, LoadOutcome::Loaded(vec![user(1, "a")]));

        let seq = slot.begin_load();
        assert!(slot.apply(seq, LoadOutcome::Empty));
        assert_eq!(slot.records().len(), 1);
        assert_eq!(slot.display(), &LoadState::Empty);

        let seq = slot.begin_load();
        assert!(slot.apply(seq, LoadOutcome::Failed("connection refused".into())));
        assert_eq!(slot.records().len(), 1);
        assert_eq!(
            slot.display(),
            &LoadState::Failed("connection refused".into())
        );
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut slot = ResourceSlot::default();
        let first = slot.begin_load();
        let second = slot.begin_load();

        assert!(slot.apply(second, LoadOutcome::Loaded(vec![user(2, "newer")])));
        assert!(!slot.apply(first, LoadOutcome::Loaded(vec![user(1, "older")])));

        assert_eq!(slot.records()[0].username, "newer");
        assert_eq!(slot.display(), &LoadState::Loaded);
    }

    #[test]
    fn stale_failure_cannot_mask_newer_success() {
        let mut slot = ResourceSlot::default();
        let first = slot.begin_load();
        let second = slot.begin_load();

        assert!(slot.apply(second, LoadOutcome::Loaded(vec![user(1, "a")])));
        assert!(!slot.apply(first, LoadOutcome::Failed("timeout".into())));
        assert_eq!(slot.display(), &LoadState::Loaded);
    }
}
