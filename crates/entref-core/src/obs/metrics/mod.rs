use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// ProxyReport
/// Ephemeral, in-memory counters for proxy resolution activity.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProxyReport {
    pub ops: ProxyOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// ProxyOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProxyOps {
    // Provider calls
    pub lookups: u64,
    pub collection_lookups: u64,

    // Outcomes
    pub found: u64,
    pub absent: u64,
    pub provider_failures: u64,

    // Guaranteed access
    pub fallbacks_applied: u64,
    pub guarantee_violations: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub lookups: u64,
    pub found: u64,
    pub absent: u64,
    pub provider_failures: u64,
    pub fallbacks_applied: u64,
    pub guarantee_violations: u64,
}

thread_local! {
    static PROXY_STATE: RefCell<ProxyReport> = RefCell::new(ProxyReport::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&ProxyReport) -> R) -> R {
    PROXY_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut ProxyReport) -> R) -> R {
    PROXY_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = ProxyReport::default());
}

/// Snapshot the current counters.
pub(crate) fn report() -> ProxyReport {
    with_state(Clone::clone)
}

/// Per-entity counter entry, created on first touch.
pub(crate) fn entity_entry<'a>(
    state: &'a mut ProxyReport,
    entity_path: &str,
) -> &'a mut EntityCounters {
    state.entities.entry(entity_path.to_string()).or_default()
}
