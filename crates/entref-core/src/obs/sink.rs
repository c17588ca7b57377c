//! Proxy event sink boundary.
//!
//! Proxy resolution logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through ProxyEvent and ProxySink.
//!
//! This module is the only allowed bridge between resolution logic
//! and the global metrics state.
use crate::{
    error::{DaoError, ErrorClass},
    obs::metrics,
    traits::Entity,
};
use std::{cell::RefCell, marker::PhantomData, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn ProxySink>>> = RefCell::new(None);
}

///
/// LookupKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupKind {
    Scalar,
    Collection,
}

///
/// ProxyEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProxyEvent {
    LookupStart {
        kind: LookupKind,
        entity_path: &'static str,
    },
    LookupFinish {
        kind: LookupKind,
        entity_path: &'static str,
        found: bool,
    },
    LookupFailed {
        kind: LookupKind,
        entity_path: &'static str,
        class: ErrorClass,
    },
    FallbackApplied {
        kind: LookupKind,
        entity_path: &'static str,
    },
    GuaranteeViolation {
        kind: LookupKind,
        entity_path: &'static str,
    },
}

///
/// ProxySink
///

pub trait ProxySink {
    fn record(&self, event: ProxyEvent);
}

/// GlobalProxySink
/// Default thread-local sink that writes into the metrics counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalProxySink;

impl ProxySink for GlobalProxySink {
    fn record(&self, event: ProxyEvent) {
        metrics::with_state_mut(|m| match event {
            ProxyEvent::LookupStart { kind, entity_path } => {
                match kind {
                    LookupKind::Scalar => m.ops.lookups = m.ops.lookups.saturating_add(1),
                    LookupKind::Collection => {
                        m.ops.collection_lookups = m.ops.collection_lookups.saturating_add(1);
                    }
                }

                let entry = metrics::entity_entry(m, entity_path);
                entry.lookups = entry.lookups.saturating_add(1);
            }

            ProxyEvent::LookupFinish {
                entity_path, found, ..
            } => {
                if found {
                    m.ops.found = m.ops.found.saturating_add(1);
                    let entry = metrics::entity_entry(m, entity_path);
                    entry.found = entry.found.saturating_add(1);
                } else {
                    m.ops.absent = m.ops.absent.saturating_add(1);
                    let entry = metrics::entity_entry(m, entity_path);
                    entry.absent = entry.absent.saturating_add(1);
                }
            }

            ProxyEvent::LookupFailed { entity_path, .. } => {
                m.ops.provider_failures = m.ops.provider_failures.saturating_add(1);
                let entry = metrics::entity_entry(m, entity_path);
                entry.provider_failures = entry.provider_failures.saturating_add(1);
            }

            ProxyEvent::FallbackApplied { entity_path, .. } => {
                m.ops.fallbacks_applied = m.ops.fallbacks_applied.saturating_add(1);
                let entry = metrics::entity_entry(m, entity_path);
                entry.fallbacks_applied = entry.fallbacks_applied.saturating_add(1);
            }

            ProxyEvent::GuaranteeViolation { entity_path, .. } => {
                m.ops.guarantee_violations = m.ops.guarantee_violations.saturating_add(1);
                let entry = metrics::entity_entry(m, entity_path);
                entry.guarantee_violations = entry.guarantee_violations.saturating_add(1);
            }
        });
    }
}

/// Route one event to the scoped override, or to the global sink.
pub(crate) fn record(event: ProxyEvent) {
    // clone the handle out so a re-entrant sink never sees a held borrow
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GlobalProxySink.record(event),
    }
}

/// Snapshot the metrics counters for the current thread.
#[must_use]
pub fn metrics_report() -> metrics::ProxyReport {
    metrics::report()
}

/// Reset all metrics counters for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary sink override on the current thread.
///
/// The previous sink is restored on every exit path, including unwind.
pub fn with_proxy_sink<T>(sink: Rc<dyn ProxySink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn ProxySink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);
    f()
}

///
/// LookupSpan
/// RAII guard that emits start/finish events around one provider call.
/// Ensures finish accounting happens even if the provider unwinds.
///

pub(crate) struct LookupSpan<E: Entity> {
    kind: LookupKind,
    found: bool,
    _marker: PhantomData<E>,
}

impl<E: Entity> LookupSpan<E> {
    /// Start a span for one lookup of entity `E`.
    #[must_use]
    pub(crate) fn new(kind: LookupKind) -> Self {
        record(ProxyEvent::LookupStart {
            kind,
            entity_path: E::PATH,
        });

        Self {
            kind,
            found: false,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_found(&mut self, found: bool) {
        self.found = found;
    }

    /// Record a provider failure; the span still finishes as absent.
    pub(crate) fn fail(&mut self, err: &DaoError) {
        self.found = false;
        record(ProxyEvent::LookupFailed {
            kind: self.kind,
            entity_path: E::PATH,
            class: err.class(),
        });
    }
}

impl<E: Entity> Drop for LookupSpan<E> {
    fn drop(&mut self) {
        record(ProxyEvent::LookupFinish {
            kind: self.kind,
            entity_path: E::PATH,
            found: self.found,
        });
    }
}

/// Record the outcome of a guaranteed access that had to settle an absence.
pub(crate) fn record_settlement<E: Entity>(kind: LookupKind, applied_fallback: bool) {
    let entity_path = E::PATH;
    let event = if applied_fallback {
        ProxyEvent::FallbackApplied { kind, entity_path }
    } else {
        ProxyEvent::GuaranteeViolation { kind, entity_path }
    };

    record(event);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Human, RecordingSink};

    #[test]
    fn override_receives_events_and_is_restored() {
        metrics_reset_all();
        let sink = Rc::new(RecordingSink::default());

        with_proxy_sink(sink.clone(), || {
            let mut span = LookupSpan::<Human>::new(LookupKind::Scalar);
            span.set_found(true);
        });

        assert_eq!(
            sink.events(),
            vec![
                ProxyEvent::LookupStart {
                    kind: LookupKind::Scalar,
                    entity_path: Human::PATH,
                },
                ProxyEvent::LookupFinish {
                    kind: LookupKind::Scalar,
                    entity_path: Human::PATH,
                    found: true,
                },
            ]
        );
        // nothing leaked into the global counters while overridden
        assert_eq!(metrics_report().ops.lookups, 0);

        drop(LookupSpan::<Human>::new(LookupKind::Scalar));
        assert_eq!(metrics_report().ops.lookups, 1);
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn global_sink_counts_failures_per_entity() {
        metrics_reset_all();

        {
            let mut span = LookupSpan::<Human>::new(LookupKind::Scalar);
            span.fail(&DaoError::unavailable("offline"));
        }
        record_settlement::<Human>(LookupKind::Scalar, false);

        let report = metrics_report();
        assert_eq!(report.ops.provider_failures, 1);
        assert_eq!(report.ops.absent, 1);
        assert_eq!(report.ops.guarantee_violations, 1);

        let human = &report.entities[Human::PATH];
        assert_eq!(human.lookups, 1);
        assert_eq!(human.provider_failures, 1);
    }

    #[test]
    fn report_serializes_to_json() {
        metrics_reset_all();
        record_settlement::<Human>(LookupKind::Collection, true);

        let json = serde_json::to_value(metrics_report()).expect("report should serialize");
        assert_eq!(json["ops"]["fallbacks_applied"], 1);
        assert_eq!(json["entities"][Human::PATH]["fallbacks_applied"], 1);
    }

    #[test]
    fn restores_previous_override_after_panic() {
        let outer = Rc::new(RecordingSink::default());
        let inner = Rc::new(RecordingSink::default());

        with_proxy_sink(outer.clone(), || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                with_proxy_sink(inner.clone(), || panic!("sink scope unwinds"));
            }));
            assert!(result.is_err());

            record_settlement::<Human>(LookupKind::Scalar, true);
        });

        assert!(inner.events().is_empty());
        assert_eq!(outer.events().len(), 1);
    }
}
