//! Observability: resolution telemetry (metrics) and sink abstractions.
//!
//! Counters are kept per thread. Proxies never log on their own; every
//! provider call and every guaranteed-access settlement is reported as a
//! `ProxyEvent`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, ProxyOps, ProxyReport};
pub use sink::{
    LookupKind, ProxyEvent, ProxySink, metrics_report, metrics_reset_all, with_proxy_sink,
};
