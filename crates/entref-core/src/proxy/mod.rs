//! Lazily resolved references between entities.
//!
//! Two access contracts:
//! - optional: `Proxy::resolve` / `CollectionProxy::resolve` report absence
//!   in-band.
//! - guaranteed: `GuaranteedProxy::resolve_guaranteed` /
//!   `CollectionProxy::resolve_guaranteed` yield the value itself and settle
//!   absence through a fallback, failing fatally by default.
//!
//! Every proxy calls its provider at most once and memoizes the outcome.

mod collection;
mod factory;
mod fallback;
mod guaranteed;
mod scalar;


pub use collection::CollectionProxy;
pub use factory::{CollectionFactory, ProxyFactory};
pub use fallback::{CollectionFallback, Fallback};
pub use guaranteed::GuaranteedProxy;
pub use scalar::Proxy;
