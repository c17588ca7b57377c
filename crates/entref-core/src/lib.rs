//! Core runtime for entref: entity traits, typed ids, lookup providers,
//! lazily resolved proxies, and the observability sink they report through.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod dao;
pub mod error;
pub mod obs;
pub mod proxy;
pub mod traits;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum number of characters of a key's `Debug` rendering embedded in
/// proxy error messages.
///
/// Keeps guarantee-violation messages bounded when keys are large composite
/// values.
pub const MAX_ERROR_ID_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        dao::{DaoRef, FindById, ListByOwner, ListDaoRef},
        proxy::{
            CollectionFactory, CollectionFallback, CollectionProxy, Fallback, GuaranteedProxy,
            Proxy, ProxyFactory,
        },
        traits::{Entity, GuaranteedEntity, IdentifiedEntity},
        types::Id,
    };
}
