//! ## Crate layout
//! - `core`: entity traits, typed ids, lookup providers, proxies, and
//!   observability.
//! - `demo`: an in-memory mock database and two example entities showing how
//!   domain types hand out proxies to each other.
//!
//! The `prelude` module mirrors the surface used by entity modules.

pub use entref_core as core;

pub mod demo;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::error::{DaoError, ProxyError};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        dao::{DaoRef, FindById as _, ListByOwner as _, ListDaoRef},
        proxy::{
            CollectionFactory, CollectionFallback, CollectionProxy, Fallback, GuaranteedProxy,
            Proxy, ProxyFactory,
        },
        traits::{Entity, GuaranteedEntity, IdentifiedEntity},
        types::Id,
    };
    pub use serde::{Deserialize, Serialize};
}
