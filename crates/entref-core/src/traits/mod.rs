pub use std::{fmt::Debug, hash::Hash};

use crate::types::Id;

// ============================================================================
// ENTITY IDENTITY
// ============================================================================
//
// These traits describe *what an entity is*, not how it is fetched.
//

///
/// Entity
///
/// Marker for domain values that can be the target of a proxy.
/// Carries no required fields; `PATH` is only used to name the entity type
/// in diagnostics and observability events.
///

pub trait Entity: 'static {
    const PATH: &'static str;
}

///
/// IdentifiedEntity
///
/// An entity with a unique primary key.
///
/// ## Semantics
/// - `Self::Key` is the raw key representation (u64, Ulid, ...)
/// - Typed identity is provided by `Id<Self>`, not by the key itself
///

pub trait IdentifiedEntity: Entity + Sized {
    type Key: Copy + Debug + Eq + Ord + Hash + Send + Sync + 'static;

    fn id(&self) -> Id<Self>;
}

///
/// GuaranteedEntity
///
/// Opt-in for entities that may sit behind a guaranteed proxy.
///
/// `on_absent` is the per-type error-resolution strategy consulted when a
/// guaranteed proxy resolves to nothing. Returning `None` keeps the default
/// behaviour: a guarantee violation naming the proxy.
///

pub trait GuaranteedEntity: IdentifiedEntity {
    fn on_absent(_id: Id<Self>) -> Option<Self> {
        None
    }
}
