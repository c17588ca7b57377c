use crate::{
    dao::{DaoRef, FindById},
    obs::{LookupKind, sink::LookupSpan},
    traits::IdentifiedEntity,
    types::Id,
};
use std::{fmt, sync::OnceLock};

///
/// Proxy
///
/// Lazily resolved, possibly absent reference to one entity.
///
/// A deferred proxy calls its provider on the first `resolve` and caches the
/// outcome, found or not, for every later read. Concurrent first reads share
/// one provider call.
///

pub struct Proxy<E: IdentifiedEntity> {
    state: ProxyState<E>,
}

#[derive(Clone)]
enum ProxyState<E: IdentifiedEntity> {
    Prefetched(E),
    ByKey {
        id: Id<E>,
        dao: DaoRef<E>,
        cached: OnceLock<Option<E>>,
    },
}

impl<E: IdentifiedEntity> Proxy<E> {
    /// Wrap an entity that was already fetched; no lookup will ever run.
    #[must_use]
    pub const fn prefetched(entity: E) -> Self {
        Self {
            state: ProxyState::Prefetched(entity),
        }
    }

    /// Defer resolution of `id` to `dao`.
    #[must_use]
    pub const fn by_id(id: Id<E>, dao: DaoRef<E>) -> Self {
        Self {
            state: ProxyState::ByKey {
                id,
                dao,
                cached: OnceLock::new(),
            },
        }
    }

    #[must_use]
    pub const fn by_key(key: E::Key, dao: DaoRef<E>) -> Self {
        Self::by_id(Id::from_key(key), dao)
    }

    /// Identity of the referenced entity.
    #[must_use]
    pub fn id(&self) -> Id<E> {
        match &self.state {
            ProxyState::Prefetched(entity) => entity.id(),
            ProxyState::ByKey { id, .. } => *id,
        }
    }

    #[must_use]
    pub const fn is_prefetched(&self) -> bool {
        matches!(self.state, ProxyState::Prefetched(_))
    }

    /// True once the target is known, found or absent.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match &self.state {
            ProxyState::Prefetched(_) => true,
            ProxyState::ByKey { cached, .. } => cached.get().is_some(),
        }
    }

    /// Resolve the target, calling the provider at most once.
    pub fn resolve(&self) -> Option<&E> {
        match &self.state {
            ProxyState::Prefetched(entity) => Some(entity),
            ProxyState::ByKey { id, dao, cached } => cached
                .get_or_init(|| find_once(*id, dao.as_ref()))
                .as_ref(),
        }
    }

    /// Explicit conversion to the optional entity; same as `resolve`.
    pub fn entity(&self) -> Option<&E> {
        self.resolve()
    }

    /// Resolve and return an owned copy of the target.
    pub fn resolve_cloned(&self) -> Option<E>
    where
        E: Clone,
    {
        self.resolve().cloned()
    }

    /// Consume the proxy and return the resolved target.
    pub fn into_entity(self) -> Option<E> {
        let _ = self.resolve();

        match self.state {
            ProxyState::Prefetched(entity) => Some(entity),
            ProxyState::ByKey { cached, .. } => cached.into_inner().flatten(),
        }
    }
}

// Run one provider call; failures are folded into absence.
fn find_once<E: IdentifiedEntity>(id: Id<E>, dao: &dyn FindById<E>) -> Option<E> {
    let mut span = LookupSpan::<E>::new(LookupKind::Scalar);

    match dao.find_by_id(id) {
        Ok(found) => {
            span.set_found(found.is_some());
            found
        }
        Err(err) => {
            span.fail(&err);
            None
        }
    }
}

impl<E> Clone for Proxy<E>
where
    E: IdentifiedEntity + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<E> fmt::Debug for Proxy<E>
where
    E: IdentifiedEntity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ProxyState::Prefetched(entity) => {
                f.debug_tuple("Proxy::Prefetched").field(entity).finish()
            }
            ProxyState::ByKey { id, cached, .. } => f
                .debug_struct("Proxy::ByKey")
                .field("id", id)
                .field("cached", &cached.get())
                .finish_non_exhaustive(),
        }
    }
}
