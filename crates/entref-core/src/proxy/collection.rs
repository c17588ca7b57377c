use crate::{
    dao::{ListByOwner, ListDaoRef},
    error::ProxyError,
    obs::{
        LookupKind,
        sink::{LookupSpan, record_settlement},
    },
    proxy::CollectionFallback,
    traits::{Entity, IdentifiedEntity},
    types::Id,
};
use std::{fmt, sync::OnceLock};

///
/// CollectionProxy
///
/// Lazily resolved, ordered sequence of `E` owned by one `O`.
///
/// `resolve` reports absence in-band like the scalar proxy, but the
/// guaranteed accessors fail by default (`CollectionFallback::Fail`) instead
/// of requiring an opt-in wrapper.
///

pub struct CollectionProxy<O: IdentifiedEntity, E: Entity> {
    owner: Id<O>,
    state: CollectionState<O, E>,
    fallback: CollectionFallback<O, E>,
    settled: OnceLock<Result<Vec<E>, ProxyError>>,
}

enum CollectionState<O: IdentifiedEntity, E: Entity> {
    Prefetched(Vec<E>),
    ByOwner {
        dao: ListDaoRef<O, E>,
        cached: OnceLock<Option<Vec<E>>>,
    },
}

impl<O: IdentifiedEntity, E: Entity> CollectionProxy<O, E> {
    /// Wrap a sequence that was already fetched with its owner.
    #[must_use]
    pub fn prefetched(owner: Id<O>, items: Vec<E>) -> Self {
        Self::from_state(owner, CollectionState::Prefetched(items))
    }

    /// Defer listing the children of `owner` to `dao`.
    #[must_use]
    pub fn by_owner(owner: Id<O>, dao: ListDaoRef<O, E>) -> Self {
        Self::from_state(
            owner,
            CollectionState::ByOwner {
                dao,
                cached: OnceLock::new(),
            },
        )
    }

    fn from_state(owner: Id<O>, state: CollectionState<O, E>) -> Self {
        Self {
            owner,
            state,
            fallback: CollectionFallback::default(),
            settled: OnceLock::new(),
        }
    }

    /// Replace the error-resolution strategy.
    /// An absence that was already settled keeps its cached outcome.
    #[must_use]
    pub fn with_fallback(mut self, fallback: CollectionFallback<O, E>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub const fn owner(&self) -> Id<O> {
        self.owner
    }

    #[must_use]
    pub const fn is_prefetched(&self) -> bool {
        matches!(self.state, CollectionState::Prefetched(_))
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match &self.state {
            CollectionState::Prefetched(_) => true,
            CollectionState::ByOwner { cached, .. } => cached.get().is_some(),
        }
    }

    /// Resolve the sequence, calling the provider at most once.
    pub fn resolve(&self) -> Option<&[E]> {
        match &self.state {
            CollectionState::Prefetched(items) => Some(items),
            CollectionState::ByOwner { dao, cached } => cached
                .get_or_init(|| list_once(self.owner, dao.as_ref()))
                .as_deref(),
        }
    }
}

impl<O: IdentifiedEntity, E: Entity + Clone> CollectionProxy<O, E> {
    /// Resolve the sequence, settling absence through the fallback.
    pub fn try_resolve_guaranteed(&self) -> Result<&[E], ProxyError> {
        if let Some(items) = self.resolve() {
            return Ok(items);
        }

        match self.settled.get_or_init(|| self.settle_absent()) {
            Ok(items) => Ok(items),
            Err(err) => Err(err.clone()),
        }
    }

    /// Resolve the sequence or fail fatally.
    ///
    /// # Panics
    /// Panics with the guarantee-violation message when the provider has
    /// nothing for the owner and no fallback was configured.
    pub fn resolve_guaranteed(&self) -> &[E] {
        match self.try_resolve_guaranteed() {
            Ok(items) => items,
            Err(err) => panic!("{err}"),
        }
    }

    /// Explicit conversion to the sequence; same as `resolve_guaranteed`.
    pub fn entities(&self) -> &[E] {
        self.resolve_guaranteed()
    }

    pub fn into_entities(self) -> Vec<E> {
        self.entities().to_vec()
    }

    fn settle_absent(&self) -> Result<Vec<E>, ProxyError> {
        match self.fallback.settle(self.owner) {
            Some(items) => {
                record_settlement::<E>(LookupKind::Collection, true);
                Ok(items)
            }
            None => {
                record_settlement::<E>(LookupKind::Collection, false);
                Err(ProxyError::collection_guarantee_violation(
                    E::PATH,
                    O::PATH,
                    &self.owner.key(),
                ))
            }
        }
    }
}

// Run one provider call; failures are folded into absence.
fn list_once<O: IdentifiedEntity, E: Entity>(
    owner: Id<O>,
    dao: &dyn ListByOwner<O, E>,
) -> Option<Vec<E>> {
    let mut span = LookupSpan::<E>::new(LookupKind::Collection);

    match dao.list_by_owner_id(owner) {
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

impl<O, E> Clone for CollectionProxy<O, E>
where
    O: IdentifiedEntity,
    E: Entity + Clone,
{
    fn clone(&self) -> Self {
        let state = match &self.state {
            CollectionState::Prefetched(items) => CollectionState::Prefetched(items.clone()),
            CollectionState::ByOwner { dao, cached } => CollectionState::ByOwner {
                dao: dao.clone(),
                cached: cached.clone(),
            },
        };

        Self {
            owner: self.owner,
            state,
            fallback: self.fallback.clone(),
            settled: self.settled.clone(),
        }
    }
}

impl<O, E> fmt::Debug for CollectionProxy<O, E>
where
    O: IdentifiedEntity,
    E: Entity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("CollectionProxy");
        out.field("owner", &self.owner);

        match &self.state {
            CollectionState::Prefetched(items) => out.field("prefetched", items),
            CollectionState::ByOwner { cached, .. } => out.field("cached", &cached.get()),
        };

        out.field("fallback", &self.fallback)
            .field("settled", &self.settled.get())
            .finish()
    }
}
