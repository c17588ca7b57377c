use crate::{
    dao::DaoRef,
    error::ProxyError,
    obs::{LookupKind, sink::record_settlement},
    proxy::{Fallback, Proxy},
    traits::GuaranteedEntity,
    types::Id,
};
use std::{fmt, sync::OnceLock};

///
/// GuaranteedProxy
///
/// Proxy whose access contract yields the entity itself.
///
/// An absent resolution is settled once through the configured `Fallback`
/// and the outcome (replacement or violation) is cached with the proxy.
///

pub struct GuaranteedProxy<E: GuaranteedEntity> {
    proxy: Proxy<E>,
    fallback: Fallback<E>,
    settled: OnceLock<Result<E, ProxyError>>,
}

impl<E: GuaranteedEntity> GuaranteedProxy<E> {
    /// Layer the guaranteed contract over an existing proxy.
    #[must_use]
    pub fn new(proxy: Proxy<E>) -> Self {
        Self {
            proxy,
            fallback: Fallback::default(),
            settled: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn prefetched(entity: E) -> Self {
        Self::new(Proxy::prefetched(entity))
    }

    #[must_use]
    pub fn by_id(id: Id<E>, dao: DaoRef<E>) -> Self {
        Self::new(Proxy::by_id(id, dao))
    }

    #[must_use]
    pub fn by_key(key: E::Key, dao: DaoRef<E>) -> Self {
        Self::new(Proxy::by_key(key, dao))
    }

    /// Replace the error-resolution strategy.
    /// An absence that was already settled keeps its cached outcome.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback<E>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn id(&self) -> Id<E> {
        self.proxy.id()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.proxy.is_resolved()
    }

    /// View the underlying optional contract.
    #[must_use]
    pub const fn as_proxy(&self) -> &Proxy<E> {
        &self.proxy
    }

    /// Drop the guarantee and keep the optional proxy with its cache.
    #[must_use]
    pub fn into_proxy(self) -> Proxy<E> {
        self.proxy
    }
}

impl<E: GuaranteedEntity + Clone> GuaranteedProxy<E> {
    /// Resolve the target, settling absence through the fallback.
    pub fn try_resolve_guaranteed(&self) -> Result<&E, ProxyError> {
        if let Some(entity) = self.proxy.resolve() {
            return Ok(entity);
        }

        self.settled
            .get_or_init(|| self.settle_absent())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Resolve the target or fail fatally.
    ///
    /// # Panics
    /// Panics with the guarantee-violation message when the proxy resolves
    /// to nothing and the fallback does not supply a replacement.
    pub fn resolve_guaranteed(&self) -> &E {
        match self.try_resolve_guaranteed() {
            Ok(entity) => entity,
            Err(err) => panic!("{err}"),
        }
    }

    /// Explicit conversion to the entity; same as `resolve_guaranteed`.
    pub fn entity(&self) -> &E {
        self.resolve_guaranteed()
    }

    pub fn try_into_entity(self) -> Result<E, ProxyError> {
        self.try_resolve_guaranteed().cloned()
    }

    /// Consuming form of `entity`.
    pub fn into_entity(self) -> E {
        self.entity().clone()
    }

    fn settle_absent(&self) -> Result<E, ProxyError> {
        let id = self.proxy.id();

        match self.fallback.settle(id) {
            Some(entity) => {
                record_settlement::<E>(LookupKind::Scalar, true);
                Ok(entity)
            }
            None => {
                record_settlement::<E>(LookupKind::Scalar, false);
                Err(ProxyError::guarantee_violation(E::PATH, &id.key()))
            }
        }
    }
}

impl<E> Clone for GuaranteedProxy<E>
where
    E: GuaranteedEntity + Clone,
{
    fn clone(&self) -> Self {
        Self {
            proxy: self.proxy.clone(),
            fallback: self.fallback.clone(),
            settled: self.settled.clone(),
        }
    }
}

impl<E> fmt::Debug for GuaranteedProxy<E>
where
    E: GuaranteedEntity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuaranteedProxy")
            .field("proxy", &self.proxy)
            .field("fallback", &self.fallback)
            .field("settled", &self.settled.get())
            .finish()
    }
}
