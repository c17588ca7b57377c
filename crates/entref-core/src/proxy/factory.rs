use crate::{
    dao::{DaoRef, ListDaoRef},
    proxy::{CollectionFallback, CollectionProxy, Fallback, GuaranteedProxy, Proxy},
    traits::{Entity, GuaranteedEntity, IdentifiedEntity},
    types::Id,
};
use std::sync::Arc;

///
/// ProxyFactory
///
/// Typed proxy constructors for one entity type, bound to one provider.
/// Entity modules usually keep one of these next to their Dao.
///

pub struct ProxyFactory<E: IdentifiedEntity> {
    dao: DaoRef<E>,
}

impl<E: IdentifiedEntity> ProxyFactory<E> {
    #[must_use]
    pub const fn new(dao: DaoRef<E>) -> Self {
        Self { dao }
    }

    #[must_use]
    pub const fn dao(&self) -> &DaoRef<E> {
        &self.dao
    }

    #[must_use]
    pub const fn prefetched(&self, entity: E) -> Proxy<E> {
        Proxy::prefetched(entity)
    }

    #[must_use]
    pub fn by_id(&self, id: Id<E>) -> Proxy<E> {
        Proxy::by_id(id, Arc::clone(&self.dao))
    }

    #[must_use]
    pub fn by_key(&self, key: E::Key) -> Proxy<E> {
        self.by_id(Id::from_key(key))
    }
}

impl<E: GuaranteedEntity> ProxyFactory<E> {
    #[must_use]
    pub fn guaranteed(&self, id: Id<E>) -> GuaranteedProxy<E> {
        GuaranteedProxy::by_id(id, Arc::clone(&self.dao))
    }

    #[must_use]
    pub fn guaranteed_with(&self, id: Id<E>, fallback: Fallback<E>) -> GuaranteedProxy<E> {
        self.guaranteed(id).with_fallback(fallback)
    }

    #[must_use]
    pub fn guaranteed_prefetched(&self, entity: E) -> GuaranteedProxy<E> {
        GuaranteedProxy::prefetched(entity)
    }
}

impl<E: IdentifiedEntity> Clone for ProxyFactory<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.dao))
    }
}

///
/// CollectionFactory
///
/// Collection proxy constructors for the `E` children of owner type `O`.
///

pub struct CollectionFactory<O: IdentifiedEntity, E: Entity> {
    dao: ListDaoRef<O, E>,
}

impl<O: IdentifiedEntity, E: Entity> CollectionFactory<O, E> {
    #[must_use]
    pub const fn new(dao: ListDaoRef<O, E>) -> Self {
        Self { dao }
    }

    #[must_use]
    pub fn prefetched(&self, owner: Id<O>, items: Vec<E>) -> CollectionProxy<O, E> {
        CollectionProxy::prefetched(owner, items)
    }

    #[must_use]
    pub fn by_owner(&self, owner: Id<O>) -> CollectionProxy<O, E> {
        CollectionProxy::by_owner(owner, Arc::clone(&self.dao))
    }

    #[must_use]
    pub fn by_owner_with(
        &self,
        owner: Id<O>,
        fallback: CollectionFallback<O, E>,
    ) -> CollectionProxy<O, E> {
        self.by_owner(owner).with_fallback(fallback)
    }
}

impl<O: IdentifiedEntity, E: Entity> Clone for CollectionFactory<O, E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.dao))
    }
}
