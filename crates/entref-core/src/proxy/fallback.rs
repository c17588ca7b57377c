use crate::{
    traits::{Entity, GuaranteedEntity, IdentifiedEntity},
    types::Id,
};
use std::{fmt, sync::Arc};

///
/// Fallback
///
/// Error-resolution strategy for a guaranteed scalar proxy.
/// Consulted at most once, only when the underlying resolution is absent.
///

#[derive(Clone)]
pub enum Fallback<E: IdentifiedEntity> {
    /// Defer to `GuaranteedEntity::on_absent` for the entity type.
    Entity,

    /// Always fail with a guarantee violation.
    Fail,

    /// Serve a fixed default entity.
    Value(E),

    /// Derive a replacement from the proxy's id.
    With(Arc<dyn Fn(Id<E>) -> E + Send + Sync>),
}

impl<E: IdentifiedEntity> Fallback<E> {
    pub fn with(f: impl Fn(Id<E>) -> E + Send + Sync + 'static) -> Self {
        Self::With(Arc::new(f))
    }

    /// Settle an absent resolution; `None` means the guarantee is violated.
    pub(crate) fn settle(&self, id: Id<E>) -> Option<E>
    where
        E: GuaranteedEntity + Clone,
    {
        match self {
            Self::Entity => E::on_absent(id),
            Self::Fail => None,
            Self::Value(entity) => Some(entity.clone()),
            Self::With(f) => Some(f(id)),
        }
    }
}

impl<E: IdentifiedEntity> Default for Fallback<E> {
    fn default() -> Self {
        Self::Entity
    }
}

impl<E> fmt::Debug for Fallback<E>
where
    E: IdentifiedEntity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str("Entity"),
            Self::Fail => f.write_str("Fail"),
            Self::Value(entity) => f.debug_tuple("Value").field(entity).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

///
/// CollectionFallback
///
/// Error-resolution strategy for a collection proxy.
/// Defaults to `Fail`: an absent collection is a hard failure unless the
/// caller opts into a replacement.
///

pub enum CollectionFallback<O: IdentifiedEntity, E: Entity> {
    Fail,
    Empty,
    Value(Vec<E>),
    With(Arc<dyn Fn(Id<O>) -> Vec<E> + Send + Sync>),
}

impl<O: IdentifiedEntity, E: Entity> CollectionFallback<O, E> {
    pub fn with(f: impl Fn(Id<O>) -> Vec<E> + Send + Sync + 'static) -> Self {
        Self::With(Arc::new(f))
    }

    pub(crate) fn settle(&self, owner: Id<O>) -> Option<Vec<E>>
    where
        E: Clone,
    {
        match self {
            Self::Fail => None,
            Self::Empty => Some(Vec::new()),
            Self::Value(items) => Some(items.clone()),
            Self::With(f) => Some(f(owner)),
        }
    }
}

impl<O: IdentifiedEntity, E: Entity> Default for CollectionFallback<O, E> {
    fn default() -> Self {
        Self::Fail
    }
}

impl<O, E> Clone for CollectionFallback<O, E>
where
    O: IdentifiedEntity,
    E: Entity + Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Fail => Self::Fail,
            Self::Empty => Self::Empty,
            Self::Value(items) => Self::Value(items.clone()),
            Self::With(f) => Self::With(Arc::clone(f)),
        }
    }
}

impl<O, E> fmt::Debug for CollectionFallback<O, E>
where
    O: IdentifiedEntity,
    E: Entity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("Fail"),
            Self::Empty => f.write_str("Empty"),
            Self::Value(items) => f.debug_tuple("Value").field(items).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}
