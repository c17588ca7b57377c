//! Lookup provider contracts consumed by proxies.
//!
//! Providers are owned by the host application. Proxies only hold a shared
//! handle (`DaoRef` / `ListDaoRef`) and call into it at most once.

use crate::{
    error::DaoError,
    traits::{Entity, IdentifiedEntity},
    types::Id,
};
use std::sync::Arc;

///
/// FindById
///
/// Scalar lookup: key to optional entity.
/// `Ok(None)` and `Err(_)` are both observed as absence by the proxy core.
///

pub trait FindById<E: IdentifiedEntity>: Send + Sync {
    fn find_by_id(&self, id: Id<E>) -> Result<Option<E>, DaoError>;
}

impl<E, F> FindById<E> for F
where
    E: IdentifiedEntity,
    F: Fn(Id<E>) -> Result<Option<E>, DaoError> + Send + Sync,
{
    fn find_by_id(&self, id: Id<E>) -> Result<Option<E>, DaoError> {
        self(id)
    }
}

///
/// ListByOwner
///
/// Collection lookup: owner key to an optional ordered sequence.
///

pub trait ListByOwner<O: IdentifiedEntity, E: Entity>: Send + Sync {
    fn list_by_owner_id(&self, owner: Id<O>) -> Result<Option<Vec<E>>, DaoError>;
}

impl<O, E, F> ListByOwner<O, E> for F
where
    O: IdentifiedEntity,
    E: Entity,
    F: Fn(Id<O>) -> Result<Option<Vec<E>>, DaoError> + Send + Sync,
{
    fn list_by_owner_id(&self, owner: Id<O>) -> Result<Option<Vec<E>>, DaoError> {
        self(owner)
    }
}

/// Shared handle to a scalar lookup provider.
pub type DaoRef<E> = Arc<dyn FindById<E>>;

/// Shared handle to a collection lookup provider.
pub type ListDaoRef<O, E> = Arc<dyn ListByOwner<O, E>>;
