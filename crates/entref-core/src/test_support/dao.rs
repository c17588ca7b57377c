use crate::{
    dao::{FindById, ListByOwner},
    error::DaoError,
    traits::{Entity, IdentifiedEntity},
    types::Id,
};
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Duration,
};

///
/// CountingDao
///
/// In-memory scalar provider that counts every call.
/// Can be switched into a failing mode or slowed down to widen race windows.
///

pub struct CountingDao<E: IdentifiedEntity> {
    rows: BTreeMap<E::Key, E>,
    calls: AtomicUsize,
    failing: bool,
    delay: Option<Duration>,
}

impl<E: IdentifiedEntity> CountingDao<E> {
    pub fn new(rows: impl IntoIterator<Item = E>) -> Self {
        Self {
            rows: rows.into_iter().map(|row| (row.id().key(), row)).collect(),
            calls: AtomicUsize::new(0),
            failing: false,
            delay: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::empty()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E> FindById<E> for CountingDao<E>
where
    E: IdentifiedEntity + Clone + Send + Sync,
{
    fn find_by_id(&self, id: Id<E>) -> Result<Option<E>, DaoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        if self.failing {
            return Err(DaoError::unavailable("counting dao is offline"));
        }

        Ok(self.rows.get(&id.key()).cloned())
    }
}

///
/// CountingListDao
///
/// In-memory collection provider keyed by owner.
///

pub struct CountingListDao<O: IdentifiedEntity, E: Entity> {
    rows: BTreeMap<O::Key, Vec<E>>,
    calls: AtomicUsize,
    failing: bool,
}

impl<O: IdentifiedEntity, E: Entity> CountingListDao<O, E> {
    pub fn new(rows: impl IntoIterator<Item = (O::Key, Vec<E>)>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            calls: AtomicUsize::new(0),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<O, E> ListByOwner<O, E> for CountingListDao<O, E>
where
    O: IdentifiedEntity,
    E: Entity + Clone + Send + Sync,
{
    fn list_by_owner_id(&self, owner: Id<O>) -> Result<Option<Vec<E>>, DaoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DaoError::other("counting list dao refused the query"));
        }

        Ok(self.rows.get(&owner.key()).cloned())
    }
}
