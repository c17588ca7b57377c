use crate::{
    DaoError,
    core::dao::{FindById, ListByOwner},
    demo::{Human, Pet},
    prelude::*,
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

///
/// MockDb
///
/// In-memory stand-in for an application database.
/// Counts every query and can be taken offline to simulate an unreachable
/// backend.
///

#[derive(Debug, Default)]
pub struct MockDb {
    humans: BTreeMap<u64, Human>,
    pets: Vec<Pet>,
    offline: AtomicBool,
    queries: AtomicU64,
}

impl MockDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_human(mut self, human: Human) -> Self {
        self.humans.insert(human.id, human);
        self
    }

    #[must_use]
    pub fn with_pet(mut self, pet: Pet) -> Self {
        self.pets.push(pet);
        self
    }

    /// Share the database and build typed proxy factories over it.
    #[must_use]
    pub fn into_factories(self) -> (Arc<Self>, ProxyFactory<Human>, CollectionFactory<Human, Pet>) {
        let db = Arc::new(self);
        let humans = ProxyFactory::<Human>::new(db.clone());
        let pets = CollectionFactory::<Human, Pet>::new(db.clone());

        (db, humans, pets)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    #[must_use]
    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    fn begin_query(&self) -> Result<(), DaoError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            Err(DaoError::unavailable("mock database is offline"))
        } else {
            Ok(())
        }
    }
}

impl FindById<Human> for MockDb {
    fn find_by_id(&self, id: Id<Human>) -> Result<Option<Human>, DaoError> {
        self.begin_query()?;

        Ok(self.humans.get(&id.key()).cloned())
    }
}

impl ListByOwner<Human, Pet> for MockDb {
    // owners without a row have no pet list at all, not an empty one
    fn list_by_owner_id(&self, owner: Id<Human>) -> Result<Option<Vec<Pet>>, DaoError> {
        self.begin_query()?;

        if !self.humans.contains_key(&owner.key()) {
            return Ok(None);
        }

        let pets = self
            .pets
            .iter()
            .filter(|pet| pet.owner_id == owner)
            .cloned()
            .collect();

        Ok(Some(pets))
    }
}
