mod dao;

pub use dao::{CountingDao, CountingListDao};

use crate::{
    obs::{ProxyEvent, ProxySink},
    traits::{Entity, GuaranteedEntity, IdentifiedEntity},
    types::Id,
};
use std::cell::RefCell;

///
/// Human
///
/// Test entity with the default (fatal) guarantee policy.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Human {
    pub id: u64,
    pub name: String,
}

impl Human {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl Entity for Human {
    const PATH: &'static str = "entref_core::test_support::Human";
}

impl IdentifiedEntity for Human {
    type Key = u64;

    fn id(&self) -> Id<Self> {
        Id::from_key(self.id)
    }
}

impl GuaranteedEntity for Human {}

///
/// Guest
///
/// Test entity whose type-level policy replaces absence with a placeholder.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Guest {
    pub id: u64,
    pub label: String,
}

impl Entity for Guest {
    const PATH: &'static str = "entref_core::test_support::Guest";
}

impl IdentifiedEntity for Guest {
    type Key = u64;

    fn id(&self) -> Id<Self> {
        Id::from_key(self.id)
    }
}

impl GuaranteedEntity for Guest {
    fn on_absent(id: Id<Self>) -> Option<Self> {
        Some(Self {
            id: id.key(),
            label: "anonymous".to_string(),
        })
    }
}

///
/// Pet
///
/// Child entity listed by its owning `Human`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pet {
    pub id: u64,
    pub owner: u64,
    pub name: String,
}

impl Pet {
    pub fn new(id: u64, owner: u64, name: &str) -> Self {
        Self {
            id,
            owner,
            name: name.to_string(),
        }
    }
}

impl Entity for Pet {
    const PATH: &'static str = "entref_core::test_support::Pet";
}

///
/// RecordingSink
///
/// Captures every proxy event routed to it.
///

#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<ProxyEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProxyEvent> {
        self.events.borrow().clone()
    }
}

impl ProxySink for RecordingSink {
    fn record(&self, event: ProxyEvent) {
        self.events.borrow_mut().push(event);
    }
}
