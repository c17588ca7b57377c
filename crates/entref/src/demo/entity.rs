use crate::prelude::*;

///
/// Human
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Human {
    pub id: u64,
    pub name: String,
}

impl Human {
    #[must_use]
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    /// Placeholder served when a referenced human is missing.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(0, "Unknown")
    }

    /// Lazily list the pets this human owns.
    #[must_use]
    pub fn pets(&self, pets: &CollectionFactory<Self, Pet>) -> CollectionProxy<Self, Pet> {
        pets.by_owner(self.id())
    }
}

impl Entity for Human {
    const PATH: &'static str = "entref::demo::Human";
}

impl IdentifiedEntity for Human {
    type Key = u64;

    fn id(&self) -> Id<Self> {
        Id::from_key(self.id)
    }
}

impl GuaranteedEntity for Human {}

///
/// Pet
///
/// Holds its owner as a raw id; the owner is materialized on demand.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pet {
    pub id: u64,
    pub owner_id: Id<Human>,
    pub name: String,
}

impl Pet {
    #[must_use]
    pub fn new(id: u64, owner: u64, name: &str) -> Self {
        Self {
            id,
            owner_id: Id::from_key(owner),
            name: name.to_string(),
        }
    }

    /// The owner, guaranteed present.
    #[must_use]
    pub fn owner(&self, humans: &ProxyFactory<Human>) -> GuaranteedProxy<Human> {
        humans.guaranteed(self.owner_id)
    }

    /// The owner, with `Human::unknown` standing in for a missing row.
    #[must_use]
    pub fn owner_or_unknown(&self, humans: &ProxyFactory<Human>) -> GuaranteedProxy<Human> {
        humans.guaranteed_with(self.owner_id, Fallback::Value(Human::unknown()))
    }
}

impl Entity for Pet {
    const PATH: &'static str = "entref::demo::Pet";
}

impl IdentifiedEntity for Pet {
    type Key = u64;

    fn id(&self) -> Id<Self> {
        Id::from_key(self.id)
    }
}
