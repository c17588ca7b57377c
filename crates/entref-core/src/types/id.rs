use crate::traits::IdentifiedEntity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

///
/// Id
///
/// Typed primary-key wrapper for entity identities.
/// Carries entity context without changing the underlying key type.
/// Serializes identically to `E::Key`.
///

#[repr(transparent)]
pub struct Id<E: IdentifiedEntity> {
    key: E::Key,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Id<E>
where
    E: IdentifiedEntity,
{
    /// Construct a typed identity from the raw key value.
    #[must_use]
    pub const fn from_key(key: E::Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying key.
    #[must_use]
    pub const fn key(&self) -> E::Key {
        self.key
    }

    /// Consume this identity and return the raw key.
    #[must_use]
    pub const fn into_key(self) -> E::Key {
        self.key
    }

    /// Path of the entity this identity belongs to.
    #[must_use]
    pub const fn entity_path(&self) -> &'static str {
        E::PATH
    }
}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<E> Clone for Id<E>
where
    E: IdentifiedEntity,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Id<E> where E: IdentifiedEntity {}

impl<E> fmt::Debug for Id<E>
where
    E: IdentifiedEntity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.key).finish()
    }
}

impl<E> Default for Id<E>
where
    E: IdentifiedEntity,
    E::Key: Default,
{
    fn default() -> Self {
        Self::from_key(E::Key::default())
    }
}

impl<E> fmt::Display for Id<E>
where
    E: IdentifiedEntity,
    E::Key: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<E> Eq for Id<E> where E: IdentifiedEntity {}

impl<E> PartialEq for Id<E>
where
    E: IdentifiedEntity,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E> Hash for Id<E>
where
    E: IdentifiedEntity,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<E> Ord for Id<E>
where
    E: IdentifiedEntity,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl<E> PartialOrd for Id<E>
where
    E: IdentifiedEntity,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Serialize for Id<E>
where
    E: IdentifiedEntity,
    E::Key: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.key.serialize(serializer)
    }
}

impl<'de, E> Deserialize<'de> for Id<E>
where
    E: IdentifiedEntity,
    E::Key: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = E::Key::deserialize(deserializer)?;

        Ok(Self::from_key(key))
    }
}

// ----------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::Id;
    use crate::traits::{Entity, IdentifiedEntity};

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: u64,
    }

    impl Entity for TestEntity {
        const PATH: &'static str = "entref_core::types::id::TestEntity";
    }

    impl IdentifiedEntity for TestEntity {
        type Key = u64;

        fn id(&self) -> Id<Self> {
            Id::from_key(self.id)
        }
    }

    #[test]
    fn serializes_as_underlying_key() {
        let id = Id::<TestEntity>::from_key(7);
        let json = serde_json::to_string(&id).expect("id should serialize");
        assert_eq!(json, "7");

        let decoded: Id<TestEntity> = serde_json::from_str(&json).expect("id should decode");
        assert_eq!(decoded, id);
    }

    #[test]
    fn display_and_debug_forward_to_key() {
        let id = TestEntity { id: 42 }.id();

        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "Id(42)");
        assert_eq!(id.entity_path(), TestEntity::PATH);
    }

    #[test]
    fn ordering_follows_key() {
        let low = Id::<TestEntity>::from_key(1);
        let high = Id::<TestEntity>::from_key(2);

        assert!(low < high);
        assert_eq!(Id::<TestEntity>::default().into_key(), 0);
    }
}
