//! Illustrative scaffolding: a mock in-memory database and two entities that
//! reference each other through proxies.
//!
//! Nothing here is part of the proxy contract; it exists to show how an
//! application wires its own Dao into `ProxyFactory` / `CollectionFactory`.

mod db;
mod entity;

pub use db::MockDb;
pub use entity::{Human, Pet};
