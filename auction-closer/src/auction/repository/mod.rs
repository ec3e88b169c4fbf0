use {
    super::entities,
    std::{
        collections::HashMap,
        sync::Mutex,
    },
    time::OffsetDateTime,
};

mod add_auction;
mod add_in_memory_expiration;
mod close_auction;
#[cfg(test)]
mod count_in_memory_expirations;
mod get_auction;
mod get_auctions;
#[cfg(test)]
pub mod in_memory_db;
pub mod models;
mod remove_in_memory_expiration;

pub use models::*;

/// Auctions which currently have an expiration task responsible for them.
///
/// Only the repository touches the map, and the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    expirations: Mutex<HashMap<entities::AuctionId, OffsetDateTime>>,
}

pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }
}
