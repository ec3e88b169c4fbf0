use {
    super::Repository,
    crate::auction::entities,
    std::{
        collections::hash_map::Entry,
        sync::PoisonError,
    },
    time::OffsetDateTime,
};

impl Repository {
    /// Returns `false` without touching the map when the auction is already tracked.
    /// Only the caller that gets `true` may spawn an expiration task.
    pub fn add_in_memory_expiration(
        &self,
        auction_id: entities::AuctionId,
        expiration_time: OffsetDateTime,
    ) -> bool {
        let mut expirations = self
            .in_memory_store
            .expirations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match expirations.entry(auction_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(expiration_time);
                true
            }
        }
    }
}
