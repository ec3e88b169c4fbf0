use {
    super::Repository,
    crate::auction::entities,
    std::sync::PoisonError,
};

impl Repository {
    /// Safe to call for auctions which are not tracked.
    pub fn remove_in_memory_expiration(&self, auction_id: &entities::AuctionId) {
        self.in_memory_store
            .expirations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(auction_id);
    }
}
