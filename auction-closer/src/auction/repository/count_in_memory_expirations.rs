use {
    super::Repository,
    crate::auction::entities,
    std::sync::PoisonError,
};

impl Repository {
    pub fn count_in_memory_expirations(&self) -> usize {
        self.in_memory_store
            .expirations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_in_memory_expiration(&self, auction_id: &entities::AuctionId) -> bool {
        self.in_memory_store
            .expirations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(auction_id)
    }
}
