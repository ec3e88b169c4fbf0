use {
    super::Service,
    crate::auction::entities,
};

pub struct CloseAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Moves an open auction to closed. Losing a race against another closer yields
    /// `AlreadyClosed`, never a second write.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn close_auction(
        &self,
        input: CloseAuctionInput,
    ) -> Result<(), entities::CloseAuctionError> {
        let auction = self.repo.get_auction(input.auction_id).await?;
        if !auction.is_open() {
            return Err(entities::CloseAuctionError::AlreadyClosed);
        }

        match self.repo.close_auction(auction.id).await? {
            entities::StatusUpdate::Updated => Ok(()),
            entities::StatusUpdate::NotApplied => Err(entities::CloseAuctionError::AlreadyClosed),
        }
    }
}
