use {
    super::{
        schedule_auction_expiration::ScheduleAuctionExpirationInput,
        Service,
    },
    crate::auction::entities,
};

impl Service {
    /// Schedules an expiration task for every open auction which has none,
    /// e.g. auctions created before this process started. Returns how many were scheduled.
    #[tracing::instrument(skip_all, fields(open_auctions, scheduled))]
    pub async fn reconcile_auctions(&self) -> Result<usize, entities::StoreError> {
        let auctions = self
            .repo
            .get_auctions(entities::AuctionFilter::with_status(
                entities::AuctionStatus::Open,
            ))
            .await?;
        let open_auctions = auctions.len();
        let scheduled = auctions
            .into_iter()
            .filter(|auction| {
                self.schedule_auction_expiration(ScheduleAuctionExpirationInput {
                    auction_id:      auction.id,
                    expiration_time: auction.expiration_time,
                })
            })
            .count();

        tracing::Span::current().record("open_auctions", open_auctions);
        tracing::Span::current().record("scheduled", scheduled);
        tracing::info!(open_auctions, scheduled, "Reconciled auction expirations");
        Ok(scheduled)
    }
}
