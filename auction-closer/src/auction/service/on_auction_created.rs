use {
    super::{
        schedule_auction_expiration::ScheduleAuctionExpirationInput,
        Service,
    },
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Service {
    /// Entry point for the creation path. Must be called once per new auction so it does not
    /// wait for the next reconciliation sweep to get an expiration task.
    pub fn on_auction_created(
        &self,
        auction_id: entities::AuctionId,
        expiration_time: OffsetDateTime,
    ) {
        if !self.schedule_auction_expiration(ScheduleAuctionExpirationInput {
            auction_id,
            expiration_time,
        }) {
            tracing::debug!(auction_id = %auction_id, "Expiration already scheduled by the reconciler");
        }
    }
}
