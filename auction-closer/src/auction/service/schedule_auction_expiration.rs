use {
    super::{
        handle_auction_expiration::{
            ExpirationGuard,
            HandleAuctionExpirationInput,
        },
        Service,
    },
    crate::auction::entities,
    time::OffsetDateTime,
};

pub struct ScheduleAuctionExpirationInput {
    pub auction_id:      entities::AuctionId,
    pub expiration_time: OffsetDateTime,
}

impl Service {
    /// Spawns an expiration task unless one is already responsible for the auction.
    pub fn schedule_auction_expiration(&self, input: ScheduleAuctionExpirationInput) -> bool {
        if !self
            .repo
            .add_in_memory_expiration(input.auction_id, input.expiration_time)
        {
            return false;
        }

        // Created before spawning so the entry is freed even if the task is never polled.
        let guard = ExpirationGuard::new(self.repo.clone(), input.auction_id);
        self.task_tracker.spawn({
            let service = self.clone();
            async move {
                let _guard = guard;
                service
                    .handle_auction_expiration(HandleAuctionExpirationInput {
                        auction_id:      input.auction_id,
                        expiration_time: input.expiration_time,
                    })
                    .await;
            }
        });
        true
    }
}
