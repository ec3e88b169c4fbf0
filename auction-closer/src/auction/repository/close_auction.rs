use {
    super::{
        models,
        Repository,
    },
    crate::auction::entities,
};

impl Repository {
    #[tracing::instrument(skip_all, name = "close_auction_repo", fields(auction_id = %auction_id))]
    pub async fn close_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::StatusUpdate, entities::StoreError> {
        self.db
            .update_auction_status(
                auction_id,
                models::AuctionStatus::Open,
                models::AuctionStatus::Closed,
            )
            .await
    }
}
