use {
    super::{
        models,
        Repository,
    },
    crate::auction::entities,
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `add_auction` from `Service` so the expiration gets scheduled.
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, entities::StoreError> {
        self.db
            .add_auction(&models::Auction::from(&auction))
            .await?;
        Ok(auction)
    }
}
