use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Auction, entities::StoreError> {
        self.db.get_auction(auction_id).await.map(Into::into)
    }
}
