use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auctions(
        &self,
        filter: entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, entities::StoreError> {
        let auctions = self.db.get_auctions(filter).await?;
        Ok(auctions.into_iter().map(Into::into).collect())
    }
}
