use {
    super::Service,
    crate::auction::entities,
};

pub struct GetAuctionsInput {
    pub filter: entities::AuctionFilter,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, entities::StoreError> {
        self.repo.get_auctions(input.filter).await
    }
}
