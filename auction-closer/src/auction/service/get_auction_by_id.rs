use {
    super::Service,
    crate::auction::entities,
};

pub struct GetAuctionByIdInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction_by_id(
        &self,
        input: GetAuctionByIdInput,
    ) -> Result<entities::Auction, entities::StoreError> {
        self.repo.get_auction(input.auction_id).await
    }
}
