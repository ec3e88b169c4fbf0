use {
    super::Service,
    crate::auction::entities,
};

pub struct AddAuctionInput {
    pub auction: entities::AuctionCreate,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, entities::AddAuctionError> {
        let auction = entities::Auction::try_new(input.auction, self.config.auction_duration)?;
        tracing::Span::current().record("auction_id", auction.id.to_string());
        let auction = self.repo.add_auction(auction).await?;
        self.on_auction_created(auction.id, auction.expiration_time);
        Ok(auction)
    }
}
