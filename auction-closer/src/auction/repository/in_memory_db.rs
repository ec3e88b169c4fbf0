use {
    super::{
        models,
        Database,
    },
    crate::auction::entities,
    async_trait::async_trait,
    std::{
        collections::HashMap,
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
            Mutex,
        },
    },
};

/// Record store with the same compare-and-swap semantics as the postgres implementation.
/// Clones share the same records.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDatabase {
    auctions:    Arc<Mutex<HashMap<entities::AuctionId, models::Auction>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryDatabase {
    /// Inserts a record bypassing the service, as another process would.
    pub fn insert(&self, auction: &entities::Auction) {
        self.auctions
            .lock()
            .unwrap()
            .insert(auction.id, models::Auction::from(auction));
    }

    pub fn status(&self, auction_id: entities::AuctionId) -> Option<entities::AuctionStatus> {
        self.auctions
            .lock()
            .unwrap()
            .get(&auction_id)
            .map(|auction| auction.status.into())
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), entities::StoreError> {
        match self.unavailable.load(Ordering::SeqCst) {
            true => Err(entities::StoreError::TemporarilyUnavailable),
            false => Ok(()),
        }
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &models::Auction) -> Result<(), entities::StoreError> {
        self.check_available()?;
        self.auctions
            .lock()
            .unwrap()
            .insert(auction.id, auction.clone());
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<models::Auction, entities::StoreError> {
        self.check_available()?;
        self.auctions
            .lock()
            .unwrap()
            .get(&auction_id)
            .cloned()
            .ok_or(entities::StoreError::AuctionNotFound)
    }

    async fn get_auctions(
        &self,
        filter: entities::AuctionFilter,
    ) -> Result<Vec<models::Auction>, entities::StoreError> {
        self.check_available()?;
        let mut auctions: Vec<models::Auction> = self
            .auctions
            .lock()
            .unwrap()
            .values()
            .filter(|auction| {
                filter
                    .status
                    .map_or(true, |status| auction.status == models::AuctionStatus::from(status))
            })
            .filter(|auction| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |category| &auction.category == category)
            })
            .filter(|auction| {
                filter.product_name.as_ref().map_or(true, |product_name| {
                    auction
                        .product_name
                        .to_lowercase()
                        .contains(&product_name.to_lowercase())
                })
            })
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }

    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        expected: models::AuctionStatus,
        new: models::AuctionStatus,
    ) -> Result<entities::StatusUpdate, entities::StoreError> {
        self.check_available()?;
        let mut auctions = self.auctions.lock().unwrap();
        match auctions.get_mut(&auction_id) {
            Some(auction) if auction.status == expected => {
                auction.status = new;
                Ok(entities::StatusUpdate::Updated)
            }
            _ => Ok(entities::StatusUpdate::NotApplied),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::time::Duration,
    };

    fn auction(product_name: &str, category: &str) -> entities::Auction {
        entities::Auction::try_new(
            entities::AuctionCreate {
                product_name: product_name.to_string(),
                category:     category.to_string(),
                description:  "Description".to_string(),
                condition:    entities::ProductCondition::New,
            },
            Duration::from_secs(60),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_auctions_applies_every_filter_field() {
        let db = InMemoryDatabase::default();
        let phone = auction("Vintage Phone", "electronics");
        let radio = auction("Radio", "electronics");
        let chair = auction("Phone Chair", "furniture");
        for auction in [&phone, &radio, &chair] {
            db.insert(auction);
        }
        db.update_auction_status(
            radio.id,
            models::AuctionStatus::Open,
            models::AuctionStatus::Closed,
        )
        .await
        .unwrap();

        let open = db
            .get_auctions(entities::AuctionFilter::with_status(
                entities::AuctionStatus::Open,
            ))
            .await
            .unwrap();
        assert_eq!(open.len(), 2);

        let phones = db
            .get_auctions(entities::AuctionFilter {
                category: Some("electronics".to_string()),
                product_name: Some("phone".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].id, phone.id);
    }

    #[tokio::test]
    async fn test_get_auctions_matches_product_name_wildcards_literally() {
        let db = InMemoryDatabase::default();
        let discounted = auction("Phone 50% off", "electronics");
        let plain = auction("Phone 50 off", "electronics");
        db.insert(&discounted);
        db.insert(&plain);

        let auctions = db
            .get_auctions(entities::AuctionFilter {
                product_name: Some("50%".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(auctions.len(), 1);
        assert_eq!(auctions[0].id, discounted.id);

        let auctions = db
            .get_auctions(entities::AuctionFilter {
                product_name: Some("phone_".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(auctions.is_empty());
    }
}
