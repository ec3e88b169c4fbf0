use {
    super::AddAuctionError,
    std::time::Duration,
    time::{
        macros::datetime,
        OffsetDateTime,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;

/// Latest instant a postgres `TIMESTAMP` column and `time` both represent.
pub const MAX_EXPIRATION_TIME: OffsetDateTime = datetime!(9999-12-31 23:59:59.999999 UTC);

/// Open is the initial status, Closed is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:              AuctionId,
    pub product_name:    String,
    pub category:        String,
    pub description:     String,
    pub condition:       ProductCondition,
    pub status:          AuctionStatus,
    pub creation_time:   OffsetDateTime,
    pub expiration_time: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

/// Returns `None` when the expiration can not be stored.
pub fn expiration_time_after(start: OffsetDateTime, duration: Duration) -> Option<OffsetDateTime> {
    let duration = time::Duration::try_from(duration).ok()?;
    start
        .checked_add(duration)
        .filter(|expiration_time| *expiration_time <= MAX_EXPIRATION_TIME)
}

impl Auction {
    pub fn try_new(create: AuctionCreate, duration: Duration) -> Result<Self, AddAuctionError> {
        let creation_time = OffsetDateTime::now_utc();
        let expiration_time = expiration_time_after(creation_time, duration)
            .ok_or(AddAuctionError::ExpirationOutOfRange)?;
        Ok(Self {
            id: Uuid::new_v4(),
            product_name: create.product_name,
            category: create.category,
            description: create.description,
            condition: create.condition,
            status: AuctionStatus::Open,
            creation_time,
            expiration_time,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }
}

/// Every field is optional, an empty filter matches all auctions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub status:       Option<AuctionStatus>,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

impl AuctionFilter {
    pub fn with_status(status: AuctionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Outcome of a conditional status write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusUpdate {
    Updated,
    NotApplied,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auction_create() -> AuctionCreate {
        AuctionCreate {
            product_name: "Product 1".to_string(),
            category:     "Category 1".to_string(),
            description:  "Description 1".to_string(),
            condition:    ProductCondition::New,
        }
    }

    #[test]
    fn test_new_auction_expires_after_duration() {
        let auction = Auction::try_new(auction_create(), Duration::from_secs(30)).unwrap();
        assert!(auction.is_open());
        assert_eq!(
            auction.expiration_time - auction.creation_time,
            time::Duration::seconds(30)
        );
    }

    #[test]
    fn test_new_auction_rejects_unrepresentable_expiration() {
        let twenty_thousand_years = Duration::from_secs(20_000 * 365 * 24 * 60 * 60);
        assert_eq!(
            Auction::try_new(auction_create(), twenty_thousand_years),
            Err(AddAuctionError::ExpirationOutOfRange)
        );
        assert_eq!(
            Auction::try_new(auction_create(), Duration::MAX),
            Err(AddAuctionError::ExpirationOutOfRange)
        );
    }

    #[test]
    fn test_expiration_time_after_caps_at_max() {
        let start = datetime!(9999-12-31 23:59:00 UTC);
        assert_eq!(
            expiration_time_after(start, Duration::from_secs(59)),
            Some(datetime!(9999-12-31 23:59:59 UTC))
        );
        assert_eq!(expiration_time_after(start, Duration::from_secs(60)), None);
    }
}
