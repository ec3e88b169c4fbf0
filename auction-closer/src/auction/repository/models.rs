#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::db::DB,
    async_trait::async_trait,
    sqlx::{
        FromRow,
        Postgres,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Open,
    Closed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Open => AuctionStatus::Open,
            entities::AuctionStatus::Closed => AuctionStatus::Closed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Open => entities::AuctionStatus::Open,
            AuctionStatus::Closed => entities::AuctionStatus::Closed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Auction {
    pub id:              entities::AuctionId,
    pub product_name:    String,
    pub category:        String,
    pub description:     String,
    pub condition:       ProductCondition,
    pub status:          AuctionStatus,
    pub creation_time:   PrimitiveDateTime,
    pub expiration_time: PrimitiveDateTime,
}

fn to_primitive(time: OffsetDateTime) -> PrimitiveDateTime {
    let time = time.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(time.date(), time.time())
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:              auction.id,
            product_name:    auction.product_name.clone(),
            category:        auction.category.clone(),
            description:     auction.description.clone(),
            condition:       auction.condition.into(),
            status:          auction.status.into(),
            creation_time:   to_primitive(auction.creation_time),
            expiration_time: to_primitive(auction.expiration_time),
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:              auction.id,
            product_name:    auction.product_name,
            category:        auction.category,
            description:     auction.description,
            condition:       auction.condition.into(),
            status:          auction.status.into(),
            creation_time:   auction.creation_time.assume_offset(UtcOffset::UTC),
            expiration_time: auction.expiration_time.assume_offset(UtcOffset::UTC),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &Auction) -> Result<(), entities::StoreError>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<Auction, entities::StoreError>;
    async fn get_auctions(
        &self,
        filter: entities::AuctionFilter,
    ) -> Result<Vec<Auction>, entities::StoreError>;
    /// Compare-and-swap on the status column. Only applies when the stored status still equals `expected`.
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        expected: AuctionStatus,
        new: AuctionStatus,
    ) -> Result<entities::StatusUpdate, entities::StoreError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(name = "db_add_auction", fields(result = "success"), skip_all)]
    async fn add_auction(&self, auction: &Auction) -> Result<(), entities::StoreError> {
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time, expiration_time) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(auction.id)
        .bind(&auction.product_name)
        .bind(&auction.category)
        .bind(&auction.description)
        .bind(auction.condition)
        .bind(auction.status)
        .bind(auction.creation_time)
        .bind(auction.expiration_time)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), auction_id = %auction.id, "DB: Failed to insert auction");
            entities::StoreError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(name = "db_get_auction", fields(result = "success"), skip_all)]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<Auction, entities::StoreError> {
        sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => entities::StoreError::AuctionNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = auction_id.to_string(),
                        "DB: Failed to get auction"
                    );
                    entities::StoreError::TemporarilyUnavailable
                }
            })
    }

    #[instrument(name = "db_get_auctions", fields(result = "success"), skip_all)]
    async fn get_auctions(
        &self,
        filter: entities::AuctionFilter,
    ) -> Result<Vec<Auction>, entities::StoreError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        if let Some(category) = filter.category.clone() {
            query.push(" AND category = ");
            query.push_bind(category);
        }
        if let Some(product_name) = filter.product_name.clone() {
            query.push(" AND product_name ILIKE '%' || ");
            query.push_bind(escape_like_pattern(&product_name));
            query.push(" || '%' ESCAPE '\\'");
        }
        query.push(" ORDER BY creation_time ASC");
        query
            .build_query_as::<Auction>()
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), filter = ?filter, "DB: Failed to fetch auctions");
                entities::StoreError::TemporarilyUnavailable
            })
    }

    #[instrument(name = "db_update_auction_status", fields(result = "success"), skip_all)]
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        expected: AuctionStatus,
        new: AuctionStatus,
    ) -> Result<entities::StatusUpdate, entities::StoreError> {
        let rows_affected =
            sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
                .bind(new)
                .bind(auction_id)
                .bind(expected)
                .execute(self)
                .await
                .map_err(|e| {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = auction_id.to_string(),
                        "DB: Failed to update auction status"
                    );
                    entities::StoreError::TemporarilyUnavailable
                })?
                .rows_affected();
        Ok(match rows_affected {
            0 => entities::StatusUpdate::NotApplied,
            _ => entities::StatusUpdate::Updated,
        })
    }
}

/// Makes `%`, `_` and `\` match themselves inside an `ILIKE ... ESCAPE '\'` pattern.
fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::macros::datetime,
    };

    #[test]
    fn test_auction_model_keeps_utc_instants() {
        let auction = entities::Auction {
            id:              entities::AuctionId::new_v4(),
            product_name:    "Product 1".to_string(),
            category:        "Category 1".to_string(),
            description:     "Description 1".to_string(),
            condition:       entities::ProductCondition::Used,
            status:          entities::AuctionStatus::Open,
            creation_time:   datetime!(2026-10-18 10:00 +02:00),
            expiration_time: datetime!(2026-10-18 10:05 +02:00),
        };
        let model = Auction::from(&auction);
        assert_eq!(model.creation_time, datetime!(2026-10-18 08:00));
        assert_eq!(model.status, AuctionStatus::Open);
        assert_eq!(entities::Auction::from(model), auction);
    }

    #[test]
    fn test_escape_like_pattern_keeps_wildcards_literal() {
        assert_eq!(escape_like_pattern("phone"), "phone");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b\\c"), "a\\_b\\\\c");
    }
}
