use {
    super::{
        close_auction::CloseAuctionInput,
        Service,
    },
    crate::auction::{
        entities,
        repository::Repository,
    },
    std::sync::Arc,
    time::OffsetDateTime,
};

/// Removes the auction from the in-memory expirations when the owning task ends,
/// whether it fired, was cancelled, panicked or was dropped before running.
pub(super) struct ExpirationGuard {
    repo:       Arc<Repository>,
    auction_id: entities::AuctionId,
}

impl ExpirationGuard {
    pub fn new(repo: Arc<Repository>, auction_id: entities::AuctionId) -> Self {
        Self { repo, auction_id }
    }
}

impl Drop for ExpirationGuard {
    fn drop(&mut self) {
        self.repo.remove_in_memory_expiration(&self.auction_id);
    }
}

pub struct HandleAuctionExpirationInput {
    pub auction_id:      entities::AuctionId,
    pub expiration_time: OffsetDateTime,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub(super) async fn handle_auction_expiration(&self, input: HandleAuctionExpirationInput) {
        // Negative when the auction already expired, e.g. discovered late by the reconciler.
        let remaining: std::time::Duration = (input.expiration_time - OffsetDateTime::now_utc())
            .try_into()
            .unwrap_or_default();
        tracing::debug!(remaining = ?remaining, "Waiting for auction expiration");

        tokio::select! {
            biased;
            _ = self.exit_token.cancelled() => {
                tracing::info!("Auction expiration task cancelled");
                return;
            }
            _ = tokio::time::sleep(remaining) => {}
        }

        match self
            .close_auction(CloseAuctionInput {
                auction_id: input.auction_id,
            })
            .await
        {
            Ok(()) => tracing::info!("Auction closed"),
            Err(entities::CloseAuctionError::AlreadyClosed) => {
                tracing::info!("Auction already closed")
            }
            Err(entities::CloseAuctionError::Store(err)) => {
                tracing::error!(
                    error = ?err,
                    "Failed to close auction, leaving it open for the reconciler"
                )
            }
        }
    }
}
