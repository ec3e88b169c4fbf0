use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The auction was not found
    #[error("auction with the specified id was not found")]
    AuctionNotFound,
    /// The record store could not serve the request
    #[error("the record store is temporarily unavailable")]
    TemporarilyUnavailable,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CloseAuctionError {
    /// Another closer won the race, or the auction was never open
    #[error("auction already closed")]
    AlreadyClosed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddAuctionError {
    /// The configured duration pushes the expiration past what the record store holds
    #[error("auction expiration time is out of range")]
    ExpirationOutOfRange,
    #[error(transparent)]
    Store(#[from] StoreError),
}
