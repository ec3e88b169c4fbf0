use {
    super::repository::{
        Database,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod add_auction;
pub mod close_auction;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod handle_auction_expiration;
pub mod on_auction_created;
pub mod reconcile_auctions;
pub mod schedule_auction_expiration;
pub mod workers;

#[derive(Clone, Debug)]
pub struct Config {
    /// Lifetime of a newly created auction.
    pub auction_duration:        Duration,
    pub reconciliation_interval: Duration,
}

pub struct ServiceInner {
    repo:         Arc<Repository>,
    config:       Config,
    task_tracker: TaskTracker,
    exit_token:   CancellationToken,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        config: Config,
        task_tracker: TaskTracker,
        exit_token: CancellationToken,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(db)),
            config,
            task_tracker,
            exit_token,
        }))
    }
}
