use {
    super::Service,
    tokio::time::MissedTickBehavior,
};

impl Service {
    /// Runs until the exit token is cancelled. The first sweep happens immediately.
    pub async fn run_reconciliation_loop(&self) {
        tracing::info!(
            interval = ?self.config.reconciliation_interval,
            "Starting auction expiration reconciler..."
        );
        let mut reconciliation_interval =
            tokio::time::interval(self.config.reconciliation_interval);
        reconciliation_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.exit_token.cancelled() => break,
                _ = reconciliation_interval.tick() => {
                    if let Err(err) = self.reconcile_auctions().await {
                        tracing::error!(error = ?err, "Failed to reconcile auction expirations, retrying on next tick");
                    }
                }
            }
        }
        tracing::info!("Shutting down auction expiration reconciler...");
    }

    /// Cancels every pending expiration wait and waits for running close transitions to finish.
    pub async fn shutdown(&self) {
        self.exit_token.cancel();
        self.task_tracker.close();
        self.task_tracker.wait().await;
        tracing::info!("All auction expiration tasks finished");
    }
}
