use {
    crate::{
        auction::service::Service,
        config::{
            Config,
            MigrateOptions,
            RunOptions,
        },
        kernel::db::DB,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    tokio::task::JoinHandle,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<DB> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))
}

pub async fn run_migrations(migrate_options: MigrateOptions) -> anyhow::Result<()> {
    let pool = connect(
        &migrate_options.database.database_url,
        migrate_options.database.database_max_connections,
    )
    .await?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;
    tracing::info!("Migrations applied");
    Ok(())
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let exit_token = CancellationToken::new();
    tokio::spawn({
        let exit_token = exit_token.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?err, "Failed to listen for the shutdown signal");
                return;
            }
            tracing::info!("Shut down signal received, waiting for tasks...");
            exit_token.cancel();
        }
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;
    let auction_config = config.auction;
    if auction_config.is_reconciliation_slower_than_duration() {
        tracing::warn!(
            duration = ?auction_config.duration,
            interval = ?auction_config.reconciler.interval,
            "Reconciliation interval is longer than the auction duration, orphaned auctions may stay open up to a full interval past their expiration"
        );
    }

    let pool = connect(
        &run_options.database.database_url,
        run_options.database.database_max_connections,
    )
    .await?;

    let service = Service::new(
        pool,
        auction_config.clone().into(),
        TaskTracker::new(),
        exit_token.clone(),
    );

    let reconciliation_loop = if auction_config.reconciler.enabled {
        Some(tokio::spawn({
            let service = service.clone();
            async move { service.run_reconciliation_loop().await }
        }))
    } else {
        tracing::info!("Skipping auction expiration reconciler...");
        None
    };

    let result = wait_for_exit(&exit_token, reconciliation_loop).await;
    if let Err(err) = &result {
        tracing::error!(error = ?err, "Shutting down after the reconciler stopped");
    }
    service.shutdown().await;
    result
}

/// Resolves on the shutdown signal. A reconciler that stops first, e.g. by panicking,
/// cancels the exit token and is reported as an error.
async fn wait_for_exit(
    exit_token: &CancellationToken,
    reconciliation_loop: Option<JoinHandle<()>>,
) -> anyhow::Result<()> {
    let Some(mut reconciliation_loop) = reconciliation_loop else {
        exit_token.cancelled().await;
        return Ok(());
    };

    tokio::select! {
        biased;
        _ = exit_token.cancelled() => reconciliation_loop
            .await
            .map_err(|err| anyhow!("Auction expiration reconciler failed: {:?}", err)),
        result = &mut reconciliation_loop => {
            exit_token.cancel();
            match result {
                Ok(()) => Err(anyhow!("Auction expiration reconciler stopped before shutdown")),
                Err(err) => Err(anyhow!("Auction expiration reconciler failed: {:?}", err)),
            }
        }
    }
}
