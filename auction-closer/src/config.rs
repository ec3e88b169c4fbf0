use {
    crate::auction::{
        entities,
        service,
    },
    anyhow::{
        anyhow,
        Result,
    },
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::{
        fs,
        time::Duration,
    },
    time::OffsetDateTime,
};

mod database;

// `Options` is a structup definition to provide clean command-line args for the auction closer.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction expiration service.
    Run(RunOptions),
    /// Apply the database migrations and exit.
    Migrate(MigrateOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Database Options
    #[command(flatten)]
    pub database: database::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
pub struct MigrateOptions {
    #[command(flatten)]
    pub database: database::Options,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file containing the auction lifetime and reconciler settings
    #[arg(long = "config")]
    #[arg(env = "AUCTION_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auction: AuctionConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        Self::parse(&yaml_content)
    }

    pub fn parse(yaml_content: &str) -> Result<Config> {
        let config: Config = serde_yaml::from_str(yaml_content)?;
        config.auction.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AuctionConfig {
    /// Time between the creation of an auction and its closing.
    #[serde(with = "humantime_serde", default = "AuctionConfig::default_duration")]
    pub duration: Duration,

    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

impl AuctionConfig {
    pub fn default_duration() -> Duration {
        Duration::from_secs(5 * 60)
    }

    fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(anyhow!("auction.duration must be greater than zero"));
        }
        if entities::expiration_time_after(OffsetDateTime::now_utc(), self.duration).is_none() {
            return Err(anyhow!(
                "auction.duration pushes the expiration past {}",
                entities::MAX_EXPIRATION_TIME
            ));
        }
        if self.reconciler.interval.is_zero() {
            return Err(anyhow!("auction.reconciler.interval must be greater than zero"));
        }
        Ok(())
    }

    /// A sweep slower than the auction lifetime lets an orphaned auction stay open for
    /// up to a full interval past its expiration.
    pub fn is_reconciliation_slower_than_duration(&self) -> bool {
        self.reconciler.enabled && self.reconciler.interval > self.duration
    }
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            duration:   Self::default_duration(),
            reconciler: ReconcilerConfig::default(),
        }
    }
}

impl From<AuctionConfig> for service::Config {
    fn from(config: AuctionConfig) -> Self {
        Self {
            auction_duration:        config.duration,
            reconciliation_interval: config.reconciler.interval,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ReconcilerConfig {
    /// Disable on every instance but one when several processes share the same database.
    #[serde(default = "ReconcilerConfig::default_enabled")]
    pub enabled: bool,

    #[serde(with = "humantime_serde", default = "ReconcilerConfig::default_interval")]
    pub interval: Duration,
}

impl ReconcilerConfig {
    pub fn default_enabled() -> bool {
        true
    }

    pub fn default_interval() -> Duration {
        Duration::from_secs(5 * 60)
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            enabled:  Self::default_enabled(),
            interval: Self::default_interval(),
        }
    }
}
