use clap::Args;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Database Options")]
#[group(id = "Database")]
pub struct Options {
    /// database url for persistent storage.
    #[arg(long = "database-url")]
    #[arg(env = "DATABASE_URL")]
    pub database_url:             String,
    /// Maximum number of connections in the database pool.
    #[arg(long = "database-max-connections")]
    #[arg(default_value_t = DEFAULT_MAX_CONNECTIONS)]
    #[arg(env = "DATABASE_MAX_CONNECTIONS")]
    pub database_max_connections: u32,
}
