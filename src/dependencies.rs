use std::sync::OnceLock;

use sqlx::SqlitePool;

use crate::{config::Config, database};

pub fn config() -> &'static Config {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	CONFIG.get_or_init(Config::new)
}

/// Pool for the configured database, with migrations applied.
pub async fn connection_pool() -> anyhow::Result<SqlitePool> {
	let config = config();
	let pool = database::connection_pool(&config.database_url, config.max_connections).await?;
	database::migrate(&pool).await?;
	Ok(pool)
}
