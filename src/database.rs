use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the pool, creating the database file when it does not exist yet.
pub async fn connection_pool(
	url: &str,
	max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
	let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
	let pool = SqlitePoolOptions::new()
		.max_connections(max_connections)
		.connect_with(options)
		.await?;
	tracing::debug!(url, max_connections, "connection pool ready");
	Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
	MIGRATOR.run(pool).await?;
	tracing::info!("migrations applied");
	Ok(())
}

/// In-memory database holding the schema. Single connection, since every
/// new `:memory:` connection would see an empty database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
	let pool = connection_pool("sqlite::memory:", 1).await.unwrap();
	migrate(&pool).await.unwrap();
	pool
}
