use clap::Parser;

/// Every option can come from a flag or from the environment (`.env` included).
#[derive(Debug, Clone, Parser)]
#[command(name = "web", version, about = "Message board web server")]
pub struct Config {
	/// Address the server listens on
	#[arg(long, env = "SERVER_IP_PORT", default_value = "0.0.0.0:8000")]
	pub server_ip_port: String,

	#[arg(long, env = "DATABASE_URL", default_value = "sqlite://board.db")]
	pub database_url: String,

	#[arg(long, env = "MAX_CONNECTIONS", default_value_t = 5)]
	pub max_connections: u32,

	/// Filter used when `RUST_LOG` is not set
	#[arg(long, env = "LOG_LEVEL", default_value = "info")]
	pub log_level: String,

	/// Comma separated list of origins allowed by CORS
	#[arg(long, env = "ALLOW_ORIGINS", default_value = "http://localhost:8000")]
	pub allow_origins: String,

	/// Directory served for any GET path without a route
	#[arg(long, env = "STATIC_DIR", default_value = "./web/static")]
	pub static_dir: String,
}

impl Config {
	pub fn new() -> Self {
		dotenv::dotenv().ok();
		Config::parse()
	}

	pub fn allow_origins(&self) -> impl Iterator<Item = &str> {
		self.allow_origins.split(',').map(str::trim).filter(|origin| !origin.is_empty())
	}
}
