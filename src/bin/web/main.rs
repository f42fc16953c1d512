use std::net::SocketAddr;

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board::{
	dependencies::{config, connection_pool},
	routes::create_app,
	state::BoardState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	println!("Environment Variable Is Being Set...");
	let config = config();

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("{},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!(database_url = %config.database_url, "connections are being pooled");
	let pool = connection_pool().await?;
	let state = BoardState::new(pool).context("loading templates")?;

	let app = create_app(state, config).context("invalid ALLOW_ORIGINS")?;

	let addr: SocketAddr = config.server_ip_port.parse().context("invalid SERVER_IP_PORT")?;
	let listener = tokio::net::TcpListener::bind(addr).await?;
	tracing::info!(%addr, "web server listening");

	axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("web server stopped");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = tokio::signal::ctrl_c().await {
			tracing::warn!(error = %err, "failed to install CTRL+C handler");
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};
		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(err) => tracing::warn!(error = %err, "failed to install SIGTERM handler"),
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}

	tracing::info!("shutdown signal received");
}
