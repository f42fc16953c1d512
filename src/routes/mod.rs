mod conversations;
mod home;
mod messages;

use axum::{
	http::{header::InvalidHeaderValue, HeaderValue, Method},
	routing::get,
	Router,
};
use serde::Serialize;
use tower::Layer;
use tower_http::{
	cors::CorsLayer,
	normalize_path::{NormalizePath, NormalizePathLayer},
	services::ServeDir,
	trace::TraceLayer,
};

use crate::{config::Config, state::BoardState};

/// An entry of the homepage's route listing.
#[derive(Debug, Serialize)]
pub struct Route {
	pub url: &'static str,
	pub description: &'static str,
	pub methods: &'static str,
}

pub const ROUTES: &[Route] = &[
	Route {
		url: "/",
		description: "Homepage",
		methods: "GET",
	},
	Route {
		url: "/conversations",
		description: "Show conversations",
		methods: "GET",
	},
	Route {
		url: "/conversations/{conversation_id}.json",
		description: "View a Conversation as JSON",
		methods: "GET",
	},
	Route {
		url: "/conversations/{conversation_id}",
		description: "View a Conversation",
		methods: "GET",
	},
	Route {
		url: "/messages",
		description: "Message Input Form",
		methods: "GET",
	},
	Route {
		url: "/messages",
		description: "Message POST Handler",
		methods: "POST",
	},
];

pub fn create_routes(state: BoardState) -> Router {
	Router::new()
		.route("/", get(home::index))
		.route("/conversations", get(conversations::list))
		.route("/conversations/{conversation_id}", get(conversations::show))
		.route("/messages", get(messages::form).post(messages::submit))
		.with_state(state)
}

/// The routes plus the static file fallback, CORS, request tracing and
/// trailing-slash trimming.
pub fn create_app(
	state: BoardState,
	config: &Config,
) -> Result<NormalizePath<Router>, InvalidHeaderValue> {
	let origins = config.allow_origins().map(HeaderValue::from_str).collect::<Result<Vec<_>, _>>()?;

	let routers = create_routes(state)
		.fallback_service(ServeDir::new(&config.static_dir))
		.layer(CorsLayer::new().allow_origin(origins).allow_methods([Method::GET, Method::POST]))
		.layer(TraceLayer::new_for_http());
	Ok(NormalizePathLayer::trim_trailing_slash().layer(routers))
}
