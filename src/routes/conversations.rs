use axum::{
	extract::{Path, State},
	response::{Html, IntoResponse, Response},
	Json,
};

use crate::{
	services::{
		handlers::MessageHandler,
		response::{JsonError, ServiceError},
	},
	state::BoardState,
};

const JSON_SUFFIX: &str = ".json";

pub async fn list(State(state): State<BoardState>) -> Result<Html<String>, ServiceError> {
	MessageHandler::conversation_list(&state).await
}

/// `/conversations/{id}` renders the page, `/conversations/{id}.json` the JSON view.
pub async fn show(
	State(state): State<BoardState>,
	Path(conversation_id): Path<String>,
) -> Response {
	match conversation_id.strip_suffix(JSON_SUFFIX) {
		Some(conversation_id) => MessageHandler::conversation_json(&state, conversation_id)
			.await
			.map(Json)
			.map_err(JsonError::from)
			.into_response(),
		None => MessageHandler::conversation_page(&state, &conversation_id).await.into_response(),
	}
}
