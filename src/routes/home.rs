use axum::{extract::State, response::Html};

use super::ROUTES;
use crate::{
	services::{handlers::MessageHandler, response::ServiceError},
	state::BoardState,
};

pub async fn index(State(state): State<BoardState>) -> Result<Html<String>, ServiceError> {
	MessageHandler::index(&state, ROUTES)
}
