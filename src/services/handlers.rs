use axum::response::Html;
use minijinja::context;
use serde::Serialize;

use crate::{
	domain::conversation::{schemas::NewMessage, Conversation, ConversationMessage},
	state::BoardState,
};

use super::response::ServiceError;

/// One method per request kind: fetch or store, then render.
pub struct MessageHandler;
impl MessageHandler {
	pub fn index<R: Serialize>(
		state: &BoardState,
		routes: &[R],
	) -> Result<Html<String>, ServiceError> {
		state.templates.render("index.html", context! { routes => routes })
	}

	pub async fn conversation_list(state: &BoardState) -> Result<Html<String>, ServiceError> {
		let conversations = state.conversations.list_conversation_ids().await?;
		state.templates.render("conversation_list.html", context! { conversations => conversations })
	}

	pub async fn conversation_page(
		state: &BoardState,
		conversation_id: &str,
	) -> Result<Html<String>, ServiceError> {
		let conversation = state.conversations.get(conversation_id).await?;
		state.templates.render(
			"conversation.html",
			context! {
				conversation_id => conversation.conversation_id,
				messages => conversation.messages,
			},
		)
	}

	pub async fn conversation_json(
		state: &BoardState,
		conversation_id: &str,
	) -> Result<Conversation, ServiceError> {
		state.conversations.get(conversation_id).await
	}

	pub fn message_form(state: &BoardState) -> Result<Html<String>, ServiceError> {
		state.templates.render("messages.html", context! {})
	}

	pub async fn submit_message(
		state: &BoardState,
		new_message: &NewMessage,
	) -> Result<ConversationMessage, ServiceError> {
		let stored = state.conversations.add(new_message).await?;
		tracing::info!(
			conversation_id = %stored.conversation_id,
			message_id = stored.id,
			"message stored"
		);
		Ok(stored)
	}
}
