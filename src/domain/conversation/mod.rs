pub mod entity;
pub mod schemas;

use serde::Serialize;

pub use self::entity::ConversationMessage;

/// Every message sharing one conversation id, oldest first.
#[derive(Debug, Serialize)]
pub struct Conversation {
	#[serde(rename = "id")]
	pub conversation_id: String,
	pub messages: Vec<ConversationMessage>,
}

impl Conversation {
	pub fn new(
		conversation_id: impl Into<String>,
		messages: Vec<ConversationMessage>,
	) -> Self {
		Self {
			conversation_id: conversation_id.into(),
			messages,
		}
	}
}
