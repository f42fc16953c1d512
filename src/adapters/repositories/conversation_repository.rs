use crate::{
	domain::conversation::{schemas::NewMessage, Conversation, ConversationMessage},
	services::response::ServiceError,
};

use super::Repository;

impl Repository<Conversation> {
	/// Every conversation id that has at least one message.
	pub async fn list_conversation_ids(&self) -> Result<Vec<String>, ServiceError> {
		sqlx::query_scalar::<_, String>("SELECT DISTINCT conversation_id FROM conversations ORDER BY conversation_id")
			.fetch_all(&self.pool)
			.await
			.map_err(ServiceError::Query)
	}

	pub async fn get(
		&self,
		conversation_id: &str,
	) -> Result<Conversation, ServiceError> {
		let messages = sqlx::query_as::<_, ConversationMessage>(
			"SELECT id, conversation_id, sender, message, created_date \
			 FROM conversations WHERE conversation_id = ?1 ORDER BY id",
		)
		.bind(conversation_id)
		.fetch_all(&self.pool)
		.await
		.map_err(ServiceError::Query)?;

		if messages.is_empty() {
			tracing::info!(conversation_id, "invalid conversation id");
			return Err(ServiceError::ConversationNotFound(conversation_id.to_string()));
		}
		Ok(Conversation::new(conversation_id, messages))
	}

	/// Stores one message; the database assigns its id and creation time.
	pub async fn add(
		&self,
		new_message: &NewMessage,
	) -> Result<ConversationMessage, ServiceError> {
		sqlx::query_as::<_, ConversationMessage>(
			"INSERT INTO conversations (conversation_id, sender, message) VALUES (?1, ?2, ?3) \
			 RETURNING id, conversation_id, sender, message, created_date",
		)
		.bind(&new_message.conversation_id)
		.bind(&new_message.sender)
		.bind(&new_message.message)
		.fetch_one(&self.pool)
		.await
		.map_err(ServiceError::Insert)
	}
}

#[cfg(test)]
mod test {
	use crate::{
		adapters::repositories::Repository,
		database::memory_pool,
		domain::conversation::{schemas::NewMessage, Conversation},
		services::response::ServiceError,
	};

	fn new_message(
		conversation_id: &str,
		sender: &str,
		message: &str,
	) -> NewMessage {
		NewMessage {
			conversation_id: conversation_id.to_string(),
			sender: sender.to_string(),
			message: message.to_string(),
			redirect: false,
		}
	}

	#[tokio::test]
	async fn test_add_then_get_keeps_insertion_order() {
		'_given: {
			let repository = Repository::<Conversation>::new(memory_pool().await);
			repository.add(&new_message("abc", "Migo", "first")).await.unwrap();
			repository.add(&new_message("xyz", "Mago", "elsewhere")).await.unwrap();
			repository.add(&new_message("abc", "Mago", "second")).await.unwrap();

			'_when: {
				let conversation = repository.get("abc").await.unwrap();

				'_then: {
					assert_eq!(conversation.conversation_id, "abc");
					let texts: Vec<_> = conversation.messages.iter().map(|m| (m.sender.as_str(), m.message.as_str())).collect();
					assert_eq!(texts, vec![("Migo", "first"), ("Mago", "second")]);
					assert!(conversation.messages[0].id < conversation.messages[1].id);
				}
			}
		}
	}

	#[tokio::test]
	async fn test_add_returns_stored_row() {
		let repository = Repository::<Conversation>::new(memory_pool().await);

		let stored = repository.add(&new_message("abc", "Migo", "it's a 'quoted' message")).await.unwrap();
		assert_eq!(stored.conversation_id, "abc");
		assert_eq!(stored.message, "it's a 'quoted' message");
		assert!(stored.id > 0);
	}

	#[tokio::test]
	async fn test_unknown_conversation_is_not_found() {
		let repository = Repository::<Conversation>::new(memory_pool().await);

		let err = repository.get("missing").await.unwrap_err();
		assert!(matches!(err, ServiceError::ConversationNotFound(id) if id == "missing"));
	}

	#[tokio::test]
	async fn test_conversation_ids_are_distinct() {
		let repository = Repository::<Conversation>::new(memory_pool().await);
		assert!(repository.list_conversation_ids().await.unwrap().is_empty());

		for id in ["b", "a", "b"] {
			repository.add(&new_message(id, "Migo", "hello")).await.unwrap();
		}

		assert_eq!(repository.list_conversation_ids().await.unwrap(), vec!["a".to_string(), "b".to_string()]);
	}
}
