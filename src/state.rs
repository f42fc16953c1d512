use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{adapters::repositories::Repository, domain::conversation::Conversation, services::templates::Templates};

/// Shared by every request. Cloned per request, so all fields are handles.
#[derive(Clone)]
pub struct BoardState {
	pub conversations: Repository<Conversation>,
	pub templates: Arc<Templates>,
}

impl BoardState {
	pub fn new(pool: SqlitePool) -> Result<Self, minijinja::Error> {
		Ok(Self {
			conversations: Repository::new(pool),
			templates: Arc::new(Templates::new()?),
		})
	}
}
