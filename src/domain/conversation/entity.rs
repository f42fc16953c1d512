use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

pub(crate) const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the `conversations` table.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, sqlx::FromRow)]
pub struct ConversationMessage {
	#[serde(skip_serializing)]
	pub id: i64,
	#[serde(skip_serializing)]
	pub conversation_id: String,
	pub sender: String,
	pub message: String,
	#[serde(rename = "created", serialize_with = "serialize_created")]
	pub created_date: NaiveDateTime,
}

fn serialize_created<S: Serializer>(
	value: &NaiveDateTime,
	serializer: S,
) -> Result<S::Ok, S::Error> {
	serializer.collect_str(&value.format(CREATED_FORMAT))
}
