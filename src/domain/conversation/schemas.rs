use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::ConversationMessage;
use crate::services::response::ServiceError;

/// Bytes of randomness behind a generated conversation id.
const CONVERSATION_TOKEN_BYTES: usize = 8;

/// Everything except the unreserved characters `A-Z a-z 0-9 - _ . ~`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Urlencoded body of `POST /messages`.
#[derive(Debug, Default, Deserialize)]
pub struct MessageForm {
	#[serde(default)]
	pub conversation_id: Option<String>,
	#[serde(default)]
	pub sender: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub redirect: Option<String>,
}

/// JSON body of `POST /messages`.
#[derive(Debug, Default, Deserialize)]
pub struct MessageJson {
	#[serde(default)]
	pub conversation_id: Option<String>,
	#[serde(default)]
	pub sender: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub redirect: Option<bool>,
}

/// A submission that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
	pub conversation_id: String,
	pub sender: String,
	pub message: String,
	pub redirect: bool,
}

/// Answer to a successful JSON submission.
#[derive(Debug, Serialize)]
pub struct MessageCreated {
	pub id: String,
	pub message: ConversationMessage,
}

impl From<ConversationMessage> for MessageCreated {
	fn from(value: ConversationMessage) -> Self {
		Self {
			id: value.conversation_id.clone(),
			message: value,
		}
	}
}

impl MessageForm {
	/// Fills fields the body left out from `other`, the query string.
	pub fn or(
		self,
		other: MessageForm,
	) -> Self {
		Self {
			conversation_id: self.conversation_id.or(other.conversation_id),
			sender: self.sender.or(other.sender),
			message: self.message.or(other.message),
			redirect: self.redirect.or(other.redirect),
		}
	}

	pub fn validate(self) -> Result<NewMessage, ServiceError> {
		let redirect = match self.redirect.as_deref() {
			None | Some("") => false,
			Some(raw) => parse_bool(raw).ok_or_else(|| ServiceError::InvalidRedirect(raw.to_string()))?,
		};
		NewMessage::build(self.conversation_id, self.sender, self.message, redirect)
	}
}

impl MessageJson {
	pub fn validate(self) -> Result<NewMessage, ServiceError> {
		NewMessage::build(self.conversation_id, self.sender, self.message, self.redirect.unwrap_or(false))
	}
}

impl NewMessage {
	fn build(
		conversation_id: Option<String>,
		sender: Option<String>,
		message: Option<String>,
		redirect: bool,
	) -> Result<Self, ServiceError> {
		let conversation_id = conversation_id.filter(|id| !id.is_empty()).unwrap_or_else(conversation_token);
		let sender = sender.filter(|s| !s.trim().is_empty()).ok_or(ServiceError::EmptySender)?;
		let message = message.filter(|m| !m.trim().is_empty()).ok_or(ServiceError::EmptyMessage)?;

		Ok(Self {
			conversation_id,
			sender,
			message,
			redirect,
		})
	}

	/// Where a browser lands after a redirecting submission.
	pub fn location(&self) -> String {
		format!("/conversations/{}", path_segment(&self.conversation_id))
	}
}

/// Encodes a conversation id so it stays a single path segment.
pub fn path_segment(raw: &str) -> String {
	utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Accepts the same literals as a conventional `ParseBool`.
pub fn parse_bool(raw: &str) -> Option<bool> {
	match raw {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
		_ => None,
	}
}

/// Fresh conversation id: random bytes as lowercase hex.
pub fn conversation_token() -> String {
	let mut bytes = [0u8; CONVERSATION_TOKEN_BYTES];
	rand::thread_rng().fill_bytes(&mut bytes);
	bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod test {
	use super::*;

	fn form(
		conversation_id: Option<&str>,
		sender: Option<&str>,
		message: Option<&str>,
		redirect: Option<&str>,
	) -> MessageForm {
		MessageForm {
			conversation_id: conversation_id.map(Into::into),
			sender: sender.map(Into::into),
			message: message.map(Into::into),
			redirect: redirect.map(Into::into),
		}
	}

	#[test]
	fn test_blank_sender_is_rejected_before_message() {
		let err = form(Some("abc"), Some("   "), None, None).validate().unwrap_err();
		assert!(matches!(err, ServiceError::EmptySender));

		let err = form(Some("abc"), Some("Migo"), Some("\t\n"), None).validate().unwrap_err();
		assert!(matches!(err, ServiceError::EmptyMessage));
	}

	#[test]
	fn test_values_are_stored_untrimmed() {
		let new_message = form(Some("abc"), Some(" Migo "), Some(" hi "), None).validate().unwrap();
		assert_eq!(
			new_message,
			NewMessage {
				conversation_id: "abc".into(),
				sender: " Migo ".into(),
				message: " hi ".into(),
				redirect: false,
			}
		);
	}

	#[test]
	fn test_missing_conversation_id_is_generated() {
		let new_message = form(Some(""), Some("Migo"), Some("hi"), None).validate().unwrap();
		assert_eq!(new_message.conversation_id.len(), 16);
		assert!(new_message.conversation_id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

		let other = MessageJson {
			sender: Some("Migo".into()),
			message: Some("hi".into()),
			..Default::default()
		}
		.validate()
		.unwrap();
		assert_ne!(new_message.conversation_id, other.conversation_id);
	}

	#[test]
	fn test_redirect_flag() {
		'_given: {
			let accepted = [("true", true), ("1", true), ("T", true), ("False", false), ("0", false), ("", false)];

			'_then: {
				for (raw, expected) in accepted {
					let new_message = form(Some("abc"), Some("Migo"), Some("hi"), Some(raw)).validate().unwrap();
					assert_eq!(new_message.redirect, expected, "redirect={raw}");
				}

				let err = form(Some("abc"), Some("Migo"), Some("hi"), Some("yes")).validate().unwrap_err();
				assert!(matches!(err, ServiceError::InvalidRedirect(raw) if raw == "yes"));
			}
		}
	}

	#[test]
	fn test_location_points_at_conversation_page() {
		let new_message = form(Some("abc"), Some("Migo"), Some("hi"), Some("true")).validate().unwrap();
		assert_eq!(new_message.location(), "/conversations/abc");

		let new_message = form(Some("a b/ü"), Some("Migo"), Some("hi"), None).validate().unwrap();
		assert_eq!(new_message.location(), "/conversations/a%20b%2F%C3%BC");
	}

	#[test]
	fn test_path_segment_keeps_unreserved_characters() {
		assert_eq!(path_segment("Az09-_.~"), "Az09-_.~");
		assert_eq!(path_segment("a/b c?&#"), "a%2Fb%20c%3F%26%23");
	}

	#[test]
	fn test_body_fields_win_over_query_fields() {
		let merged = form(None, Some("Migo"), None, None).or(form(Some("abc"), Some("Mago"), Some("hi"), None));

		assert_eq!(merged.conversation_id.as_deref(), Some("abc"));
		assert_eq!(merged.sender.as_deref(), Some("Migo"));
		assert_eq!(merged.message.as_deref(), Some("hi"));
		assert_eq!(merged.redirect, None);
	}
}
