use axum::{
	extract::{FromRequest, Query, Request, State},
	http::{header, HeaderMap, StatusCode},
	response::{Html, IntoResponse, Response},
	Form, Json,
};

use crate::{
	domain::conversation::schemas::{MessageCreated, MessageForm, MessageJson, NewMessage},
	services::{
		handlers::MessageHandler,
		response::{JsonError, ServiceError},
	},
	state::BoardState,
};

/// Body of `POST /messages`. `Content-Type: application/json` selects the JSON
/// shape; anything else goes through the urlencoded form parser, with query
/// string values filling fields the body leaves out.
#[derive(Debug)]
pub enum MessageSubmission {
	Form(MessageForm),
	Json(MessageJson),
}

impl<S> FromRequest<S> for MessageSubmission
where
	S: Send + Sync,
{
	type Rejection = Response;

	async fn from_request(
		req: Request,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		if is_json(req.headers()) {
			let Json(body) = Json::<MessageJson>::from_request(req, state)
				.await
				.map_err(|rejection| JsonError(ServiceError::MalformedBody(rejection.body_text())).into_response())?;
			Ok(Self::Json(body))
		} else {
			let Query(query) = Query::<MessageForm>::try_from_uri(req.uri())
				.map_err(|rejection| ServiceError::MalformedBody(rejection.body_text()).into_response())?;
			let Form(body) = Form::<MessageForm>::from_request(req, state)
				.await
				.map_err(|rejection| ServiceError::MalformedBody(rejection.body_text()).into_response())?;
			Ok(Self::Form(body.or(query)))
		}
	}
}

fn is_json(headers: &HeaderMap) -> bool {
	headers
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

pub async fn form(State(state): State<BoardState>) -> Result<Html<String>, ServiceError> {
	MessageHandler::message_form(&state)
}

pub async fn submit(
	State(state): State<BoardState>,
	submission: MessageSubmission,
) -> Response {
	match submission {
		MessageSubmission::Form(form) => submit_form(&state, form).await.into_response(),
		MessageSubmission::Json(body) => submit_json(&state, body).await.map_err(JsonError::from).into_response(),
	}
}

async fn submit_form(
	state: &BoardState,
	form: MessageForm,
) -> Result<Response, ServiceError> {
	let new_message = form.validate()?;
	MessageHandler::submit_message(state, &new_message).await?;

	if new_message.redirect {
		return Ok(redirect_to_conversation(&new_message));
	}
	Ok((StatusCode::OK, "SUCCESS").into_response())
}

async fn submit_json(
	state: &BoardState,
	body: MessageJson,
) -> Result<Response, ServiceError> {
	let new_message = body.validate()?;
	let stored = MessageHandler::submit_message(state, &new_message).await?;

	if new_message.redirect {
		return Ok(redirect_to_conversation(&new_message));
	}
	Ok((StatusCode::CREATED, Json(MessageCreated::from(stored))).into_response())
}

fn redirect_to_conversation(new_message: &NewMessage) -> Response {
	(StatusCode::FOUND, [(header::LOCATION, new_message.location())]).into_response()
}
