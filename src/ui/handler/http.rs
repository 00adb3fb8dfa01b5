//! HTTP API endpoint handlers.
//!
//! Thin boundary layer: decode the wire payload into typed arguments,
//! call the matching usecase, and map its result variants to status
//! codes. Requester identity is the caller-supplied `user` header, not
//! authenticated.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{MessageId, ParticipantName},
    infrastructure::dto::http::{
        JoinRequest, MessageBody, MessageCreatedDto, MessageDto, ParticipantDto,
    },
    ui::state::{AppState, ListMessagesQuery},
    usecase::{
        DeleteMessageError, DeleteMessageUseCase, EditMessageError, EditMessageUseCase,
        JoinRoomError, JoinRoomUseCase, ListMessagesError, ListMessagesUseCase,
        RefreshPresenceError, RefreshPresenceUseCase, SendMessageError, SendMessageUseCase,
    },
};

type HandlerError = (StatusCode, String);

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /participants` — join the room
pub async fn join(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JoinRequest>,
) -> Result<StatusCode, HandlerError> {
    let name = ParticipantName::new(body.name)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let usecase = JoinRoomUseCase::new(state.repository.clone());
    match usecase.execute(name).await {
        Ok(()) => Ok(StatusCode::CREATED),
        Err(JoinRoomError::AlreadyJoined(name)) => {
            tracing::warn!("rejected duplicate join for '{}'", name);
            Err((StatusCode::CONFLICT, format!("'{name}' already joined")))
        }
        Err(JoinRoomError::Store(e)) => Err(internal(e)),
    }
}

/// `GET /participants` — live participants in join order
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, HandlerError> {
    let participants = state
        .repository
        .list_participants()
        .await
        .map_err(internal)?;
    Ok(Json(participants.iter().map(ParticipantDto::from).collect()))
}

/// `POST /messages` — send a broadcast or private message
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<MessageBody>,
) -> Result<(StatusCode, Json<MessageCreatedDto>), HandlerError> {
    let from = requester(&headers)?;
    let (to, text, kind) = body
        .into_domain()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let usecase = SendMessageUseCase::new(state.repository.clone());
    match usecase.execute(from, to, text, kind).await {
        Ok(id) => Ok((
            StatusCode::CREATED,
            Json(MessageCreatedDto { id: id.to_string() }),
        )),
        Err(SendMessageError::UnknownSender(name)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("sender '{name}' is not in the room"),
        )),
        Err(SendMessageError::Store(e)) => Err(internal(e)),
    }
}

/// `GET /messages` — messages visible to the requester, tail-limited
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<MessageDto>>, HandlerError> {
    let who = requester(&headers)?;
    let limit = match query.limit {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("limit must be a positive integer (got '{raw}')"),
            )
        })?),
        None => None,
    };

    let usecase = ListMessagesUseCase::new(state.repository.clone());
    match usecase.execute(who, limit).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(ListMessagesError::InvalidLimit(limit)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("limit must be a positive integer (got {limit})"),
        )),
        Err(ListMessagesError::Store(e)) => Err(internal(e)),
    }
}

/// `POST /status` — heartbeat refreshing the requester's liveness
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, HandlerError> {
    let who = requester(&headers)?;

    let usecase = RefreshPresenceUseCase::new(state.repository.clone());
    match usecase.execute(who).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(RefreshPresenceError::UnknownParticipant(name)) => Err((
            StatusCode::NOT_FOUND,
            format!("participant '{name}' is not in the room"),
        )),
        Err(RefreshPresenceError::Store(e)) => Err(internal(e)),
    }
}

/// `PUT /messages/{id}` — edit own message
pub async fn edit_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<MessageBody>,
) -> Result<StatusCode, HandlerError> {
    let from = requester(&headers)?;
    let id = message_id(&id)?;
    let patch = body
        .into_patch()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let usecase = EditMessageUseCase::new(state.repository.clone());
    match usecase.execute(&id, from, patch).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(EditMessageError::UnknownSender(name)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("sender '{name}' is not in the room"),
        )),
        Err(EditMessageError::MessageNotFound(id)) => {
            Err((StatusCode::NOT_FOUND, format!("message '{id}' not found")))
        }
        Err(EditMessageError::Forbidden) => Err((
            StatusCode::UNAUTHORIZED,
            "only the original sender may edit a message".to_string(),
        )),
        Err(EditMessageError::Store(e)) => Err(internal(e)),
    }
}

/// `DELETE /messages/{id}` — delete own message
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, HandlerError> {
    let from = requester(&headers)?;
    let id = message_id(&id)?;

    let usecase = DeleteMessageUseCase::new(state.repository.clone());
    match usecase.execute(&id, from).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(DeleteMessageError::MessageNotFound(id)) => {
            Err((StatusCode::NOT_FOUND, format!("message '{id}' not found")))
        }
        Err(DeleteMessageError::Forbidden) => Err((
            StatusCode::UNAUTHORIZED,
            "only the original sender may delete a message".to_string(),
        )),
        Err(DeleteMessageError::Store(e)) => Err(internal(e)),
    }
}

/// Extract the requester identity from the `user` header.
fn requester(headers: &HeaderMap) -> Result<ParticipantName, HandlerError> {
    let raw = headers
        .get("user")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "missing 'user' header".to_string(),
            )
        })?;
    ParticipantName::new(raw.to_string())
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

/// A message id that does not parse cannot name any stored message.
fn message_id(raw: &str) -> Result<MessageId, HandlerError> {
    MessageId::parse_str(raw)
        .map_err(|_| (StatusCode::NOT_FOUND, format!("message '{raw}' not found")))
}

fn internal(e: impl std::fmt::Display) -> HandlerError {
    tracing::error!("store failure: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
