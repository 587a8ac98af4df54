use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::chat::responder::{respond, ChatContext, ChatReply};
use crate::errors::AppError;
use crate::session::resolve_snapshot;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let snapshot = match req.user_id {
        Some(user_id) => {
            resolve_snapshot(state.sessions.as_ref(), &state.db, &state.taxonomy, user_id).await?
        }
        None => None,
    };

    let context = ChatContext {
        insights: snapshot.as_ref().map(|s| &s.insights),
        skills: snapshot.as_ref().map(|s| s.skills.as_slice()),
    };
    let reply = respond(&req.message, context, &state.taxonomy);
    debug!("Chat intent: {:?}", reply.intent);

    Ok(Json(reply))
}
