use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::{build_request, check_conversation},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // No outbound call is made without a key.
    let Some(api_key) = state.config.api_key.as_deref() else {
        tracing::error!("GEMINI_API_KEY is not set; refusing chat request");
        return Err(AppError::Configuration("GEMINI_API_KEY is not set".to_string()));
    };

    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected chat body");
        AppError::MalformedBody(rejection.body_text())
    })?;

    let messages = payload.into_messages();
    check_conversation(&messages).map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let request = build_request(&messages, &state.config);
    tracing::debug!(turns = messages.len(), model = %state.config.model, "forwarding chat");

    match state.gemini.generate(api_key, &request).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(err) => {
            tracing::error!(error = %err, "provider call failed");
            let details = state
                .config
                .expose_provider_errors
                .then(|| err.diagnostic());
            Err(AppError::Provider { details })
        }
    }
}
