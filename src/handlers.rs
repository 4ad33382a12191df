use crate::controller::UiEvent;
use crate::errors::AppError;
use crate::sessions::{session_cookie, session_id};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse},
    Json,
};

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, controller) = state.sessions.resume(session_id(&headers)).await;
    controller.settle().await;
    let snapshot = controller.snapshot().await;
    (
        [(SET_COOKIE, session_cookie(&id))],
        Html(render_index(&snapshot).into_string()),
    )
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn snapshot(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, controller) = state.sessions.resume(session_id(&headers)).await;
    controller.settle().await;
    (
        [(SET_COOKIE, session_cookie(&id))],
        Json(controller.snapshot().await),
    )
}

/// Applies one interaction to the caller's page and answers with that page
/// as it stands once the loads it started have finished.
pub async fn event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<UiEvent>,
) -> Result<impl IntoResponse, AppError> {
    let (id, controller) = state.sessions.resume(session_id(&headers)).await;
    controller.dispatch(event).await?;
    controller.settle().await;
    Ok((
        [(SET_COOKIE, session_cookie(&id))],
        Json(controller.snapshot().await),
    ))
}
