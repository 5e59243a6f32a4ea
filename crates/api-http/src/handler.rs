//! HTTP Handlers
//!
//! `show_list` is the loader of a list page, `submit_action` its form action.

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;
use crate::types::{ActionForm, ActionResponse, HealthResponse, ListResponse};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use todo_core::application::IntentOutcome;
use tracing::info;

/// GET / - start a fresh list
pub async fn new_list(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("/{}", state.new_list_id()))
}

/// GET /healthz
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: todo_core::VERSION.to_string(),
    })
}

/// GET /{list_id}
pub async fn show_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let todos = state.manager(&list_id)?.list().await?;

    if wants_json(&headers) {
        Ok(Json(ListResponse { todos }).into_response())
    } else {
        Ok(Html(render::list_page(&todos)).into_response())
    }
}

/// POST /{list_id}
pub async fn submit_action(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(pairs) = form.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let intent = ActionForm::from_pairs(pairs).into_intent()?;
    let intent_name = intent.name();

    let manager = state.manager(&list_id)?;
    match manager.apply(intent).await? {
        IntentOutcome::Created(todo) => {
            info!(list_id = %list_id, todo_id = %todo.id, "Todo created")
        }
        IntentOutcome::Toggled(Some(todo)) => {
            info!(list_id = %list_id, todo_id = %todo.id, completed = todo.completed, "Todo toggled")
        }
        IntentOutcome::Toggled(None) => {
            info!(list_id = %list_id, intent = intent_name, "Toggle matched no todo")
        }
        IntentOutcome::Deleted(removed) => {
            info!(list_id = %list_id, removed, "Todo deleted")
        }
    }

    if wants_json(&headers) {
        Ok(Json(ActionResponse { success: true }).into_response())
    } else {
        // Post/Redirect/Get back to the page that submitted the form
        Ok(Redirect::to(uri.path()).into_response())
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}
