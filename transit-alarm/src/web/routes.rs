//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::Coordinate;
use crate::stops::StopResolver;

use super::dto::*;
use super::state::{AppState, SimController};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/stop/search", post(search_stop))
        .route("/monitoring/toggle", post(toggle_monitoring))
        .route("/map/current", post(show_current_location))
        .route("/map/destination", post(show_destination))
        .route("/dialog/respond", post(respond_to_dialog))
        .route("/device/location", post(device_location))
        .route("/device/authorization", post(device_authorization))
        .route("/device/activity", post(device_activity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current screen state.
async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let controller = state.controller.lock().await;
    Json(StateResponse::from_controller(&controller))
}

/// "Search" on the stop number keyboard.
///
/// The lookup runs without holding the controller; its result is applied
/// afterwards, like a completion handler hopping back to the main queue.
async fn search_stop(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<StateResponse> {
    let result = state.resolver.resolve(&req.stop).await;

    let mut controller = state.controller.lock().await;
    controller.apply_search_result(result);
    settle(&mut controller)
}

/// The GO/STOP button.
async fn toggle_monitoring(State(state): State<AppState>) -> Json<StateResponse> {
    let mut controller = state.controller.lock().await;
    controller.toggle_monitoring();
    settle(&mut controller)
}

/// "Show current location" button.
async fn show_current_location(State(state): State<AppState>) -> Json<StateResponse> {
    let mut controller = state.controller.lock().await;
    controller.show_current_location();
    settle(&mut controller)
}

/// "Show destination" button.
async fn show_destination(State(state): State<AppState>) -> Json<StateResponse> {
    let mut controller = state.controller.lock().await;
    controller.show_destination();
    settle(&mut controller)
}

/// Answer the dialog currently on screen.
async fn respond_to_dialog(
    State(state): State<AppState>,
    Json(req): Json<DialogResponseRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let mut controller = state.controller.lock().await;

    let dialog = controller
        .presenter()
        .current_dialog()
        .ok_or_else(|| AppError::Conflict {
            message: "no dialog is on screen".to_string(),
        })?;

    if !dialog.offers(req.choice) {
        return Err(AppError::BadRequest {
            message: format!("dialog {:?} has no {:?} button", dialog.title, req.choice),
        });
    }

    controller.presenter_mut().dismiss_dialog();
    controller.respond_to_dialog(req.choice);
    Ok(settle(&mut controller))
}

/// Simulated GPS fix.
async fn device_location(
    State(state): State<AppState>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let location =
        Coordinate::new(req.latitude, req.longitude).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let mut controller = state.controller.lock().await;
    debug!(%location, "simulated move");
    controller.provider_mut().move_to(location);
    Ok(settle(&mut controller))
}

/// Simulated permission change.
async fn device_authorization(
    State(state): State<AppState>,
    Json(req): Json<AuthorizationRequest>,
) -> Json<StateResponse> {
    let mut controller = state.controller.lock().await;
    controller.provider_mut().set_authorization(req.status);
    settle(&mut controller)
}

/// Simulated foreground/background transition.
async fn device_activity(
    State(state): State<AppState>,
    Json(req): Json<ActivityRequest>,
) -> Json<StateResponse> {
    let mut controller = state.controller.lock().await;
    controller.set_activity(req.state);
    settle(&mut controller)
}

/// Deliver queued location events, then snapshot.
fn settle(controller: &mut SimController) -> Json<StateResponse> {
    controller.process_pending_events();
    Json(StateResponse::from_controller(controller))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Conflict { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
