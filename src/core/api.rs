//! HTTP + WebSocket API for guided solving
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /api/classify-colors - HSV samples → labels
//! - POST /api/solve - Scanned faces → solution and expanded steps
//! - POST /api/apply-move - Apply one move to a state
//! - POST /session/new - Start a walkthrough
//! - GET /session/:id - Walkthrough status
//! - DELETE /session/:id - Close and forget a walkthrough
//! - POST /session/:id/press - Confirm the current step
//! - POST /session/:id/abort - Cancel the walkthrough
//! - WS /ws/:id - Live cube snapshots

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{ws::{Message, WebSocket}, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::classify::{ColorClassifier, HsvSample, HsvThresholds};
use crate::core::engine;
use crate::core::oracle::SolveOracle;
use crate::core::publisher::{BroadcastPublisher, RecordingPublisher, StatePublisher};
use crate::core::scan::ScannedFaces;
use crate::core::session::SolvePlan;
use crate::core::tracker::PressTracker;
use crate::types::{CubeError, Face, FaceletState, Label, Move, PressOutput, Step, TrackerPhase};
use crate::SNAPSHOT_CHANNEL_CAPACITY;

/// Oracle shared across request handlers
pub type SharedOracle = Arc<dyn SolveOracle + Send + Sync>;

/// One guided walkthrough
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub tracker: PressTracker,
    pub publisher: BroadcastPublisher,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub oracle: SharedOracle,
    pub classifier: HsvThresholds,
    next_id: AtomicU64,
}

/// Scanned faces as sent by the browser: `{"U": ["W","W",...], ...}`
pub type CubeFaces = BTreeMap<Face, Vec<Label>>;

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned from handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn not_found(what: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: format!("{} not found", what) }
    }

    fn internal(message: String) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }
}

impl From<CubeError> for ApiError {
    fn from(err: CubeError) -> Self {
        let status = match &err {
            CubeError::IncompleteScan { .. }
            | CubeError::AmbiguousColorMapping { .. }
            | CubeError::InvalidMove(_)
            | CubeError::MalformedFace { .. } => StatusCode::BAD_REQUEST,
            CubeError::OracleFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CubeError::TrackerClosed => StatusCode::CONFLICT,
            CubeError::SequenceConsistencyFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub samples: Vec<HsvSample>,
}

/// Classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub colors: Vec<Label>,
}

/// Solve request
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub cube_faces: CubeFaces,
}

/// Solve response
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub solution: String,
    pub moves: Vec<Move>,
    pub expanded_moves: Vec<Step>,
    pub cube_string: String,
}

/// Apply-move request
#[derive(Debug, Deserialize)]
pub struct ApplyMoveRequest {
    pub state: FaceletState,
    #[serde(rename = "move")]
    pub mv: String,
}

/// Apply-move response
#[derive(Debug, Serialize)]
pub struct ApplyMoveResponse {
    pub state: FaceletState,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub solution: String,
    pub steps: Vec<Step>,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub phase: TrackerPhase,
    pub step_cursor: usize,
    pub total_steps: usize,
    pub moves_done: usize,
    pub presses_remaining: usize,
    pub next_step: Option<Step>,
    pub instruction: Option<String>,
    pub current_move: Option<Move>,
    pub state: FaceletState,
}

/// Press / abort response
#[derive(Debug, Serialize)]
pub struct PressResponse {
    #[serde(flatten)]
    pub output: PressOutput,
    pub state: FaceletState,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(oracle: SharedOracle) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        oracle,
        classifier: HsvThresholds::default(),
        next_id: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/classify-colors", post(classify_colors))
        .route("/api/solve", post(solve))
        .route("/api/apply-move", post(apply_move))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(close_session))
        .route("/session/:id/press", post(press))
        .route("/session/:id/abort", post(abort))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

fn scan_from_faces(faces: &CubeFaces) -> Result<ScannedFaces, CubeError> {
    let mut scan = ScannedFaces::new();
    for (face, labels) in faces {
        let stickers: String = labels.iter().map(|l| l.0).collect();
        scan.insert_str(*face, &stickers)?;
    }
    Ok(scan)
}

/// Build a plan on the blocking pool; the oracle may run an external process.
///
/// The publisher travels into the worker and is handed back with the plan.
async fn prepare_plan<P>(oracle: SharedOracle, scan: ScannedFaces, mut publisher: P) -> Result<(SolvePlan, P), ApiError>
where
    P: StatePublisher + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        SolvePlan::prepare(&scan, oracle.as_ref(), &mut publisher).map(|plan| (plan, publisher))
    })
    .await;

    match joined {
        Ok(prepared) => Ok(prepared?),
        Err(e) => {
            warn!(error = %e, "solver task failed");
            Err(ApiError::internal(format!("solver task failed: {}", e)))
        }
    }
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Classify nine HSV samples
async fn classify_colors(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let samples: [HsvSample; 9] = req.samples.try_into().map_err(|v: Vec<HsvSample>| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: format!("expected 9 samples, got {}", v.len()),
    })?;
    let colors = state.classifier.classify_face(&samples).to_vec();
    Ok(Json(ClassifyResponse { colors }))
}

/// Solve scanned faces without starting a walkthrough
async fn solve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, ApiError> {
    let scan = scan_from_faces(&req.cube_faces)?;
    let (plan, _) = prepare_plan(state.oracle.clone(), scan, RecordingPublisher::new()).await?;

    Ok(Json(SolveResponse {
        solution: plan.solution(),
        cube_string: plan.facelets,
        moves: plan.moves,
        expanded_moves: plan.steps,
    }))
}

/// Apply one move to a posted state
async fn apply_move(Json(req): Json<ApplyMoveRequest>) -> Result<Json<ApplyMoveResponse>, ApiError> {
    let state = engine::apply_token(&req.state, &req.mv)?;
    Ok(Json(ApplyMoveResponse { state }))
}

/// Start a walkthrough session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SolveRequest>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let scan = scan_from_faces(&req.cube_faces)?;
    let (tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
    let (plan, publisher) = prepare_plan(state.oracle.clone(), scan, BroadcastPublisher::new(tx)).await?;

    let session_id = format!("session_{:x}", state.next_id.fetch_add(1, Ordering::Relaxed));
    let solution = plan.solution();
    let steps = plan.steps.clone();
    let session = Session {
        id: session_id.clone(),
        tracker: plan.into_tracker(),
        publisher,
    };

    info!(session = %session_id, %solution, "session created");
    state.sessions.write().await.insert(session_id.clone(), session);

    Ok(Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
        solution,
        steps,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::not_found("session"))?;
    let tracker = &session.tracker;
    let status = tracker.status();

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        phase: status.phase,
        step_cursor: status.step_cursor,
        total_steps: status.total_steps,
        moves_done: status.moves_done,
        presses_remaining: status.presses_remaining,
        next_step: status.next_step,
        instruction: tracker.current_instruction(),
        current_move: tracker.current_move(),
        state: *tracker.state(),
    }))
}

/// Confirm the current step
async fn press(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PressResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| ApiError::not_found("session"))?;

    let output = session.tracker.confirm(&mut session.publisher).map_err(|e| {
        warn!(session = %id, error = %e, "press rejected");
        ApiError::from(e)
    })?;

    Ok(Json(PressResponse { output, state: *session.tracker.state() }))
}

/// Cancel the walkthrough, keeping the last committed state
async fn abort(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PressResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| ApiError::not_found("session"))?;
    let output = session.tracker.abort();
    Ok(Json(PressResponse { output, state: *session.tracker.state() }))
}

/// Close a walkthrough and drop it. Viewers see their channel close.
async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PressResponse>, ApiError> {
    let mut session = state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::not_found("session"))?;
    let output = if session.tracker.phase().is_closed() {
        session.tracker.status()
    } else {
        session.tracker.abort()
    };
    info!(session = %id, phase = %output.phase, "session closed");
    Ok(Json(PressResponse { output, state: *session.tracker.state() }))
}

/// WebSocket handler for live snapshots
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::not_found("session"))?;
    let rx = session.publisher.subscribe();
    let current = *session.tracker.state();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, current, rx).await;
    }))
}

/// Send the current snapshot, then every published one until either side closes
async fn handle_websocket(socket: WebSocket, current: FaceletState, mut rx: broadcast::Receiver<FaceletState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        let mut next = Some(current);
        loop {
            let snapshot = match next.take() {
                Some(s) => s,
                None => match rx.recv().await {
                    Ok(s) => s,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "viewer lagging, snapshots dropped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            };
            let json = serde_json::to_string(&snapshot).unwrap_or_default();
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(addr: &str, oracle: SharedOracle) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(oracle);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "cubewalk API running");
    info!("  POST /api/solve         - Solve scanned faces");
    info!("  POST /session/new       - Start walkthrough");
    info!("  POST /session/:id/press - Confirm step");
    info!("  WS   /ws/:id            - Live snapshots");
    axum::serve(listener, router).await?;
    Ok(())
}
