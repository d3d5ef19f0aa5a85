use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::site::{JsonRecordStore, SubmissionKind, SubmissionLog};
use crate::songbook::{NewSong, SongId, SongQuery, SongStore};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{log_requests, state::*, ApiError, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub songs_count: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        songs_count: state.songs.count(),
    };
    Json(stats)
}

async fn list_songs(
    State(songs): State<GuardedSongStore>,
    Query(query): Query<SongQuery>,
) -> Response {
    Json(songs.list(&query)).into_response()
}

async fn get_song(
    State(songs): State<GuardedSongStore>,
    Path(id): Path<SongId>,
) -> Result<Response, ApiError> {
    match songs.get(id) {
        Some(song) => Ok(Json(song).into_response()),
        None => Err(ApiError::NotFound("Song")),
    }
}

async fn create_song(
    State(songs): State<GuardedSongStore>,
    Json(body): Json<NewSong>,
) -> Result<Response, ApiError> {
    body.validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let song = songs.add(body)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "song": song })),
    )
        .into_response())
}

async fn delete_song(
    State(songs): State<GuardedSongStore>,
    Path(id): Path<SongId>,
) -> Result<Response, ApiError> {
    if !songs.remove(id)? {
        return Err(ApiError::NotFound("Song"));
    }
    Ok(Json(json!({ "success": true })).into_response())
}

async fn list_gallery(State(state): State<ServerState>) -> Response {
    Json(state.gallery.list()).into_response()
}

async fn add_gallery_image(
    State(state): State<ServerState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    let record = state.gallery.add(fields)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "record": record })),
    )
        .into_response())
}

async fn delete_gallery_image(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    if !state.gallery.remove(id)? {
        return Err(ApiError::NotFound("Image"));
    }
    Ok(Json(json!({ "success": true })).into_response())
}

async fn list_files(State(state): State<ServerState>) -> Response {
    Json(state.shared_files.list()).into_response()
}

async fn add_file(
    State(state): State<ServerState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    let record = state.shared_files.add(fields)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "record": record })),
    )
        .into_response())
}

async fn delete_file(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    if !state.shared_files.remove(id)? {
        return Err(ApiError::NotFound("File"));
    }
    Ok(Json(json!({ "success": true })).into_response())
}

async fn submit(
    submissions: GuardedSubmissionLog,
    kind: SubmissionKind,
    fields: Map<String, Value>,
) -> Result<Response, ApiError> {
    submissions.append(kind, fields)?;
    Ok(Json(json!({ "success": true })).into_response())
}

async fn post_contact(
    State(submissions): State<GuardedSubmissionLog>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    submit(submissions, SubmissionKind::Contact, fields).await
}

async fn post_donation(
    State(submissions): State<GuardedSubmissionLog>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    submit(submissions, SubmissionKind::Donation, fields).await
}

async fn post_registration(
    State(submissions): State<GuardedSubmissionLog>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    submit(submissions, SubmissionKind::Registration, fields).await
}

async fn post_chat(
    State(submissions): State<GuardedSubmissionLog>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Response, ApiError> {
    submit(submissions, SubmissionKind::Chat, fields).await
}

fn make_song_routes(state: ServerState) -> Router {
    Router::new()
        .route("/songs", get(list_songs))
        .route("/songs", post(create_song))
        .route("/songs/{id}", get(get_song))
        .route("/songs/{id}", delete(delete_song))
        .with_state(state)
}

fn make_site_routes(state: ServerState) -> Router {
    Router::new()
        .route("/gallery", get(list_gallery))
        .route("/gallery", post(add_gallery_image))
        .route("/gallery/{id}", delete(delete_gallery_image))
        .route("/files", get(list_files))
        .route("/files", post(add_file))
        .route("/files/{id}", delete(delete_file))
        .route("/contact", post(post_contact))
        .route("/donate", post(post_donation))
        .route("/register", post(post_registration))
        .route("/chat", post(post_chat))
        .with_state(state)
}

pub fn make_app(
    config: ServerConfig,
    songs: Arc<dyn SongStore>,
    gallery: Arc<JsonRecordStore>,
    shared_files: Arc<JsonRecordStore>,
    submissions: Arc<SubmissionLog>,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        songs,
        gallery,
        shared_files,
        submissions,
    };

    let api_routes: Router = make_song_routes(state.clone()).merge(make_site_routes(state.clone()));

    let mut app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/api", api_routes);

    if let Some(frontend_dir) = &config.frontend_dir_path {
        app = app.fallback_service(ServeDir::new(frontend_dir));
    }

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    songs: Arc<dyn SongStore>,
    gallery: Arc<JsonRecordStore>,
    shared_files: Arc<JsonRecordStore>,
    submissions: Arc<SubmissionLog>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, songs, gallery, shared_files, submissions);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
