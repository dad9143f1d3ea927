//! Game HTTP routes. Handlers only translate between HTTP and the services.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::require_db;
use crate::domain::validation::GameSettings;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::game_flow::GameFlowService;
use crate::services::games::GameService;
use crate::state::app_state::AppState;

const DEFAULT_PER_PAGE: u64 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub title: String,
    pub password: String,
    pub member_count: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    #[serde(default)]
    pub finally_releasing: bool,
}

impl From<CreateGameRequest> for GameSettings {
    fn from(req: CreateGameRequest) -> Self {
        GameSettings {
            title: req.title,
            password: req.password,
            member_count: req.member_count,
            max_turns: req.max_turns,
            discussion_seconds: req.discussion_seconds,
            finally_releasing: req.finally_releasing,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// Public code of the participant voted for
    pub target: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// POST /api/games
async fn create_game(
    user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let created = GameService::from_state(&app_state)
        .create_game(db, &user.0, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/games/mine
async fn my_game(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let flow = GameFlowService::from_state(&app_state);
    let mine = GameService::from_state(&app_state)
        .my_game(db, &flow, &user.0)
        .await?;
    Ok(HttpResponse::Ok().json(mine))
}

/// GET /api/games/history?page=1&perPage=30
async fn history(
    user: CurrentUser,
    query: web::Query<HistoryQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let page = GameService::from_state(&app_state)
        .history(
            db,
            &user.0,
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/games/{name}
async fn get_game(
    user: CurrentUser,
    name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let view = GameFlowService::from_state(&app_state)
        .game_view(db, &name, user.id())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/games/{name}/join
async fn join_game(
    user: CurrentUser,
    name: web::Path<String>,
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameService::from_state(&app_state)
        .join_game(db, &user.0, &name, &body.password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/{name}/start
async fn start_game(
    user: CurrentUser,
    name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameFlowService::from_state(&app_state)
        .start_game(db, &name, user.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/games/{name}/input
async fn submit_word(
    user: CurrentUser,
    name: web::Path<String>,
    body: ValidatedJson<WordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameFlowService::from_state(&app_state)
        .submit_word(db, &name, user.id(), &body.word)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/games/{name}/vote
async fn submit_vote(
    user: CurrentUser,
    name: web::Path<String>,
    body: ValidatedJson<VoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameFlowService::from_state(&app_state)
        .submit_vote(db, &name, user.id(), &body.target)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/games/{name}/next
async fn acknowledge(
    user: CurrentUser,
    name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameFlowService::from_state(&app_state)
        .acknowledge_execution(db, &name, user.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/games/{name}/cancel
async fn cancel_game(
    user: CurrentUser,
    name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    GameFlowService::from_state(&app_state)
        .cancel_game(db, &name, user.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Fixed segments first so they are not captured by `{name}`
    cfg.route("", web::post().to(create_game))
        .route("/mine", web::get().to(my_game))
        .route("/history", web::get().to(history))
        .route("/{name}", web::get().to(get_game))
        .route("/{name}/join", web::post().to(join_game))
        .route("/{name}/start", web::post().to(start_game))
        .route("/{name}/input", web::put().to(submit_word))
        .route("/{name}/vote", web::put().to(submit_vote))
        .route("/{name}/next", web::put().to(acknowledge))
        .route("/{name}/cancel", web::delete().to(cancel_game));
}
