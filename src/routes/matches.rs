use actix_web::{web, HttpResponse, Responder};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Ranker;
use crate::models::{
    BestMatchResponse, Candidate, ErrorResponse, HealthResponse, MatchListResponse, RankRequest,
    RankResponse, RecommendedQuery, ScoredCandidate, SearchQuery,
};
use crate::queries::{above_threshold_scored, all_scored, evaluate_best_match, search};

/// State of the single ranking session
#[derive(Debug, Default)]
pub struct Session {
    pub last_run_id: Option<uuid::Uuid>,
}

/// Application state shared across all handlers
///
/// Every handler that touches the snapshot holds `session` for the whole
/// operation, so exports and reads never interleave.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<Candidate>>,
    pub ranker: Ranker,
    pub snapshot_path: Arc<PathBuf>,
    pub matching: MatchingSettings,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(
        catalog: Vec<Candidate>,
        ranker: Ranker,
        snapshot_path: PathBuf,
        matching: MatchingSettings,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            ranker,
            snapshot_path: Arc::new(snapshot_path),
            matching,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/rank", web::post().to(rank))
        .route("/matches/best", web::get().to(best_match))
        .route("/matches/recommended", web::get().to(recommended))
        .route("/matches/all", web::get().to(all_matches))
        .route("/matches/search", web::get().to(search_matches));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn list_response(matches: Vec<ScoredCandidate>) -> HttpResponse {
    HttpResponse::Ok().json(MatchListResponse {
        total_results: matches.len(),
        matches,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let session = state.session.lock().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.catalog.len(),
        last_run_id: session.last_run_id,
    })
}

/// Rank the catalog for a profile and overwrite the snapshot
///
/// POST /api/v1/rank
///
/// Request body:
/// ```json
/// {
///   "preferredGender": "Any",
///   "traitCode": "ENFP",
///   "energyLevel": 7,
///   "space": 500,
///   "budget": 200,
///   "allergic": false,
///   "hasYard": true,
///   "timePerDay": 4.0
/// }
/// ```
async fn rank(state: web::Data<AppState>, req: web::Json<RankRequest>) -> impl Responder {
    use actix_web::http::StatusCode;

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let profile = req.into_inner().into_profile();
    let run_id = uuid::Uuid::new_v4();

    let mut session = state.session.lock().await;

    let ranker = state.ranker.clone();
    let catalog = state.catalog.clone();
    let path = state.snapshot_path.clone();
    let exported = web::block(move || ranker.export(&profile, &catalog, &path)).await;

    match exported {
        Ok(Ok(summary)) => {
            session.last_run_id = Some(run_id);
            tracing::info!("Ranking run {} exported {} rows", run_id, summary.rows);

            HttpResponse::Ok().json(RankResponse {
                run_id,
                ranked_at: chrono::Utc::now(),
                total_ranked: summary.rows,
                snapshot_path: summary.path.display().to_string(),
                top_matches: summary.top,
            })
        }
        Ok(Err(e)) => {
            tracing::error!("Ranking run {} failed: {}", run_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Snapshot export failed", e.to_string())
        }
        Err(e) => {
            tracing::error!("Ranking run {} could not be scheduled: {}", run_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error", e.to_string())
        }
    }
}

/// Best matched candidate from the current snapshot
///
/// GET /api/v1/matches/best
async fn best_match(state: web::Data<AppState>) -> impl Responder {
    let _session = state.session.lock().await;

    let catalog = state.catalog.clone();
    let path = state.snapshot_path.clone();
    let threshold = state.matching.best_match_threshold;

    match web::block(move || evaluate_best_match(&path, &catalog, threshold)).await {
        Ok(outcome) => HttpResponse::Ok().json(BestMatchResponse {
            status: outcome.status().to_string(),
            threshold,
            best_match: outcome.top().cloned(),
        }),
        Err(e) => error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            e.to_string(),
        ),
    }
}

/// Candidates scoring above the threshold
///
/// GET /api/v1/matches/recommended?threshold=0.8
async fn recommended(
    state: web::Data<AppState>,
    query: web::Query<RecommendedQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let threshold = query.threshold.unwrap_or(state.matching.recommend_threshold);
    let _session = state.session.lock().await;

    let catalog = state.catalog.clone();
    let path = state.snapshot_path.clone();

    match web::block(move || above_threshold_scored(&path, &catalog, threshold)).await {
        Ok(matches) => list_response(matches),
        Err(e) => error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            e.to_string(),
        ),
    }
}

/// Every ranked candidate with its score
///
/// GET /api/v1/matches/all
async fn all_matches(state: web::Data<AppState>) -> impl Responder {
    let _session = state.session.lock().await;

    let catalog = state.catalog.clone();
    let path = state.snapshot_path.clone();

    match web::block(move || all_scored(&path, &catalog)).await {
        Ok(matches) => list_response(matches),
        Err(e) => error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            e.to_string(),
        ),
    }
}

/// Search ranked candidates by type and optional breed
///
/// GET /api/v1/matches/search?type=Dog&breed=Beagle
async fn search_matches(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let SearchQuery { pet_type, breed } = query.into_inner();
    let _session = state.session.lock().await;

    let catalog = state.catalog.clone();
    let path = state.snapshot_path.clone();

    match web::block(move || search(&pet_type, breed.as_deref(), &path, &catalog)).await {
        Ok(matches) => list_response(matches),
        Err(e) => error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            e.to_string(),
        ),
    }
}
