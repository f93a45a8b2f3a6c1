use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use pet_match::config::{CatalogSettings, LoggingSettings, Settings};
use pet_match::models::ScoringWeights;
use pet_match::routes::{self, AppState};
use pet_match::services::{CandidateSource, CatalogError, FileCatalog, SeedCatalog};
use pet_match::{Candidate, Ranker};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

/// Load the catalog once for the whole session
fn load_catalog(settings: &CatalogSettings) -> Result<Vec<Candidate>, CatalogError> {
    match &settings.path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            FileCatalog::new(path, settings.shuffle_seed).load_all_candidates()
        }
        None => {
            let source = match settings.shuffle_seed {
                Some(seed) => SeedCatalog::with_seed(seed),
                None => SeedCatalog::new(),
            };
            source.load_all_candidates()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting PetMatch ranking service...");

    let catalog = load_catalog(&settings.catalog).map_err(|e| {
        error!("Failed to load catalog: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("Catalog loaded with {} candidates", catalog.len());

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let ranker = Ranker::with_weights(weights);

    info!("Ranker initialized with weights: {:?}", weights);
    info!("Snapshot path: {}", settings.snapshot.path.display());

    let app_state = AppState::new(
        catalog,
        ranker,
        settings.snapshot.path.clone(),
        settings.matching,
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(1);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
