use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use creativeplay_match::config::{LoggingSettings, Settings};
use creativeplay_match::core::Matcher;
use creativeplay_match::models::ScoringWeights;
use creativeplay_match::routes::{self, AppState};
use creativeplay_match::services::{LogMailer, Matchmaker, MemoryStore, Notifier, PostgresStore, SmtpMailer, Store};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)).json(self)
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

/// Handle path parameter errors (e.g. non-numeric ids)
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path parameter: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting CreativePlay matching service...");

    let store: Arc<dyn Store> = if settings.database.in_memory {
        warn!("Using in-memory store, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let db_max_conn = settings.database.max_connections.unwrap_or(10);
        let postgres = PostgresStore::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

        info!("PostgreSQL store initialized (max: {} connections)", db_max_conn);
        Arc::new(postgres)
    };

    let notifier: Arc<dyn Notifier> = if settings.email.enabled {
        match SmtpMailer::new(&settings.email) {
            Ok(mailer) => {
                info!("SMTP mailer initialized ({}:{})", settings.email.smtp_host, settings.email.smtp_port);
                Arc::new(mailer)
            }
            Err(e) => {
                error!("Failed to set up SMTP ({}), emails will only be logged", e);
                Arc::new(LogMailer)
            }
        }
    } else {
        info!("Email delivery disabled, emails will only be logged");
        Arc::new(LogMailer)
    };

    // Initialize matcher with configured weights
    let weights = ScoringWeights {
        keyword: settings.scoring.weights.keyword,
        experience_per_char: settings.scoring.weights.experience_per_char,
    };

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        matchmaker: Arc::new(Matchmaker::new(
            store,
            notifier,
            matcher,
            settings.matching.rematch_limit,
        )),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
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
