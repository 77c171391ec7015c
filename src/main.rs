use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use mentor_match::config::{LoggingSettings, Settings};
use mentor_match::core::MatchService;
use mentor_match::routes::{self, handle_json_payload_error, matches::AppState};
use mentor_match::services::{EncoderRuntime, InMemoryDirectory};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting mentor matching service...");

    // Profile directory
    let directory = InMemoryDirectory::load(&settings.directory.seed_path).map_err(|e| {
        error!("Failed to load profile directory: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    info!(
        "Profile directory initialized ({} students, {} mentors)",
        directory.student_count(),
        directory.mentor_count()
    );

    // The encoder is loaded once and shared read-only by every worker
    let encoder_runtime = EncoderRuntime::start(&settings.encoder);

    let weights = settings.scoring.weights.to_blend_weights();
    let service = MatchService::new(encoder_runtime.encoder(), weights, settings.scoring.fallback);

    info!(
        "Match service initialized with weights: {:?}, fallback: {:?}",
        weights, settings.scoring.fallback
    );

    let app_state = AppState {
        directory: Arc::new(directory),
        service,
        encoder: encoder_runtime.status(),
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await;

    encoder_runtime.shutdown();
    info!("Mentor matching service stopped");

    server
}
