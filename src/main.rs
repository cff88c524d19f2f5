mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api::auth::CookiePolicy;
use database::DocumentStore;
use models::DocumentPolicy;
use services::TokenCodec;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    log::info!("🚀 Starting Booking Service...");
    log::info!("📊 Database: {}", config.database_name);
    if config.production {
        log::info!("🔒 Production mode: session cookies are Secure; SameSite=None");
    }
    log::warn!(
        "⚠️  Service writes, provider listings and booking updates are not session-protected"
    );

    let codec = match TokenCodec::new(&config.jwt_secret) {
        Ok(codec) => web::Data::new(codec),
        Err(e) => {
            log::error!("❌ Token codec unavailable: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize MongoDB connection
    let db = match database::MongoDB::new(&config.database_url, &config.database_name).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()));
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let store: web::Data<dyn DocumentStore> = web::Data::from(Arc::new(db) as Arc<dyn DocumentStore>);
    let cookies = web::Data::new(CookiePolicy::new(config.production));
    let documents = web::Data::new(DocumentPolicy::new(config.strict_validation));
    let origins = config.allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            .app_data(codec.clone())
            .app_data(cookies.clone())
            .app_data(documents.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
