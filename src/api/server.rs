use actix_web::{web, App, HttpServer, middleware};
use anyhow::Result;

use crate::api::handlers::{annotators, health_check, normalize};
use crate::engine::{AnnotationNormalizer, AnnotatorSet};

/// Configuration for the API server
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Annotators assumed when a request names none
    pub annotators: AnnotatorSet,
}

/// Register the `/api/v1` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .route("/normalize", web::post().to(normalize))
            .route("/annotators", web::get().to(annotators)),
    );
}

/// Start the API server
pub async fn start_server(config: ApiConfig) -> Result<()> {
    log::info!("Starting corenorm API server on {}:{}", config.host, config.port);
    log::info!("Default annotators: {}", config.annotators);

    let normalizer = web::Data::new(AnnotationNormalizer::new(config.annotators));

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(normalizer.clone())
            .configure(configure)
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
