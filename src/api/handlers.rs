use actix_web::{web, HttpResponse, Result};
use std::time::Instant;

use crate::api::models::{
    AnnotatorsResponse, ErrorResponse, HealthResponse, NormalizeRequest, NormalizeResponse,
};
use crate::engine::{Annotator, AnnotationNormalizer, AnnotatorSet};

/// Health check endpoint
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "corenorm Normalization API".to_string(),
    }))
}

/// Normalize a raw payload endpoint
pub async fn normalize(
    normalizer: web::Data<AnnotationNormalizer>,
    request: web::Json<NormalizeRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    // Per-request annotators override the server default
    let custom;
    let normalizer: &AnnotationNormalizer = match request.annotators {
        Some(names) => {
            custom = AnnotationNormalizer::new(names.into_iter().collect::<AnnotatorSet>());
            &custom
        }
        None => normalizer.get_ref(),
    };

    let unknown = normalizer.annotators().unknown();
    if !unknown.is_empty() {
        log::debug!("Ignoring unknown annotators: {:?}", unknown);
    }

    let start_time = Instant::now();
    match normalizer.normalize_document(&request.annotation, &request.text) {
        Ok(document) => {
            let response = NormalizeResponse {
                duration: start_time.elapsed().as_secs_f32(),
                sentence_count: document.num_sentences(),
                annotators: normalizer.annotators().iter().map(str::to_string).collect(),
                document,
            };
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::error!("Normalization failed: {}", e);
            Ok(HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: e.to_string(),
                error_type: "MalformedPayload".to_string(),
                sentence: Some(e.sentence()),
            }))
        }
    }
}

/// Annotator vocabulary endpoint
pub async fn annotators(normalizer: web::Data<AnnotationNormalizer>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(AnnotatorsResponse {
        supported: Annotator::ALL.iter().map(|a| a.to_string()).collect(),
        default: normalizer.annotators().iter().map(str::to_string).collect(),
    }))
}
