use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use tracing::Instrument;
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchErrorKind, MatchService};
use crate::models::{
    CandidateProfile, EncoderStatus, ErrorResponse, HealthResponse, MatchOutcome, MatchRequest,
    MatchResponse, ProfileMatchRequest,
};
use crate::services::ProfileDirectory;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn ProfileDirectory>,
    pub service: MatchService,
    pub encoder: EncoderStatus,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(match_student))
        .route("/match/profile", web::post().to(match_profile));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.encoder.available { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        encoder: state.encoder.clone(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a stored student against every mentor
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "student_id": "string",
///   "limit": 20
/// }
/// ```
///
/// Without `limit` the response carries every mentor, ranked.
async fn match_student(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return error_body(StatusCode::BAD_REQUEST, "student_id is required", errors.to_string());
    }

    let span = tracing::info_span!("match", request_id = %uuid::Uuid::new_v4(), student_id = %req.student_id);
    async move {
        let interests = match state.directory.student_interests(&req.student_id) {
            Ok(Some(interests)) => interests,
            Ok(None) => {
                tracing::info!("Student profile not found");
                return error_body(
                    StatusCode::NOT_FOUND,
                    "Student profile not found",
                    format!("no student with id {}", req.student_id),
                );
            }
            Err(e) => {
                tracing::error!("Failed to fetch student profile: {}", e);
                return match_error_response(&MatchError::from(e));
            }
        };

        let pool: Vec<CandidateProfile> = match state.directory.mentors() {
            Ok(mentors) => mentors.iter().map(CandidateProfile::from).collect(),
            Err(e) => {
                tracing::error!("Failed to fetch mentors: {}", e);
                return match_error_response(&MatchError::from(e));
            }
        };

        if pool.is_empty() {
            return error_body(
                StatusCode::NOT_FOUND,
                "No mentors available",
                "the mentor directory is empty".to_string(),
            );
        }

        let limit = state.matching.effective_limit(req.limit);
        run_match(&state, interests, pool, limit).await
    }
    .instrument(span)
    .await
}

/// Rank a caller-supplied candidate pool
///
/// POST /api/v1/match/profile
///
/// Request body:
/// ```json
/// {
///   "interests": ["string"],
///   "candidates": [{ "id": "string", "expertise": ["string"] }],
///   "limit": 20
/// }
/// ```
async fn match_profile(
    state: web::Data<AppState>,
    req: web::Json<ProfileMatchRequest>,
) -> HttpResponse {
    let span = tracing::info_span!("match", request_id = %uuid::Uuid::new_v4());
    let req = req.into_inner();
    let limit = state.matching.effective_limit(req.limit);

    run_match(&state, req.interests, req.candidates, limit)
        .instrument(span)
        .await
}

/// Score on a blocking worker, then truncate to `limit` if one is set
async fn run_match(
    state: &AppState,
    interests: Vec<String>,
    pool: Vec<CandidateProfile>,
    limit: Option<usize>,
) -> HttpResponse {
    let total_candidates = pool.len();
    tracing::debug!("Matching against {} candidates", total_candidates);

    let service = state.service.clone();
    let span = tracing::Span::current();
    let result = web::block(move || {
        let _guard = span.enter();
        service.match_profiles(&interests, &pool)
    })
    .await;

    match result {
        Ok(Ok(MatchOutcome { mut matches, mode })) => {
            if let Some(limit) = limit {
                matches.truncate(limit);
            }
            tracing::info!(
                "Returning {} matches (from {} candidates)",
                matches.len(),
                total_candidates
            );
            HttpResponse::Ok().json(MatchResponse {
                matches: matches.into_iter().map(Into::into).collect(),
                scoring: mode,
                total_candidates,
            })
        }
        Ok(Err(e)) => {
            tracing::info!("Match request failed: {}", e);
            match_error_response(&e)
        }
        Err(e) => {
            tracing::error!("Blocking worker failed: {}", e);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                e.to_string(),
            )
        }
    }
}

/// Translate an engine error into its HTTP response
pub fn match_error_response(err: &MatchError) -> HttpResponse {
    let (status, error) = match err.kind() {
        MatchErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid input"),
        MatchErrorKind::NotFound => (StatusCode::NOT_FOUND, "Nothing to match"),
        MatchErrorKind::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable"),
    };
    error_body(status, error, err.to_string())
}

fn error_body(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}
