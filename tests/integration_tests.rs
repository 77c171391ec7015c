// Integration tests for Mentor Match

use actix_web::test as actix_test;
use actix_web::{web, App};
use mentor_match::core::{HashingEncoder, MatchError, MatchService, SemanticEncoder, UnavailableEncoder};
use mentor_match::config::MatchingSettings;
use mentor_match::models::{
    BlendWeights, CandidateProfile, FallbackPolicy, HealthResponse, MatchResponse, ScoringMode,
};
use mentor_match::routes::{self, handle_json_payload_error, matches::AppState};
use mentor_match::services::{
    EncoderRuntime, InMemoryDirectory, MentorProfile, ProfileDirectory, StudentProfile,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Encoder that maps every text to the same vector
struct ConstantEncoder;

impl SemanticEncoder for ConstantEncoder {
    fn id(&self) -> &str {
        "constant"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

fn hashing_service(fallback: FallbackPolicy) -> MatchService {
    MatchService::new(Arc::new(HashingEncoder::default()), BlendWeights::default(), fallback)
}

fn mentor_pool() -> Vec<CandidateProfile> {
    vec![
        CandidateProfile::new("mentor-1", ["Machine Learning", "Data Science", "Python"]),
        CandidateProfile::new("mentor-2", ["Web Development", "Frontend", "React"]),
        CandidateProfile::new("mentor-3", ["Entrepreneurship", "Business Development", "Startup"]),
        CandidateProfile::new("mentor-4", ["Mobile Development", "iOS", "Swift"]),
    ]
}

#[test]
fn test_integration_react_scenario() {
    let service = hashing_service(FallbackPolicy::Abort);
    let pool = vec![
        CandidateProfile::new("m1", ["react", "javascript"]),
        CandidateProfile::new("m2", ["cooking", "travel"]),
    ];

    let outcome = service.match_profiles(&["react", "frontend"], &pool).unwrap();

    assert_eq!(outcome.matches.len(), 2);
    assert_eq!(outcome.matches[0].candidate_id, "m1");
    assert_eq!(outcome.matches[1].candidate_id, "m2");
    assert!(outcome.matches[0].similarity_score > outcome.matches[1].similarity_score);
}

#[test]
fn test_integration_output_is_permutation_of_pool() {
    let service = hashing_service(FallbackPolicy::Abort);
    let pool = mentor_pool();

    let outcome = service.match_profiles(&["Python", "Startup"], &pool).unwrap();

    assert_eq!(outcome.matches.len(), pool.len());
    let returned: HashSet<&str> = outcome.matches.iter().map(|m| m.candidate_id.as_str()).collect();
    let expected: HashSet<&str> = pool.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(returned, expected);

    for i in 1..outcome.matches.len() {
        assert!(
            outcome.matches[i - 1].similarity_score >= outcome.matches[i].similarity_score,
            "Matches not sorted by score"
        );
    }
}

#[test]
fn test_integration_ties_keep_input_order() {
    let service = MatchService::new(
        Arc::new(ConstantEncoder),
        BlendWeights::default(),
        FallbackPolicy::Abort,
    );
    let pool = vec![
        CandidateProfile::new("c", ["gardening"]),
        CandidateProfile::new("a", ["painting"]),
        CandidateProfile::new("b", ["knitting"]),
    ];

    let first = service.match_profiles(&["rust"], &pool).unwrap();
    let second = service.match_profiles(&["rust"], &pool).unwrap();

    let ids: Vec<&str> = first.matches.iter().map(|m| m.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(first.matches, second.matches);
}

#[test]
fn test_integration_empty_requester_not_found() {
    let service = hashing_service(FallbackPolicy::Abort);
    let empty: Vec<String> = vec![];
    let result = service.match_profiles(&empty, &mentor_pool());
    assert!(matches!(result, Err(MatchError::NotFound(_))));
}

#[test]
fn test_integration_empty_pool_not_found() {
    let service = hashing_service(FallbackPolicy::Abort);
    let result = service.match_profiles(&["react"], &[]);
    assert!(matches!(result, Err(MatchError::NotFound(_))));
}

#[test]
fn test_integration_single_candidate() {
    let service = hashing_service(FallbackPolicy::Abort);
    let pool = vec![CandidateProfile::new("only", ["underwater basket weaving"])];

    let outcome = service.match_profiles(&["react"], &pool).unwrap();

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].candidate_id, "only");
}

#[test]
fn test_integration_lexical_fallback_changes_mode() {
    let service = MatchService::new(
        Arc::new(UnavailableEncoder::new("e5", "not loaded")),
        BlendWeights::default(),
        FallbackPolicy::LexicalOnly,
    );

    let outcome = service.match_profiles(&["Swift", "iOS"], &mentor_pool()).unwrap();

    assert_eq!(outcome.mode, ScoringMode::LexicalOnly);
    assert_eq!(outcome.matches[0].candidate_id, "mentor-4");
}

#[test]
fn test_integration_concurrent_requests_are_isolated() {
    let service = hashing_service(FallbackPolicy::Abort);
    let expected = service
        .match_profiles(&["Machine Learning"], &mentor_pool())
        .unwrap()
        .matches;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            std::thread::spawn(move || {
                // interleave requests over different corpora
                let pool: Vec<CandidateProfile> = if i % 2 == 0 {
                    mentor_pool()
                } else {
                    (0..20)
                        .map(|j| CandidateProfile::new(format!("x{}", j), [format!("machine topic{}", j)]))
                        .collect()
                };
                let outcome = service.match_profiles(&["Machine Learning"], &pool).unwrap();
                (i, outcome.matches)
            })
        })
        .collect();

    for handle in handles {
        let (i, matches) = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(matches, expected);
        }
    }
}

fn test_state(encoder: Arc<dyn SemanticEncoder>, available: bool, fallback: FallbackPolicy) -> AppState {
    let directory = InMemoryDirectory::new(
        vec![
            StudentProfile {
                id: "student-1".to_string(),
                interests: vec!["Machine Learning".to_string(), "Python".to_string()],
            },
            StudentProfile {
                id: "student-empty".to_string(),
                interests: vec![],
            },
        ],
        mentor_pool()
            .into_iter()
            .map(|c| MentorProfile {
                id: c.id,
                name: None,
                expertise: c.tags,
            })
            .collect(),
    );

    let runtime = if available {
        EncoderRuntime::with_encoder(encoder)
    } else {
        EncoderRuntime::unavailable("e5", "not loaded")
    };

    AppState {
        directory: Arc::new(directory) as Arc<dyn ProfileDirectory>,
        service: MatchService::new(runtime.encoder(), BlendWeights::default(), fallback),
        encoder: runtime.status(),
        matching: MatchingSettings::default(),
    }
}

macro_rules! test_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_route_match_student() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "student-1", "limit": 2 }))
        .to_request();
    let resp: MatchResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.matches.len(), 2);
    assert_eq!(resp.matches[0].mentor_id, "mentor-1");
    assert_eq!(resp.total_candidates, 4);
    assert_eq!(resp.scoring, ScoringMode::Hybrid);
}

#[actix_web::test]
async fn test_route_match_without_limit_returns_every_mentor() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let pool: Vec<CandidateProfile> = (0..30)
        .map(|i| CandidateProfile::new(format!("p{}", i), [format!("python topic{}", i)]))
        .collect();
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match/profile")
        .set_json(serde_json::json!({ "interests": ["python"], "candidates": pool }))
        .to_request();
    let resp: MatchResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.matches.len(), 30);
    assert_eq!(resp.total_candidates, 30);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "student-1" }))
        .to_request();
    let resp: MatchResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.matches.len(), 4);
}

#[actix_web::test]
async fn test_route_unknown_student_is_404() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "nobody" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_route_empty_profile_is_404() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "student-empty" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_route_missing_student_id_is_400() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_route_unavailable_encoder_aborts_with_503() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), false, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(serde_json::json!({ "student_id": "student-1" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), 503);
}

#[actix_web::test]
async fn test_route_profile_match_with_fallback() {
    let app = test_app!(test_state(
        Arc::new(HashingEncoder::default()),
        false,
        FallbackPolicy::LexicalOnly
    ));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match/profile")
        .set_json(serde_json::json!({
            "interests": ["react", "frontend"],
            "candidates": [
                { "id": "m1", "expertise": ["react", "javascript"] },
                { "id": "m2", "expertise": ["cooking", "travel"] }
            ]
        }))
        .to_request();
    let resp: MatchResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.scoring, ScoringMode::LexicalOnly);
    assert_eq!(resp.matches[0].mentor_id, "m1");
    assert_eq!(resp.matches[1].similarity_score, 0.0);
}

#[actix_web::test]
async fn test_route_profile_match_empty_pool_is_404() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::default()), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/match/profile")
        .set_json(serde_json::json!({ "interests": ["react"], "candidates": [] }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_route_health_reports_encoder() {
    let app = test_app!(test_state(Arc::new(HashingEncoder::new(32)), true, FallbackPolicy::Abort));

    let req = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp: HealthResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.status, "healthy");
    assert_eq!(resp.encoder.dimension, 32);
    assert!(resp.encoder.available);
}
