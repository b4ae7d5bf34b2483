#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use faqbase_api::auth::jwt::{generate_access_token, JwtConfig};
use faqbase_api::config::ServerConfig;
use faqbase_api::routes;
use faqbase_api::state::AppState;
use faqbase_core::roles::{ROLE_ADMIN, ROLE_USER, TIER_FREE, TIER_PREMIUM};
use faqbase_core::status::FaqStatus;
use faqbase_core::types::DbId;
use faqbase_db::models::faq::FaqItem;
use faqbase_db::repositories::FaqRepo;
use faqbase_enrich::{
    EnrichError, EnrichmentGateway, EnrichmentOutcome, GeneratedQa, JudgeReport, JudgeScore,
    JudgeVerdict,
};
use faqbase_enrich::types::{AnswerScores, JudgeSummary, QuestionScores};
use faqbase_pipeline::Orchestrator;

/// Scripted gateway for API tests: instant deterministic enrichment,
/// one generated candidate per document, everything passes judging.
struct StubGateway;

#[async_trait]
impl EnrichmentGateway for StubGateway {
    async fn analyze(
        &self,
        question: &str,
        _answer_raw: &str,
        _existing_tags: &[String],
    ) -> Result<EnrichmentOutcome, EnrichError> {
        Ok(EnrichmentOutcome {
            answer: format!("Enriched: {question}"),
            answer_brief: Some("brief".to_string()),
            tags: vec!["stub".to_string()],
            categories: vec!["testing".to_string()],
            ..Default::default()
        })
    }

    async fn generate_qa_pairs(
        &self,
        document_text: &str,
        _existing_tags: &[String],
    ) -> Result<Vec<GeneratedQa>, EnrichError> {
        Ok(vec![GeneratedQa {
            question: format!("Imported: {}", document_text.chars().take(24).collect::<String>()),
            answer: "Imported answer".to_string(),
            confidence: 0.9,
            ..Default::default()
        }])
    }

    async fn judge_qa_pairs(
        &self,
        pairs: &[GeneratedQa],
        _document_summary: &str,
    ) -> Result<JudgeReport, EnrichError> {
        let results: Vec<JudgeScore> = pairs
            .iter()
            .map(|_| JudgeScore {
                question_scores: QuestionScores {
                    naturalness: 4.5,
                    context_relevance: 4.5,
                    knowledge_clarity: 4.5,
                    phrasing: 4.5,
                },
                answer_scores: AnswerScores {
                    accuracy: 4.5,
                    completeness: 4.5,
                    mastery: 4.5,
                    independence: 4.5,
                },
                average: 4.5,
                verdict: JudgeVerdict::Pass,
                question_suggestion: None,
                answer_suggestion: None,
            })
            .collect();
        Ok(JudgeReport {
            summary: JudgeSummary {
                total: results.len(),
                passed: results.len(),
                failed: 0,
            },
            results,
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and a fixed JWT
/// secret so tests can mint their own tokens.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the scripted gateway.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let orchestrator = Arc::new(Orchestrator::new(pool.clone(), Arc::new(StubGateway)));

    let state = AppState {
        pool,
        config: Arc::new(config),
        orchestrator,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    generate_access_token(1, ROLE_ADMIN, TIER_FREE, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn user_token(user_id: DbId, tier: &str) -> String {
    generate_access_token(user_id, ROLE_USER, tier, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn free_user_token() -> String {
    user_token(2, TIER_FREE)
}

pub fn premium_user_token() -> String {
    user_token(3, TIER_PREMIUM)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    send(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, path, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, path, token, Some(body)).await
}

pub async fn delete_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::DELETE, path, token, Some(body)).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Lifecycle helpers
// ---------------------------------------------------------------------------

/// Poll until the item reaches `expected`; background enrichment with
/// the stub gateway settles quickly but asynchronously.
pub async fn wait_for_status(pool: &PgPool, faq_id: DbId, expected: FaqStatus) -> FaqItem {
    for _ in 0..200 {
        let item = FaqRepo::find_by_id(pool, faq_id).await.unwrap().unwrap();
        if item.status_id == expected.id() {
            return item;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("item {faq_id} never reached status '{expected}'");
}
