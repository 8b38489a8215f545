use crate::infra::AppState;
use crate::page;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use residence_docs::error::AppError;
use residence_docs::renewal::RequirementsQuery;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub(crate) struct ResolveResponse {
    pub(crate) status: String,
    pub(crate) scenario: String,
    pub(crate) documents: Vec<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/documents/resolve", post(resolve_endpoint))
}

pub(crate) async fn index(
    Extension(state): Extension<AppState>,
) -> Result<Html<String>, AppError> {
    let body = page::render_index(&state.rulebook)?;
    Ok(Html(body))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn resolve_endpoint(
    Extension(state): Extension<AppState>,
    Json(query): Json<RequirementsQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    let documents = state.rulebook.requirements(&query)?;
    Ok(Json(ResolveResponse {
        status: query.status,
        scenario: query.scenario,
        documents,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum_prometheus::PrometheusMetricLayer;
    use metrics_exporter_prometheus::PrometheusHandle;
    use residence_docs::renewal::RenewalRulebook;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, OnceLock};
    use tower::util::ServiceExt;

    // The Prometheus recorder installs globally; share one handle across tests.
    fn metrics_handle() -> PrometheusHandle {
        static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
        HANDLE
            .get_or_init(|| PrometheusMetricLayer::pair().1)
            .clone()
    }

    fn test_state() -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(metrics_handle()),
            rulebook: Arc::new(RenewalRulebook::standard()),
        }
    }

    fn test_app() -> Router {
        router().layer(Extension(test_state()))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("handler responds");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_serves_the_form_page() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("handler responds");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type set")
            .to_str()
            .expect("ascii");
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let html = String::from_utf8(body.to_vec()).expect("utf-8 page");
        assert!(html.contains("正規生"));
        assert!(html.contains("必要書類を表示"));
    }

    #[tokio::test]
    async fn resolve_endpoint_returns_the_document_list() {
        let query = RequirementsQuery {
            status: "正規生".to_string(),
            scenario: "前学期も同じ身分で正規生として在籍".to_string(),
            ..RequirementsQuery::default()
        };

        let Json(body) = resolve_endpoint(Extension(test_state()), Json(query))
            .await
            .expect("authored pair resolves");

        assert_eq!(body.status, "正規生");
        assert_eq!(body.documents.len(), 6);
        assert_eq!(
            body.documents.first().map(String::as_str),
            Some("在留期間更新許可申請書（申請人等作成用の3枚 + 所属機関等作成用の2枚）")
        );
    }

    #[tokio::test]
    async fn resolve_endpoint_rejects_unknown_status_with_bad_request() {
        let query = RequirementsQuery {
            status: "聴講生".to_string(),
            scenario: "前学期、他大学に在籍".to_string(),
            ..RequirementsQuery::default()
        };

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/documents/resolve")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&query).expect("query serializes"),
            ))
            .expect("request builds");

        let response = test_app().oneshot(request).await.expect("handler responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value =
            serde_json::from_slice(&body).expect("error body is json");
        assert!(payload["error"]
            .as_str()
            .expect("error message present")
            .contains("聴講生"));
    }
}
