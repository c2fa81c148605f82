pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::bulk_edit::handlers as bulk_edit;
use crate::export::handlers as export;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route("/api/v1/resumes/upload", post(resumes::handle_upload))
        .route("/api/v1/resumes/parse", post(resumes::handle_parse))
        .route("/api/v1/resumes/export", post(export::handle_export))
        // Bulk edit
        .route(
            "/api/v1/bulk-edit/experience/format",
            post(bulk_edit::handle_format_experience),
        )
        .route(
            "/api/v1/bulk-edit/experience/parse",
            post(bulk_edit::handle_parse_experience),
        )
        .route(
            "/api/v1/bulk-edit/projects/format",
            post(bulk_edit::handle_format_projects),
        )
        .route(
            "/api/v1/bulk-edit/projects/parse",
            post(bulk_edit::handle_parse_projects),
        )
        // AI suggestions
        .route("/api/v1/ai/enhance", post(suggestions::handle_enhance))
        .route("/api/v1/ai/apply", post(suggestions::handle_apply))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extract::docx::tests::sample_docx;
    use crate::suggestions::enhancer::RuleBasedEnhancer;
    use crate::suggestions::store::InMemorySuggestionStore;

    const BOUNDARY: &str = "tailor-test-boundary";

    fn app() -> Router {
        build_router(AppState {
            config: Config::default(),
            enhancer: Arc::new(RuleBasedEnhancer),
            suggestions: Arc::new(InMemorySuggestionStore::new(Duration::from_secs(60))),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload(field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(
            &app(),
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_parse_text() {
        let response = send(
            &app(),
            post_json(
                "/api/v1/resumes/parse",
                json!({ "text": "Summary\nI build things.\n\nSkills\n- Rust\n- Go" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["personalSummary"], "I build things.");
        assert_eq!(
            body["data"]["dynamicSections"]["skills"]["content"],
            json!(["Rust", "Go"])
        );
    }

    #[tokio::test]
    async fn test_parse_empty_text_is_rejected() {
        let response = send(
            &app(),
            post_json("/api/v1/resumes/parse", json!({ "text": "  \n" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_docx() {
        let response = send(&app(), upload("file", "Jane CV.docx", &sample_docx())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"]["fileName"], "Jane CV.docx");
        assert!(body["data"]["rawText"]
            .as_str()
            .unwrap()
            .starts_with("Summary\nI build things."));
        assert_eq!(body["data"]["resume"]["personalSummary"], "I build things.");
        assert_eq!(
            body["data"]["resume"]["workExperience"][0]["company"],
            "Acme Inc"
        );
    }

    #[tokio::test]
    async fn test_upload_unsupported_extension() {
        let response = send(&app(), upload("file", "notes.txt", b"hello")).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let response = send(&app(), upload("attachment", "cv.docx", &sample_docx())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_corrupt_pdf() {
        let response = send(&app(), upload("file", "cv.pdf", b"this is not a pdf")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bulk_edit_experience_round_trip() {
        let app = app();
        let response = send(
            &app,
            post_json(
                "/api/v1/bulk-edit/experience/format",
                json!({ "entries": [{
                    "title": "Engineer",
                    "company": "Acme",
                    "duration": "2020 - 2022",
                    "bullets": ["Built X"]
                }]}),
            ),
        )
        .await;
        let text = json_body(response).await["data"]["text"].clone();
        assert_eq!(text, "[Acme] Engineer (2020 - 2022)\nBuilt X");

        let response = send(
            &app,
            post_json("/api/v1/bulk-edit/experience/parse", json!({ "text": text })),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["data"]["entries"][0]["company"], "Acme");
        assert_eq!(body["data"]["entries"][0]["bullets"], json!(["Built X"]));
    }

    #[tokio::test]
    async fn test_export_markdown_attachment() {
        let response = send(
            &app(),
            post_json(
                "/api/v1/resumes/export",
                json!({
                    "resumeData": { "personalSummary": "I build things." },
                    "format": "markdown",
                    "fileName": "Jane Doe.docx"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe.md\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("I build things."));
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let response = send(
            &app(),
            post_json(
                "/api/v1/resumes/export",
                json!({ "resumeData": {}, "format": "pdf" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_enhance_then_apply() {
        let app = app();
        let resume = json!({
            "personalSummary": "Backend engineer",
            "workExperience": [{
                "title": "Engineer",
                "company": "Acme",
                "duration": "2020",
                "bullets": ["Worked on billing services"]
            }]
        });

        let response = send(
            &app,
            post_json(
                "/api/v1/ai/enhance",
                json!({ "jobDescription": "Rust services, Rust tooling", "resumeData": resume }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let session_id = body["data"]["sessionId"].clone();
        let bullet = body["data"]["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["target"]["kind"] == "experienceBullet")
            .unwrap()
            .clone();
        assert_eq!(bullet["enhanced"], "Developed billing services");

        let response = send(
            &app,
            post_json(
                "/api/v1/ai/apply",
                json!({
                    "sessionId": session_id,
                    "suggestionIds": [bullet["id"]],
                    "resumeData": resume
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["data"]["workExperience"][0]["bullets"][0],
            "Developed billing services"
        );
        assert_eq!(body["data"]["personalSummary"], "Backend engineer");
    }

    #[tokio::test]
    async fn test_enhance_requires_job_description() {
        let response = send(
            &app(),
            post_json(
                "/api/v1/ai/enhance",
                json!({ "jobDescription": " ", "resumeData": {} }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apply_unknown_session() {
        let response = send(
            &app(),
            post_json(
                "/api/v1/ai/apply",
                json!({
                    "sessionId": uuid::Uuid::new_v4(),
                    "suggestionIds": [],
                    "resumeData": {}
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
