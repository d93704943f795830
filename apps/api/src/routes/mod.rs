pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::cms::handlers as cms;
use crate::generation::handlers as generation;
use crate::models::cms::{AboutUs, Footer, HelpContent, Logo};
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Public site content
        .route("/api/v1/content/logo", get(cms::handle_get_logo))
        .route("/api/v1/content/about", get(cms::handle_get_about))
        .route("/api/v1/content/help", get(cms::handle_get_help))
        .route("/api/v1/content/footer", get(cms::handle_get_footer))
        .route("/api/v1/blog", get(cms::handle_list_posts))
        .route("/api/v1/blog/:slug", get(cms::handle_get_post_by_slug))
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resume::handle_list_resumes).post(resume::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/validate",
            post(resume::handle_validate_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resume::handle_get_resume)
                .put(resume::handle_update_resume)
                .delete(resume::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/generate",
            post(generation::handle_generate),
        )
        // Wizard
        .route("/api/v1/wizard", get(resume::handle_wizard_start))
        .route("/api/v1/wizard/steps", get(resume::handle_wizard_steps))
        .route("/api/v1/wizard/edit/:id", get(resume::handle_wizard_edit))
        .route("/api/v1/wizard/advance", post(resume::handle_wizard_advance))
        .route("/api/v1/wizard/retreat", post(resume::handle_wizard_retreat))
        .route("/api/v1/wizard/submit", post(resume::handle_wizard_submit))
        // Admin content
        .route(
            "/api/v1/admin/content/logo",
            get(cms::handle_admin_get_page::<Logo>).put(cms::handle_put_logo),
        )
        .route(
            "/api/v1/admin/content/about",
            get(cms::handle_admin_get_page::<AboutUs>).put(cms::handle_put_about),
        )
        .route(
            "/api/v1/admin/content/help",
            get(cms::handle_admin_get_page::<HelpContent>).put(cms::handle_put_help),
        )
        .route(
            "/api/v1/admin/content/footer",
            get(cms::handle_admin_get_page::<Footer>).put(cms::handle_put_footer),
        )
        .route(
            "/api/v1/admin/blog",
            get(cms::handle_admin_list_posts).post(cms::handle_create_post),
        )
        .route(
            "/api/v1/admin/blog/:id",
            get(cms::handle_get_post)
                .put(cms::handle_update_post)
                .delete(cms::handle_delete_post),
        )
        // Admin AI templates
        .route(
            "/api/v1/admin/ai-templates",
            get(templates::handle_list_templates).post(templates::handle_create_template),
        )
        .route(
            "/api/v1/admin/ai-templates/:id",
            get(templates::handle_get_template)
                .put(templates::handle_update_template)
                .delete(templates::handle_delete_template),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::provision_admin;
    use crate::cms::store::ContentStore;
    use crate::config::Config;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::resume::validation::fixtures::complete_resume;

    struct CannedGenerator;

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _system: &str,
            prompt: &str,
            _pdf_base64: Option<&str>,
        ) -> Result<String, LlmError> {
            Ok(format!("RESUME ({} chars of input)", prompt.len()))
        }
    }

    struct App {
        router: Router,
        content: Arc<dyn ContentStore>,
    }

    impl App {
        async fn new() -> Self {
            let state = AppState::in_memory(Config::for_tests(), Arc::new(CannedGenerator));
            provision_admin(&state).await.unwrap();
            Self {
                content: state.content.clone(),
                router: build_router(state),
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn signup(&self, email: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/v1/auth/signup",
                    None,
                    Some(json!({"email": email, "password": "secret123"})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["accessToken"].as_str().unwrap().to_string()
        }

        async fn login_admin(&self) -> String {
            let config = Config::for_tests();
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/v1/auth/login",
                    None,
                    Some(json!({"email": config.admin_email, "password": config.admin_password})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            assert_eq!(body["user"]["isAdmin"], true);
            body["accessToken"].as_str().unwrap().to_string()
        }
    }

    fn resume_json() -> Value {
        serde_json::to_value(complete_resume()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = App::new().await;
        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "resumeforge-api");
    }

    #[tokio::test]
    async fn test_resume_routes_require_session() {
        let app = App::new().await;
        let (status, body) = app.send(Method::GET, "/api/v1/resumes", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_resume_crud_flow() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;

        let (status, created) = app
            .send(Method::POST, "/api/v1/resumes", Some(&token), Some(resume_json()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, listed) = app
            .send(Method::GET, "/api/v1/resumes", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["title"], "Backend Engineer");

        let mut edited = resume_json();
        edited["biodata"]["name"] = json!("Budi S.");
        let (status, doc) = app
            .send(
                Method::PUT,
                &format!("/api/v1/resumes/{id}"),
                Some(&token),
                Some(edited),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["biodata"]["name"], "Budi S.");

        let (status, _) = app
            .send(Method::DELETE, &format!("/api/v1/resumes/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send(Method::GET, &format!("/api/v1/resumes/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["redirectTo"], "/my-resumes");
    }

    #[tokio::test]
    async fn test_create_invalid_resume_reports_fields() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;
        let mut resume = resume_json();
        resume["targetPosition"]["positionName"] = json!("");

        let (status, body) = app
            .send(Method::POST, "/api/v1/resumes", Some(&token), Some(resume))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["fields"][0]["path"],
            "targetPosition.positionName"
        );
    }

    #[tokio::test]
    async fn test_resumes_are_private_to_owner() {
        let app = App::new().await;
        let owner = app.signup("owner@example.com").await;
        let other = app.signup("other@example.com").await;

        let (_, created) = app
            .send(Method::POST, "/api/v1/resumes", Some(&owner), Some(resume_json()))
            .await;
        let id = created["id"].as_str().unwrap();

        let (status, _) = app
            .send(Method::GET, &format!("/api/v1/resumes/{id}"), Some(&other), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validate_scoped_to_step() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;
        let blank = json!({"targetPosition": {"applyingForPosition": false}});

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/resumes/validate?step=1",
                Some(&token),
                Some(blank.clone()),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);

        let (_, body) = app
            .send(
                Method::POST,
                "/api/v1/resumes/validate",
                Some(&token),
                Some(blank.clone()),
            )
            .await;
        assert_eq!(body["valid"], false);

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/resumes/validate?step=12",
                Some(&token),
                Some(blank),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wizard_round_trip() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;

        let (status, steps) = app
            .send(Method::GET, "/api/v1/wizard/steps", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(steps.as_array().unwrap().len(), 9);

        let (_, mut wizard) = app
            .send(Method::GET, "/api/v1/wizard", Some(&token), None)
            .await;
        assert_eq!(wizard["currentStep"], 1);

        // Step 2 with an empty biodata blocks.
        wizard["currentStep"] = json!(2);
        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/wizard/advance",
                Some(&token),
                Some(wizard.clone()),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["path"] == "biodata.name"));

        let (_, back) = app
            .send(
                Method::POST,
                "/api/v1/wizard/retreat",
                Some(&token),
                Some(wizard.clone()),
            )
            .await;
        assert_eq!(back["currentStep"], 1);

        wizard["resume"] = resume_json();
        let (_, forward) = app
            .send(
                Method::POST,
                "/api/v1/wizard/advance",
                Some(&token),
                Some(wizard.clone()),
            )
            .await;
        assert_eq!(forward["currentStep"], 3);

        wizard["currentStep"] = json!(9);
        let (status, submitted) = app
            .send(
                Method::POST,
                "/api/v1/wizard/submit",
                Some(&token),
                Some(wizard),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let id = submitted["resumeId"].as_str().unwrap();
        assert_eq!(
            submitted["redirectTo"],
            format!("/resume/generate?resumeId={id}")
        );
        assert_eq!(submitted["state"]["currentStep"], 1);

        let (status, editing) = app
            .send(
                Method::GET,
                &format!("/api/v1/wizard/edit/{id}"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(editing["editId"], id);
    }

    #[tokio::test]
    async fn test_generate_without_template_returns_notice() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;
        let (_, created) = app
            .send(Method::POST, "/api/v1/resumes", Some(&token), Some(resume_json()))
            .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                &format!("/api/v1/resumes/{id}/generate"),
                Some(&token),
                Some(json!({"resumeType": "professional"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["generatedResumeText"]
            .as_str()
            .unwrap()
            .starts_with("RESUME"));
        assert!(body["notice"].is_string());
        assert!(body.get("referenceTemplate").is_none());
    }

    #[tokio::test]
    async fn test_admin_routes_reject_regular_users() {
        let app = App::new().await;
        let token = app.signup("budi@example.com").await;
        let (status, _) = app
            .send(
                Method::PUT,
                "/api/v1/admin/content/footer",
                Some(&token),
                Some(json!({"text": "hi"})),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_signup_cannot_claim_admin_email() {
        let app = App::new().await;
        for email in ["admin@example.com", "ADMIN@example.com", " Admin@Example.com "] {
            let (status, body) = app
                .send(
                    Method::POST,
                    "/api/v1/auth/signup",
                    None,
                    Some(json!({"email": email, "password": "attacker1"})),
                )
                .await;
            assert_eq!(status, StatusCode::CONFLICT, "{email}");
            assert!(body.get("accessToken").is_none());
        }

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "admin@example.com", "password": "attacker1"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send(
                Method::PUT,
                "/api/v1/admin/content/footer",
                None,
                Some(json!({"text": "owned"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_public_content_reads_do_not_write() {
        let app = App::new().await;
        let (status, help) = app
            .send(Method::GET, "/api/v1/content/help", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(help["faqs"]
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["question"] != "" && f["answer"] != ""));
        app.send(Method::GET, "/api/v1/content/about", None, None)
            .await;
        assert!(app.content.get_singleton("help").await.unwrap().is_none());
        assert!(app.content.get_singleton("aboutUs").await.unwrap().is_none());

        let admin = app.login_admin().await;
        let (status, seeded) = app
            .send(Method::GET, "/api/v1/admin/content/help", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(seeded["mainTitle"], help["mainTitle"]);
        assert!(app.content.get_singleton("help").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_admin_edits_content_and_blog() {
        let app = App::new().await;
        let admin = app.login_admin().await;

        let (status, _) = app
            .send(
                Method::PUT,
                "/api/v1/admin/content/footer",
                Some(&admin),
                Some(json!({"text": "© ResumeForge"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let (_, footer) = app
            .send(Method::GET, "/api/v1/content/footer", None, None)
            .await;
        assert_eq!(footer["text"], "© ResumeForge");

        let (_, about) = app
            .send(Method::GET, "/api/v1/content/about", None, None)
            .await;
        assert_eq!(about["title"], "About ResumeForge");

        let post = json!({"title": "CV tips", "slug": "cv-tips", "content": "Keep it short."});
        let (status, created) = app
            .send(Method::POST, "/api/v1/admin/blog", Some(&admin), Some(post.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["date"].is_string());

        let (status, _) = app
            .send(Method::POST, "/api/v1/admin/blog", Some(&admin), Some(post))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, by_slug) = app
            .send(Method::GET, "/api/v1/blog/cv-tips", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_slug["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_admin_template_rejects_non_pdf() {
        let app = App::new().await;
        let admin = app.login_admin().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/admin/ai-templates",
                Some(&admin),
                Some(json!({
                    "name": "Modern",
                    "resumeType": "professional",
                    "pdfData": "data:image/png;base64,iVBORw0KGgo="
                })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"][0]["path"], "pdfData");
    }
}
