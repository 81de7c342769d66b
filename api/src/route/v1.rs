use axum::Router;
use registry::AppRegistry;

use super::{
    auth::build_auth_routers, book::build_book_routers, health::build_health_check_routers,
    role::build_role_routers, student::build_student_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_book_routers())
        .merge(build_student_routers())
        .merge(build_role_routers())
        .merge(build_auth_routers());

    Router::new()
        .merge(build_health_check_routers())
        .nest("/api/v1", router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, sync::Arc};

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use kernel::{
        model::auth::Identity,
        notifier::MockNotifier,
        repository::{
            auth::MockAuthRepository, book::MockBookRepository,
            health::MockHealthCheckRepository, roster::MockRosterRepository,
        },
        service::book::BookService,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ADMIN_TOKEN: &str = "admin-session";
    const MEMBER_TOKEN: &str = "member-session";

    // ADMIN_TOKEN と MEMBER_TOKEN だけが有効なセッションとして解決される
    fn app(books: MockBookRepository) -> axum::Router {
        let mut auth = MockAuthRepository::new();
        auth.expect_fetch_identity_from_token().returning(|token| {
            Ok(match token.0.as_str() {
                ADMIN_TOKEN => Some(Identity("librarian@school.test".into())),
                MEMBER_TOKEN => Some(Identity("teacher@school.test".into())),
                _ => None,
            })
        });
        let mut health = MockHealthCheckRepository::new();
        health.expect_check_db().returning(|| true);

        let roster: Arc<dyn kernel::repository::roster::RosterRepository> =
            Arc::new(MockRosterRepository::new());
        let book_service = Arc::new(BookService::new(
            Arc::new(books),
            roster.clone(),
            Arc::new(MockNotifier::new()),
        ));
        let registry = AppRegistry::with_components(
            Arc::new(health),
            Arc::new(auth),
            roster,
            book_service,
            HashSet::from(["librarian@school.test".to_string()]),
        );
        routes().with_state(registry)
    }

    fn request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn invalid_book_body() -> Value {
        json!({
            "code": 0,
            "title": "",
            "author": "",
            "genre": "",
            "editor": "",
            "location": "",
            "reference": "",
            "status": "active"
        })
    }

    #[tokio::test]
    async fn health_check_needs_no_session() {
        let res = app(MockBookRepository::new())
            .oneshot(request(Method::GET, "/health", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_unknown_session_is_forbidden() {
        let res = app(MockBookRepository::new())
            .oneshot(request(Method::GET, "/api/v1/books", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app(MockBookRepository::new())
            .oneshot(request(Method::GET, "/api/v1/books", Some("expired"), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn role_reflects_admin_list() {
        let res = app(MockBookRepository::new())
            .oneshot(request(Method::GET, "/api/v1/role", Some(MEMBER_TOKEN), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "isAdmin": false }));
    }

    #[tokio::test]
    async fn member_is_rejected_before_body_validation() {
        let uri = format!("/api/v1/books/{}", kernel::model::id::BookId::new());
        let res = app(MockBookRepository::new())
            .oneshot(request(Method::PUT, &uri, Some(MEMBER_TOKEN), Some(invalid_book_body())))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        // 形の崩れた本文でも権限の確認が先に行われる
        let res = app(MockBookRepository::new())
            .oneshot(request(Method::POST, "/api/v1/books", Some(MEMBER_TOKEN), Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_gets_validation_errors() {
        let res = app(MockBookRepository::new())
            .oneshot(request(
                Method::POST,
                "/api/v1/books",
                Some(ADMIN_TOKEN),
                Some(invalid_book_body()),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app(MockBookRepository::new())
            .oneshot(request(Method::POST, "/api/v1/books", Some(ADMIN_TOKEN), Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_delete_by_status() {
        let res = app(MockBookRepository::new())
            .oneshot(request(
                Method::DELETE,
                "/api/v1/books?status=lost",
                Some(MEMBER_TOKEN),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let mut books = MockBookRepository::new();
        books
            .expect_delete_by_status()
            .times(1)
            .returning(|event| {
                assert_eq!(event.status, kernel::model::book::BookStatus::Lost);
                Ok(2)
            });
        let res = app(books)
            .oneshot(request(
                Method::DELETE,
                "/api/v1/books?status=lost",
                Some(ADMIN_TOKEN),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "deleted": 2 }));
    }
}
