//! Users API handlers
//!
//! The four operations on `/v1/api/users`. Each handler applies its own role
//! requirement before touching the store; validation runs against the full
//! candidate state so partial updates are checked after the merge.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use ud_auth::Role;
use ud_core::contract::Contract;
use ud_core::Id;
use ud_store::{UserAttributes, UserContract};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, RequestIdentity};
use crate::representers::UserRepresenter;

/// Login of the shared record non-admin callers may see and modify. This is
/// a fixed filter, not the caller's identity name.
const SHARED_LOGIN: &str = "user";

/// List users
///
/// GET /v1/api/users
pub async fn list_users(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> ApiResult<impl IntoResponse> {
    let caller = identity.require(Role::User)?;

    let users = if caller.is_admin() {
        state.store.find_all().await?
    } else {
        state.store.find_by_login(SHARED_LOGIN).await?
    };

    Ok(Json(UserRepresenter::represent_all(users)))
}

/// Create a user
///
/// POST /v1/api/users
pub async fn create_user(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Json(body): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    identity.require(Role::User)?;

    let attrs = UserAttributes {
        login: body.login,
        phone: body.phone,
        pass: body.pass,
    };
    UserContract.validate(&attrs)?;

    let user = state.store.insert(&attrs).await?;
    Ok((StatusCode::CREATED, Json(UserRepresenter::represent(user))))
}

/// Update a user
///
/// PUT /v1/api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<Id>,
    Json(body): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let caller = identity.require(Role::User)?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    if !caller.is_admin() && user.login != SHARED_LOGIN {
        return Err(ApiError::Forbidden);
    }

    let attrs = user.attributes().merged(body.login, body.phone, body.pass);
    UserContract.validate(&attrs)?;

    // The record can vanish between lookup and write.
    let updated = state
        .store
        .update(user.id, &attrs)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(UserRepresenter::represent(updated)))
}

/// Delete a user (admin role only)
///
/// DELETE /v1/api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    identity.require(Role::Admin)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::not_found("User"));
    }

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Request body for POST /v1/api/users.
///
/// Missing fields default to empty strings; the contract rejects them.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub pass: String,
}

/// Request body for PUT /v1/api/users/:id. Absent fields keep prior values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub login: Option<String>,
    pub phone: Option<String>,
    pub pass: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use ud_auth::TokenTable;
    use ud_core::config::AuthConfig;
    use ud_store::MemoryUserStore;

    use crate::extractors::AppState;
    use crate::routes;

    const ADMIN: &str = "testAdmin";
    const USER: &str = "testUser";

    fn test_app() -> Router {
        let tokens = TokenTable::from_config(&AuthConfig::default()).unwrap();
        let state = AppState::new(Arc::new(MemoryUserStore::new()), Arc::new(tokens));
        routes::router().with_state(state)
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed(app: &Router, login: &str, phone: &str, pass: &str) -> i64 {
        let response = send(
            app,
            request(
                Method::POST,
                "/v1/api/users",
                Some(ADMIN),
                Some(json!({ "login": login, "phone": phone, "pass": pass })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_requests_without_token_are_unauthorized() {
        let app = test_app();

        let attempts = [
            (Method::GET, "/v1/api/users", None),
            (Method::POST, "/v1/api/users", Some(json!({}))),
            (Method::PUT, "/v1/api/users/1", Some(json!({}))),
            (Method::DELETE, "/v1/api/users/1", None),
        ];

        for (method, uri, body) in attempts {
            let response = send(&app, request(method, uri, None, body)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Unauthorized", "message": "No Bearer token provided" })
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_authorization_header_is_unauthorized() {
        let app = test_app();

        for value in ["Basic abc123", "bearer testAdmin", "testAdmin"] {
            let response = send(
                &app,
                Request::builder()
                    .method(Method::GET)
                    .uri("/v1/api/users")
                    .header(header::AUTHORIZATION, value)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Unauthorized", "message": "No Bearer token provided" })
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let app = test_app();

        let response = send(&app, request(Method::GET, "/v1/api/users", Some("nope"), None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Unauthorized", "message": "Invalid API Token" })
        );
    }

    #[tokio::test]
    async fn test_create_returns_record_with_id() {
        let app = test_app();

        let response = send(
            &app,
            request(
                Method::POST,
                "/v1/api/users",
                Some(ADMIN),
                Some(json!({ "login": "user", "phone": "555", "pass": "p" })),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({ "id": 1, "login": "user", "phone": "555", "pass": "p" })
        );
    }

    #[tokio::test]
    async fn test_create_collects_all_blank_field_errors() {
        let app = test_app();

        let response = send(
            &app,
            request(Method::POST, "/v1/api/users", Some(USER), Some(json!({}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "errors": [
                    "login: must not be blank",
                    "phone: must not be blank",
                    "pass: must not be blank",
                ]
            })
        );

        let response = send(
            &app,
            request(
                Method::POST,
                "/v1/api/users",
                Some(USER),
                Some(json!({ "login": "a", "pass": "p" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "errors": ["phone: must not be blank"] })
        );
    }

    #[tokio::test]
    async fn test_create_conflict_leaves_store_unchanged() {
        let app = test_app();
        seed(&app, "alice", "111", "secret").await;

        let response = send(
            &app,
            request(
                Method::POST,
                "/v1/api/users",
                Some(ADMIN),
                Some(json!({ "login": "alice", "phone": "222", "pass": "secret" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Conflict",
                "message": "User with this login and pass already exists.",
            })
        );

        let response = send(&app, request(Method::GET, "/v1/api/users", Some(ADMIN), None)).await;
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_filtered_for_non_admin() {
        let app = test_app();
        seed(&app, "user", "111", "pa").await;
        seed(&app, "alice", "222", "pb").await;
        seed(&app, "user", "333", "pc").await;

        let response = send(&app, request(Method::GET, "/v1/api/users", Some(ADMIN), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

        let response = send(&app, request(Method::GET, "/v1/api/users", Some(USER), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        let logins: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["login"].as_str().unwrap())
            .collect();
        assert_eq!(logins, vec!["user", "user"]);
    }

    #[tokio::test]
    async fn test_update_applies_partial_changes() {
        let app = test_app();
        let id = seed(&app, "alice", "111", "secret").await;

        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{id}"),
                Some(ADMIN),
                Some(json!({ "phone": "999" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "id": id, "login": "alice", "phone": "999", "pass": "secret" })
        );
    }

    #[tokio::test]
    async fn test_update_rejects_blank_merged_fields() {
        let app = test_app();
        let id = seed(&app, "alice", "111", "secret").await;

        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{id}"),
                Some(ADMIN),
                Some(json!({ "login": "" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "errors": ["login: must not be blank"] })
        );
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let app = test_app();

        let response = send(
            &app,
            request(
                Method::PUT,
                "/v1/api/users/999",
                Some(ADMIN),
                Some(json!({ "phone": "1" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_update_conflict_on_existing_pair() {
        let app = test_app();
        seed(&app, "alice", "111", "pa").await;
        let second = seed(&app, "bob", "222", "pb").await;

        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{second}"),
                Some(ADMIN),
                Some(json!({ "login": "alice", "pass": "pa" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Conflict",
                "message": "User with this login and pass already exists.",
            })
        );
    }

    #[tokio::test]
    async fn test_non_admin_cannot_update_other_logins() {
        let app = test_app();
        let id = seed(&app, "alice", "111", "secret").await;

        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{id}"),
                Some(USER),
                Some(json!({ "phone": "999" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await, json!({ "error": "Forbidden" }));

        // Record unchanged.
        let response = send(&app, request(Method::GET, "/v1/api/users", Some(ADMIN), None)).await;
        assert_eq!(body_json(response).await[0]["phone"], json!("111"));
    }

    #[tokio::test]
    async fn test_delete_requires_the_admin_role() {
        let app = test_app();
        let id = seed(&app, "alice", "111", "secret").await;

        let response = send(
            &app,
            request(Method::DELETE, &format!("/v1/api/users/{id}"), Some(USER), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        // A recognized token lacking the role gets no reason message.
        assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let app = test_app();

        let response = send(
            &app,
            request(Method::DELETE, "/v1/api/users/999", Some(ADMIN), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let app = test_app();

        // Create as admin.
        let response = send(
            &app,
            request(
                Method::POST,
                "/v1/api/users",
                Some(ADMIN),
                Some(json!({ "login": "user", "phone": "555", "pass": "p" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(
            created,
            json!({ "id": id, "login": "user", "phone": "555", "pass": "p" })
        );

        // Visible to the non-admin caller.
        let response = send(&app, request(Method::GET, "/v1/api/users", Some(USER), None)).await;
        let listed = body_json(response).await;
        assert!(listed
            .as_array()
            .unwrap()
            .iter()
            .any(|u| u["id"].as_i64() == Some(id)));

        // Non-admin may update the shared record; absent fields survive.
        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{id}"),
                Some(USER),
                Some(json!({ "phone": "999" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "id": id, "login": "user", "phone": "999", "pass": "p" })
        );

        // Delete is admin-only.
        let response = send(
            &app,
            request(Method::DELETE, &format!("/v1/api/users/{id}"), Some(USER), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(
            &app,
            request(Method::DELETE, &format!("/v1/api/users/{id}"), Some(ADMIN), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "deleted" }));

        // Gone afterwards.
        let response = send(
            &app,
            request(
                Method::PUT,
                &format!("/v1/api/users/{id}"),
                Some(ADMIN),
                Some(json!({ "phone": "0" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, request(Method::GET, "/v1/api/users", Some(ADMIN), None)).await;
        assert_eq!(body_json(response).await, json!([]));
    }
}
