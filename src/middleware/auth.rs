use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;
use crate::error::ApiError;

/// Handlers take `CurrentUser` as an argument. The authentication layer in
/// front of this service inserts it into the request extensions; a request
/// that reaches a handler without one is rejected with 401.
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::warn!("Request reached {} without an authenticated user", parts.uri.path());
            ApiError::unauthorized("Unauthorized, please log in.")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/whoami", get(|user: CurrentUser| async move { user.user_name }))
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let res = app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn extracts_user_from_extensions() {
        let app = app().layer(Extension(CurrentUser::new(7, "admin", 1)));
        let res = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin");
    }
}
