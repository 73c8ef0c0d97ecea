//! Bearer-token identity middleware and the caller extractor.
//!
//! ```text
//! Request → identity_middleware → injects CallerContext into extensions
//!                                        ↓
//!                               Handler → Caller extractor reads it back
//! ```
//!
//! The middleware is provider-agnostic: it only talks to the
//! [`IdentityProvider`] port.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{CallerContext, ErrorCode};
use crate::ports::{IdentityError, IdentityProvider};

/// Middleware state - wraps the identity provider.
pub type IdentityState = Arc<dyn IdentityProvider>;

/// Resolves the `Authorization: Bearer <token>` header into a caller.
///
/// Requests without a header pass through untouched so that handlers
/// decide whether a caller is required. A header that does not resolve is
/// rejected with 401; an unreachable provider with 503.
pub async fn identity_middleware(
    State(provider): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let Some(header) = header else {
        return next.run(request).await;
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return rejection(IdentityError::InvalidCredential);
    };

    match provider.resolve(token).await {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(err) => rejection(err),
    }
}

fn rejection(err: IdentityError) -> Response {
    let (status, code) = match &err {
        IdentityError::Unavailable(msg) => {
            tracing::error!(error = %msg, "Identity provider unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::StoreUnavailable)
        }
        IdentityError::MissingCredential | IdentityError::InvalidCredential => {
            (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)
        }
    };
    (status, Json(ErrorResponse::new(code, err.to_string()))).into_response()
}

/// Extractor for the authenticated caller. Rejects with 401 when the
/// request carried no credential.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerContext);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerContext>()
            .cloned()
            .map(Caller)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::unauthorized("Authentication required")),
                )
                    .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn caller_is_read_from_extensions() {
        let caller = CallerContext::venue(UserId::new("venue-1").unwrap());
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(caller.clone());
        let (mut parts, _body) = request.into_parts();

        let Caller(extracted) = Caller::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, caller);
    }

    #[tokio::test]
    async fn missing_caller_is_401() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let rejection = Caller::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }
}
