//! Per-request breadcrumb context.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::components::BreadcrumbContext;

/// Give every request its own, initially empty, breadcrumb trail.
pub async fn provide_breadcrumbs(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(BreadcrumbContext::new());
    next.run(request).await
}

/// Extractor for the request's [`BreadcrumbContext`].
///
/// Falls back to a detached empty context when [`provide_breadcrumbs`] is not
/// installed, so pages still render without a trail.
pub struct Breadcrumbs(pub BreadcrumbContext);

impl<S> FromRequestParts<S> for Breadcrumbs
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<BreadcrumbContext>()
            .cloned()
            .unwrap_or_default();
        Ok(Self(context))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use menuboard_core::BreadcrumbItem;
    use tower::ServiceExt;

    use super::*;

    async fn page(Breadcrumbs(context): Breadcrumbs) -> String {
        let fresh = context.is_empty();
        context.update_breadcrumb(vec![BreadcrumbItem::new("Page")]);
        format!("{fresh}:{}", context.render().len())
    }

    #[tokio::test]
    async fn test_each_request_gets_a_fresh_trail() {
        let app = Router::new()
            .route("/", get(page))
            .layer(axum::middleware::from_fn(provide_breadcrumbs));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&body[..], b"true:1");
        }
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_empty() {
        let mut parts = Request::builder().body(()).unwrap().into_parts().0;
        let Breadcrumbs(context) = Breadcrumbs::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(context.is_empty());
    }
}
