//! Portal router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! JSON routes are nested under `/api/`; the landing and role pages sit at
//! the root.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::pages;
use crate::api::types::ApiContext;
use crate::portal::Portal;

/// Build the portal router.
pub fn portal_router(portal: Arc<Portal>) -> Router {
    build_router(ApiContext::new(portal))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/options", get(endpoints::options::list))
        .route("/workers", post(endpoints::workers::register))
        .route("/workers/:id", get(endpoints::workers::detail))
        .route("/workers/:id/card", get(endpoints::workers::card))
        .route("/workers/:id/qr.png", get(endpoints::workers::qr_png))
        .route("/workers/:id/records", get(endpoints::workers::records))
        .route("/doctors", post(endpoints::doctors::register))
        .route("/doctors/:id", get(endpoints::doctors::status))
        .route("/doctors/:id/scan", post(endpoints::doctors::scan))
        .route(
            "/doctors/:id/patients/:patient_id",
            get(endpoints::doctors::lookup),
        )
        .route(
            "/doctors/:id/patients/:patient_id/records",
            post(endpoints::doctors::add_record),
        )
        // Health data must never sit in a shared cache.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(pages::landing))
        .route("/:role", get(pages::role_page))
        .nest("/api", api)
        .with_state(ctx)
}
