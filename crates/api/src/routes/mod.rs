//! Route tree assembly.

pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /faq                                     list published (public)
/// /faq/votes                               caller's votes across items (public)
/// /faq/{id}                                get published (public)
/// /faq/{id}/vote                           cast (POST), revoke (DELETE)
/// /faq/{id}/favorite                       toggle favorite (auth)
/// /faq/{id}/versions                       version history (premium/admin)
/// /faq/{id}/versions/{version}             one archived revision
///
/// /user/favorites                          caller's favorites (auth)
///
/// /admin/faq                               list all, submit (admin only)
/// /admin/faq/import                        start import (POST), list (GET)
/// /admin/faq/import/{import_id}            poll import status
/// /admin/faq/{id}                          get, manual edit (PATCH)
/// /admin/faq/{id}/actions                  publish / reject / unpublish / retry
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Public browse --
        .route("/faq", get(handlers::faq::list_published))
        .route("/faq/votes", get(handlers::votes::list_votes))
        .route("/faq/{id}", get(handlers::faq::get_published))
        // -- Votes --
        .route(
            "/faq/{id}/vote",
            post(handlers::votes::cast_vote).delete(handlers::votes::revoke_vote),
        )
        // -- Favorites --
        .route("/faq/{id}/favorite", post(handlers::favorites::toggle_favorite))
        .route("/user/favorites", get(handlers::favorites::list_favorites))
        // -- Version history --
        .route("/faq/{id}/versions", get(handlers::versions::list_versions))
        .route(
            "/faq/{id}/versions/{version}",
            get(handlers::versions::get_version),
        )
        // -- Admin --
        .route(
            "/admin/faq",
            get(handlers::admin::list_items).post(handlers::admin::submit_item),
        )
        .route(
            "/admin/faq/import",
            post(handlers::imports::create_import).get(handlers::imports::list_imports),
        )
        .route(
            "/admin/faq/import/{import_id}",
            get(handlers::imports::get_import),
        )
        .route(
            "/admin/faq/{id}",
            patch(handlers::admin::edit_item).get(handlers::admin::get_item),
        )
        .route(
            "/admin/faq/{id}/actions",
            post(handlers::admin::dispatch_action),
        )
}
