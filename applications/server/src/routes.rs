/// HTTP router
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
pub fn create_router(app_state: AppState) -> Router {
    let require_auth = axum_middleware::from_fn_with_state(
        Arc::clone(&app_state.auth_service),
        middleware::auth_middleware,
    );

    // Public routes (no auth required); reading the catalogue is public,
    // adding to it is not
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/users", post(api::users::create_user))
        .route(
            "/authentications",
            post(api::auth::login).put(api::auth::refresh),
        )
        .route(
            "/songs",
            get(api::songs::list_songs)
                .merge(post(api::songs::create_song).route_layer(require_auth.clone())),
        )
        .route("/songs/:song_id", get(api::songs::get_song));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Playlists
        .route(
            "/playlists",
            post(api::playlists::create_playlist).get(api::playlists::list_playlists),
        )
        .route(
            "/playlists/:playlist_id",
            axum::routing::delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:playlist_id/songs",
            post(api::playlists::add_song_to_playlist)
                .get(api::playlists::list_playlist_songs)
                .delete(api::playlists::remove_song_from_playlist),
        )
        // Collaborations
        .route(
            "/collaborations",
            post(api::collaborations::add_collaboration)
                .delete(api::collaborations::delete_collaboration),
        )
        // Exports
        .route(
            "/export/playlists/:playlist_id",
            post(api::exports::export_playlist),
        )
        .route_layer(require_auth);

    public_routes
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
