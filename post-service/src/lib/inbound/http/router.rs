use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::RequestAuthorizer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::current_account::current_account;
use super::handlers::delete_post::delete_post;
use super::handlers::get_post::get_post;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::root::root;
use super::handlers::signup::signup;
use super::handlers::update_post::update_post;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::ports::PostServicePort;

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub authorizer: Arc<RequestAuthorizer>,
}

pub fn create_router(
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
    authorizer: Arc<RequestAuthorizer>,
) -> Router {
    let state = AppState {
        post_service,
        authenticator,
        authorizer,
    };

    let require_auth = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/auth/signup", post(signup))
        .route("/token", post(login));

    // Reads stay public; writes on the same paths go through the authorizer.
    let post_routes = Router::new()
        .route(
            "/posts",
            get(list_posts).merge(post(create_post).route_layer(require_auth())),
        )
        .route(
            "/posts/:post_id",
            get(get_post).merge(
                put(update_post)
                    .delete(delete_post)
                    .route_layer(require_auth()),
            ),
        );

    let protected_routes = Router::new()
        .route("/users/me", get(current_account))
        .route_layer(require_auth());

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(post_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
