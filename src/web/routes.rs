use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tracing::{error, warn};

use super::pages;
use super::AppState;
use crate::db::{load_analytics, load_feed, load_settings, load_topics, Settings};
use crate::topic::Topic;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/topics", post(add_topic))
        .route("/topics/delete", post(delete_topic))
        .route("/settings", post(update_settings))
        .route("/generate", post(generate))
        .route("/stats", get(stats))
        .route("/api/feed", get(api_feed))
        .route("/healthz", get(health))
}

// ========== HTML Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    let pool = state.db.pool();

    let topics = match load_topics(pool).await {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load topics: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };
    let settings = match load_settings(pool).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };
    let videos = match load_feed(pool).await {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to load feed: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };
    let analytics = match load_analytics(pool).await {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to load analytics: {e:#}");
            None
        }
    };

    pages::render_home(&topics, settings, &videos, analytics.as_ref()).into_response()
}

async fn stats(State(state): State<AppState>) -> Response {
    let analytics = match load_analytics(state.db.pool()).await {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to load analytics: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    pages::render_stats(analytics.as_ref()).into_response()
}

// ========== Mutations ==========

#[derive(Debug, Deserialize)]
struct TopicForm {
    topic: String,
}

async fn add_topic(State(state): State<AppState>, Form(form): Form<TopicForm>) -> Response {
    let topic = match Topic::parse(&form.topic) {
        Ok(t) => t,
        Err(e) => {
            warn!(input = %form.topic, "Rejected topic: {e}");
            return Redirect::to("/").into_response();
        }
    };

    match crate::db::add_topic(state.db.pool(), &topic).await {
        Ok(true) => {
            state.feed.request_generation();
        }
        Ok(false) => {
            warn!(topic = %topic, "Topic already present");
        }
        Err(e) => {
            error!("Failed to add topic: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    Redirect::to("/").into_response()
}

async fn delete_topic(State(state): State<AppState>, Form(form): Form<TopicForm>) -> Response {
    let Ok(topic) = Topic::parse(&form.topic) else {
        return Redirect::to("/").into_response();
    };

    match crate::db::remove_topic(state.db.pool(), &topic).await {
        Ok(true) => {
            state.feed.request_generation();
        }
        Ok(false) => {}
        Err(e) => {
            error!("Failed to remove topic: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    Redirect::to("/").into_response()
}

#[derive(Debug, Deserialize)]
struct SettingsForm {
    results_per_topic: u32,
}

async fn update_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let settings = match Settings::new(form.results_per_topic) {
        Ok(s) => s,
        Err(e) => {
            warn!("Rejected settings: {e}");
            return Redirect::to("/").into_response();
        }
    };

    if let Err(e) = crate::db::save_settings(state.db.pool(), &settings).await {
        error!("Failed to save settings: {e:#}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
    }

    state.feed.request_generation();
    Redirect::to("/").into_response()
}

async fn generate(State(state): State<AppState>) -> Response {
    state.feed.request_generation();
    Redirect::to("/").into_response()
}

// ========== API Routes ==========

async fn api_feed(State(state): State<AppState>) -> Response {
    match load_feed(state.db.pool()).await {
        Ok(videos) => Json(videos).into_response(),
        Err(e) => {
            error!("Failed to load feed: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

async fn health() -> &'static str {
    "OK"
}
