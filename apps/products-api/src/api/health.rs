//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;

use crate::state::AppState;

/// 200 when MongoDB answers a ping, 503 otherwise.
async fn ready(State(state): State<AppState>) -> Response {
    let mongodb: HealthCheckFuture = Box::pin(async {
        let status = check_health(&state.db).await;
        if status.healthy {
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping ok");
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{body::Body, http::Request, http::StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::{Client, MongoConfig};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn unreachable_state() -> AppState {
        // Nothing listens on port 1; the short selection timeout keeps the ping quick
        let url = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";
        let mongo_client = Client::with_uri_str(url).await.unwrap();
        let db = mongo_client.database("catalog");

        AppState {
            config: Config {
                app: app_info!(),
                environment: Environment::Development,
                server: ServerConfig::default(),
                mongodb: MongoConfig::with_database(url, "catalog"),
                products_collection: "products".to_string(),
                cors_allowed_origin: None,
            },
            mongo_client,
            db,
        }
    }

    #[tokio::test]
    async fn test_ready_reports_unavailable_database() {
        let app = router(unreachable_state().await);

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
    }
}
