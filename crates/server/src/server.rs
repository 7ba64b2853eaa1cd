use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{daily, payments, people, reports};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/people", post(people::person_new).get(people::people_list))
        .route(
            "/people/{id}",
            get(people::person_get).put(people::person_rename),
        )
        .route("/daily-entries", post(daily::daily_entry_new))
        .route("/daily-entries/undo", post(daily::daily_entry_undo))
        .route("/payments", post(payments::payment_new))
        .route("/reports/daily-history", get(reports::daily_history))
        .route("/reports/people/{id}/history", get(reports::person_history))
        .route("/reports/dues", get(reports::dues))
        .route("/reports/total-balance", get(reports::total_balance))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        let engine = Engine::builder()
            .database(db)
            .build()
            .await
            .expect("build engine");
        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("parse json body")
    }

    #[tokio::test]
    async fn register_person_returns_created() {
        let app = test_router().await;

        let response = app
            .oneshot(post_json("/people", json!({ "name": "Alice" })))
            .await
            .expect("send request");

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["total_eggs"], 0);
        assert_eq!(body["balance_minor"], 0);
    }

    #[tokio::test]
    async fn duplicate_person_returns_unprocessable() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(post_json("/people", json!({ "name": "Alice" })))
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(post_json("/people", json!({ "name": "  alice " })))
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn daily_entry_charges_people() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(post_json("/people", json!({ "name": "Alice" })))
            .await
            .expect("send request");
        let alice = json_body(response).await;
        let alice_id = alice["id"].as_str().expect("person id").to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/daily-entries",
                json!({
                    "date": "2026-08-01",
                    "egg_price_minor": 600,
                    "allocations": { alice_id.clone(): 2 }
                }),
            ))
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["entry"]["total_eggs"], 2);
        assert_eq!(body["entry"]["total_cost_minor"], 1200);
        assert_eq!(body["people"][0]["balance_minor"], -1200);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/people/{alice_id}"))
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_eggs"], 2);
        assert_eq!(body["balance_minor"], -1200);
    }

    #[tokio::test]
    async fn undo_without_entries_returns_not_found() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/daily-entries/undo")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn payment_for_unknown_person_returns_not_found() {
        let app = test_router().await;

        let response = app
            .oneshot(post_json(
                "/payments",
                json!({
                    "person_id": "00000000-0000-0000-0000-000000000000",
                    "amount_minor": 500
                }),
            ))
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dues_lists_debtors_in_registration_order() {
        let app = test_router().await;

        let mut ids = Vec::new();
        for name in ["Alice", "Bob"] {
            let response = app
                .clone()
                .oneshot(post_json("/people", json!({ "name": name })))
                .await
                .expect("send request");
            let body = json_body(response).await;
            ids.push(body["id"].as_str().expect("person id").to_string());
        }

        let response = app
            .clone()
            .oneshot(post_json(
                "/daily-entries",
                json!({
                    "date": "2026-08-01",
                    "egg_price_minor": 600,
                    "allocations": { ids[0].clone(): 2, ids[1].clone(): 1 }
                }),
            ))
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/reports/dues")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["dues"][0]["name"], "Alice");
        assert_eq!(body["dues"][0]["amount_minor"], 1200);
        assert_eq!(body["dues"][1]["name"], "Bob");
        assert_eq!(body["dues"][1]["amount_minor"], 600);
    }
}
