use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{merchants, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("http://localhost:3000"),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS, HEAD"),
    );
    headers.insert("access-control-allow-headers", HeaderValue::from_static("*"));
    headers.insert("access-control-expose-headers", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert("access-control-max-age", HeaderValue::from_static("3600"));
}

/// Serves the browser dashboard cross-origin: preflights are answered here,
/// every other response gets the CORS headers appended.
async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/v1/merchant-transaction/{merchant_id}/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/api/v1/merchants",
            get(merchants::list).post(merchants::create),
        )
        .route(
            "/api/v1/merchants/{id}",
            get(merchants::get_one)
                .put(merchants::update)
                .delete(merchants::deactivate),
        )
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8080").await {
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

    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, ActiveValue, Database};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
        std::fs::create_dir_all(&root).unwrap();
        let path = root.join(format!("server_{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}?mode=rwc", path.display());

        let db = Database::connect(&url).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        seed_transactions(&db).await;

        let engine = engine::Engine::builder()
            .database(db)
            .build()
            .await
            .unwrap();
        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    async fn seed_transactions(db: &sea_orm::DatabaseConnection) {
        for (amount_minor, status, day) in
            [(1000, "completed", 10), (500, "completed", 11), (200, "failed", 12)]
        {
            let created_at = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
            engine::transaction_masters::ActiveModel {
                txn_id: ActiveValue::NotSet,
                merchant_id: ActiveValue::Set("M1".to_string()),
                amount_minor: ActiveValue::Set(amount_minor),
                currency: ActiveValue::Set("USD".to_string()),
                status: ActiveValue::Set(status.to_string()),
                created_at: ActiveValue::Set(created_at),
                local_txn_date_time: ActiveValue::Set(created_at),
                txn_date: ActiveValue::Set(created_at.date_naive()),
                card_type: ActiveValue::Set(Some("VISA".to_string())),
                card_last4: ActiveValue::Set(Some("4242".to_string())),
                acquirer: ActiveValue::Set(None),
                issuer: ActiveValue::Set(None),
            }
            .insert(db)
            .await
            .unwrap();
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn listing_returns_envelope_with_summary_and_pagination() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(
                        "/api/v1/merchant-transaction/M1/transactions\
                         ?startDate=2024-01-01&endDate=2024-01-31",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["code"], "200");
        let data = &json["data"];
        assert_eq!(data["merchantId"], "M1");
        assert_eq!(data["summary"]["totalTransactions"], 3);
        assert_eq!(data["summary"]["totalAmountMinor"], 1700);
        assert_eq!(data["summary"]["byStatus"]["completed"], 2);
        assert_eq!(data["summary"]["byStatus"]["failed"], 1);
        assert_eq!(data["pagination"]["totalPages"], 1);
        assert_eq!(data["pagination"]["totalElements"], 3);
        assert_eq!(data["transactions"].as_array().unwrap().len(), 3);
        // Newest first.
        assert_eq!(data["transactions"][0]["status"], "failed");
    }

    #[tokio::test]
    async fn invalid_date_is_rejected_with_the_error_envelope() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/merchant-transaction/M1/transactions?startDate=not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "422");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn oversized_page_is_rejected() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/merchant-transaction/M1/transactions?size=101")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_returns_the_assigned_identifier() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/merchant-transaction/M9/transactions")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"txnId": 999, "amountMinor": 1250, "currency": "USD"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["merchantId"], "M9");
        // The caller-supplied id is discarded; the store assigned its own.
        assert_ne!(json["data"]["transactionId"], 999);
    }

    #[tokio::test]
    async fn missing_body_is_a_validation_error() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/merchant-transaction/M1/transactions")
                    .header("content-type", "application/json")
                    .body(Body::from("null"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn preflight_gets_cors_headers() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/v1/merchants")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn unknown_merchant_is_404() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/merchants/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "404");
    }
}
