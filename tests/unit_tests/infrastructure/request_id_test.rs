use std::time::Duration;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use uuid::Uuid;

use parlance::infrastructure::observability::{request_id_middleware, REQUEST_ID_HEADER};

async fn start_echo_server() -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // The handler yields mid-request so the middleware's span crosses an
    // await point under concurrent load.
    let app = Router::new()
        .route(
            "/ping",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                "pong"
            }),
        )
        .layer(middleware::from_fn(request_id_middleware));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), shutdown_tx)
}

#[tokio::test]
async fn given_incoming_request_id_header_when_handling_then_same_id_is_echoed() {
    let (base_url, shutdown_tx) = start_echo_server().await;

    let response = reqwest::Client::new()
        .get(format!("{}/ping", base_url))
        .header(REQUEST_ID_HEADER, "caller-supplied-id")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "caller-supplied-id"
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_request_id_header_when_handling_then_a_uuid_is_assigned() {
    let (base_url, shutdown_tx) = start_echo_server().await;

    let response = reqwest::Client::new()
        .get(format!("{}/ping", base_url))
        .send()
        .await
        .unwrap();

    let id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(Uuid::parse_str(&id).is_ok());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_concurrent_requests_when_handling_then_each_keeps_its_own_id() {
    let (base_url, shutdown_tx) = start_echo_server().await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        let url = format!("{}/ping", base_url);
        let id = format!("concurrent-{}", i);
        handles.push(tokio::spawn(async move {
            let response = client
                .get(&url)
                .header(REQUEST_ID_HEADER, &id)
                .send()
                .await
                .unwrap();
            (
                id,
                response
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_string(),
            )
        }));
    }

    for handle in handles {
        let (sent, echoed) = handle.await.unwrap();
        assert_eq!(sent, echoed);
    }
    shutdown_tx.send(()).ok();
}
