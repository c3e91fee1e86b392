mod common;

use axum::{body::to_bytes, http::Method};
use common::{send, test_app};
use std::time::Duration;

#[tokio::test]
async fn healthz_works() {
    let app = test_app(Duration::from_secs(60));

    for path in ["/api/healthz", "/api/readyz"] {
        let response = send(&app.router, Method::GET, path).await;
        assert_eq!(response.status(), 200);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, "ok".as_bytes());
    }
    assert_eq!(app.provider.calls(), 0);
}
