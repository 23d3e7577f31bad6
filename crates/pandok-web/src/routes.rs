//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 구성
///
/// `/api` 아래에 중첩되므로 실제 경로는 `/api/ocr`, `/api/health`가 된다.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ocr", post(handlers::ocr::extract_text))
        .route("/health", get(handlers::health::health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::stub_state;

    #[test]
    fn routes_compile() {
        let router: Router = api_routes().with_state(stub_state("stub"));
        let _ = router;
    }
}
