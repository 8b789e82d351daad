use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::api::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

/// An empty catalog is reported as degraded but still answers 200: quotes
/// keep working, they just list every item as missing.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let products = state.resolver.catalog().len();
    let catalog = if products > 0 {
        HealthCheck { status: "ready", detail: format!("{products} products loaded") }
    } else {
        HealthCheck {
            status: "degraded",
            detail: "catalog is empty; every requested item will be reported missing".to_string(),
        }
    };

    let payload = HealthResponse {
        status: catalog.status,
        service: HealthCheck {
            status: "ready",
            detail: "cotiza-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use cotiza_core::{Catalog, QuoteResolver};

    use crate::api::AppState;
    use crate::health::health;

    fn state(catalog: Catalog) -> State<AppState> {
        State(AppState { resolver: Arc::new(QuoteResolver::new(Arc::new(catalog))) })
    }

    #[tokio::test]
    async fn health_returns_ready_when_catalog_has_products() {
        let catalog =
            Catalog::load_json(r#"[{"name": "Cement", "price": 10}]"#).expect("catalog loads");

        let (status, Json(payload)) = health(state(catalog)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert_eq!(payload.catalog.detail, "1 products loaded");
    }

    #[tokio::test]
    async fn health_reports_degraded_catalog_when_empty() {
        let (status, Json(payload)) = health(state(Catalog::empty())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.catalog.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
