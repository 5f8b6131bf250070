//! HTTP surface: one handler per endpoint, plus the JSON extractor that
//! keeps rejection bodies in the uniform error envelope.

use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::application::services::kundali_service::KundaliService;
use crate::domain::entities::birth_record::BirthRecord;
use crate::domain::errors::KundaliError;

/// `Json<T>` wrapper whose rejection carries the deserializer diagnostic
/// inside the standard error envelope instead of axum's plain-text body.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = KundaliError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| KundaliError::InvalidInput(rejection.body_text()))?;
        Ok(ValidatedJson(value))
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Vedic Kundali API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/kundali",
            "/api/planets",
            "/api/ashtakavarga",
            "/api/shadbala",
            "/api/dasha",
            "/api/complete",
        ],
    }))
}

async fn kundali(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.kundali(&birth).await.map(Json)
}

async fn planets(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.planets(&birth).await.map(Json)
}

async fn ashtakavarga(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.ashtakavarga(&birth).await.map(Json)
}

async fn shadbala(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.shadbala(&birth).await.map(Json)
}

async fn dasha(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.dasha(&birth).await.map(Json)
}

async fn complete(
    State(service): State<Arc<KundaliService>>,
    ValidatedJson(birth): ValidatedJson<BirthRecord>,
) -> Result<Json<Value>, KundaliError> {
    service.complete(&birth).await.map(Json)
}

/// Build the API router around a shared service.
pub fn router(service: Arc<KundaliService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/kundali", post(kundali))
        .route("/api/planets", post(planets))
        .route("/api/ashtakavarga", post(ashtakavarga))
        .route("/api/shadbala", post(shadbala))
        .route("/api/dasha", post(dasha))
        .route("/api/complete", post(complete))
        .with_state(service)
}
