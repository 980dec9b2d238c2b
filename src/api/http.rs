use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast::Receiver as BroadcastReceiver;
use tracing::{debug, info};

use crate::dashboard::{self, DashboardFeed};
use crate::error::{ApiError, Result};
use crate::seed;
use crate::validation::{
    self, check_date, check_zipcode, parse_reading, validate_date, validate_zipcode,
    ErrorResponse, WeatherReading, ZIPCODE,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub zipcode: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub zipcode: Option<String>,
    pub today: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub zipcode: String,
    pub count: usize,
    pub readings: Vec<WeatherReading>,
}

pub fn router(state: Arc<crate::AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/weather",
            post(write_handler).get(read_handler).delete(clear_handler),
        )
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/admin/seed", post(seed_handler))
        .layer(Extension(state))
}

pub async fn run(
    state: Arc<crate::AppState>,
    addr: String,
    mut shutdown: BroadcastReceiver<()>,
) -> anyhow::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;
    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// POST /api/weather: validate, then upsert. The body is read as JSON
/// whatever its Content-Type.
async fn write_handler(
    Extension(state): Extension<Arc<crate::AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<WeatherReading>)> {
    let body: Value = serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?;
    let reading = parse_reading(&body)?;

    {
        let mut store = state.store.lock().await;
        store.put(&reading.zipcode, &reading.date, reading.temperature);
    }
    info!(
        zipcode = %reading.zipcode,
        date = %reading.date,
        temperature = reading.temperature,
        "stored reading"
    );

    Ok((StatusCode::CREATED, Json(reading)))
}

/// GET /api/weather: one temperature when `date` is given, otherwise every
/// date recorded for the zipcode. Unknown keys answer 200 with null.
async fn read_handler(
    Extension(state): Extension<Arc<crate::AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let zipcode = require_zipcode(query.zipcode)?;

    let date = query.date.filter(|d| !d.is_empty());
    if let Some(date) = &date {
        check_date(date)?;
    }

    let store = state.store.lock().await;
    match date {
        Some(date) => {
            let temperature = store.get(&zipcode, &date);
            debug!(%zipcode, %date, found = temperature.is_some(), "point lookup");
            Ok(Json(json!({ "temperature": temperature })))
        }
        None => {
            let data: Option<BTreeMap<String, f64>> = store.get_all(&zipcode);
            debug!(%zipcode, dates = data.as_ref().map_or(0, BTreeMap::len), "range lookup");
            Ok(Json(json!({ "data": data })))
        }
    }
}

/// Zipcode query parameter: absent or `?zipcode=` is missing, then the
/// five-digit format check.
fn require_zipcode(zipcode: Option<String>) -> Result<String> {
    let zipcode = zipcode
        .filter(|z| !z.is_empty())
        .ok_or_else(|| ErrorResponse::single(ZIPCODE, "Zipcode is required"))?;
    check_zipcode(&zipcode)?;
    Ok(zipcode)
}

/// DELETE /api/weather
async fn clear_handler(Extension(state): Extension<Arc<crate::AppState>>) -> Json<Value> {
    let removed = {
        let mut store = state.store.lock().await;
        let n = store.len();
        store.clear();
        n
    };
    info!(removed, "cleared all weather data");
    Json(json!({ "message": "All weather data cleared" }))
}

/// GET /api/dashboard
async fn dashboard_handler(
    Extension(state): Extension<Arc<crate::AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardFeed>> {
    let zipcode = require_zipcode(query.zipcode)?;
    let today = resolve_today(query.today.as_deref())?;

    let store = state.store.lock().await;
    let feed = dashboard::build_feed(&store, &zipcode, today, state.config.dashboard.window_days);
    debug!(%zipcode, today = %feed.today, "dashboard feed");
    Ok(Json(feed))
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today.filter(|t| !t.is_empty()) {
        Some(t) => Ok(check_date(t)?),
        None => Ok(Local::now().date_naive()),
    }
}

/// POST /api/admin/seed: body is optional; `{"zipcode": "..", "today": ".."}`.
async fn seed_handler(
    Extension(state): Extension<Arc<crate::AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SeedResponse>)> {
    let body: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?
    };

    let mut errors = ErrorResponse::default();
    let zipcode = match body.get(ZIPCODE) {
        None | Some(Value::Null) => Value::String(state.config.seed.zipcode.clone()),
        Some(z) => z.clone(),
    };
    if let Err(e) = validate_zipcode(&zipcode) {
        errors.push(e);
    }
    let today = body.get("today").filter(|t| !t.is_null());
    if let Some(Err(e)) = today.map(validate_date) {
        errors.push(validation::ValidationError { field: "today".into(), ..e });
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let zipcode = zipcode.as_str().unwrap_or_default().to_string();
    let today = resolve_today(today.and_then(Value::as_str))?;
    let readings = seed::generate(&zipcode, today, &mut rand::thread_rng())?;

    {
        let mut store = state.store.lock().await;
        seed::apply(&mut store, &readings);
    }
    info!(%zipcode, count = readings.len(), "seeded sample data");

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            zipcode,
            count: readings.len(),
            readings,
        }),
    ))
}
