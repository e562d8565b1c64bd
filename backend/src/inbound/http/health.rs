//! Service banner and health probes.
//!
//! ```text
//! GET /              service name, version and endpoint map
//! GET /health        status with a timestamp
//! GET /health/ready  readiness probe
//! GET /health/live   liveness probe
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Readiness and liveness flags shared with the server bootstrap.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but live.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Top-level resource prefixes.
#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointMap {
    pub auth: String,
    pub courses: String,
    pub assessments: String,
    pub students: String,
    pub reports: String,
    pub outcomes: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub endpoints: EndpointMap,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service banner", body = BannerResponse))
)]
#[get("/")]
pub async fn banner() -> web::Json<BannerResponse> {
    web::Json(BannerResponse {
        status: "ok".to_owned(),
        message: "Student Learning Outcomes API Server".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        endpoints: EndpointMap {
            auth: "/api/auth".to_owned(),
            courses: "/api/courses".to_owned(),
            assessments: "/api/assessments".to_owned(),
            students: "/api/students".to_owned(),
            reports: "/api/reports".to_owned(),
            outcomes: "/api/outcomes".to_owned(),
        },
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthResponse> {
    web::Json(HealthResponse {
        status: "healthy".to_owned(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness probe: 200 once the server has bound its listener.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 503 once the process is draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
