//! API constants
//!
//! Routes are versioned under `API_PREFIX`; handler path annotations use the same literals.

/// Versioned prefix all video routes are nested under
pub const API_PREFIX: &str = "/api/v1";

/// Path the OpenAPI document is served at
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
