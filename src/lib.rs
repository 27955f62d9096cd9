// ============================================================================
// TRANSIT COMPANION - CLIENT CORE
// ============================================================================
// Session + data-synchronization core for the trip-planning client:
// - models: Shared structures with the backend (explicit schemas, defaulting)
// - services: HTTP communication only (backend API + third-party geocoder)
// - state: Observable stores the UI layer renders (no network I/O in views)
// - utils: storage backends, timers, task spawning
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod app;

pub use config::CONFIG;
