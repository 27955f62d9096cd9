pub mod api;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod api_client;
#[cfg(target_arch = "wasm32")]
pub mod geocoder;

pub use api::{AuthApi, GeocodeApi, TransitApi};
pub use error::{ActionError, ApiError, AuthError, StorageError};

#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
#[cfg(target_arch = "wasm32")]
pub use geocoder::GeocoderClient;
