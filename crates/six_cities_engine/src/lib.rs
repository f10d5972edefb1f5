//! Six Cities engine: HTTP client, REST calls, token storage and effect execution.
mod api;
mod client;
mod engine;
mod token;
mod types;

pub use api::Api;
pub use client::{ApiClient, ApiSettings, AUTH_HEADER, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use token::{
    ensure_data_dir, FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError,
    TOKEN_FILENAME,
};
pub use types::{ApiError, EngineEvent, FailureKind};
