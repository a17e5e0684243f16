// Library surface shared by the `sakhatype` binary and the integration tests.
pub mod app_dirs;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod preferences;
pub mod profile_cache;
pub mod session;
pub mod storage;
pub mod summary;

pub use config::ClientConfig;
pub use context::ClientContext;
pub use dispatcher::{Dispatcher, RequestBody, RequestOptions};
pub use error::{ApiError, ApiResult};
pub use profile_cache::ProfileCache;
pub use session::SessionStore;
