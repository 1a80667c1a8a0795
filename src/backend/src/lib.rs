//! CRUD service for `Person` records over HTTP, backed by SQLite.

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod person;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use server::{router, Server};
pub use store::{Store, StoreError};
