//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and testability.
//!
//! - **[`error`]**: Failure classification and application errors (`FailureKind`,
//!   `RequestError`, `AppError`, `Result<T>`)
//! - **[`service`]**: I/O seams (`Transport`, `SlotStorage`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::core::service::{SlotStorage, Transport};
//! use dashboard::services::api::{HttpTransport, MemorySlotStorage};
//! use dashboard::config::ClientConfig;
//!
//! # fn main() -> dashboard::Result<()> {
//! let config = ClientConfig::new("http://127.0.0.1:3001");
//! let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);
//! let storage: Arc<dyn SlotStorage> = Arc::new(MemorySlotStorage::default());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, FailureKind, RequestError, Result};
pub use service::{ApiRequest, SlotStorage, Transport, TransportFault, TransportResponse};
