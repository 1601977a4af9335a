//! # Backend API Client Module
//!
//! Everything between a facade and the network.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - RequestClient: credential attach, classification, demo escalation
//! ├── credentials.rs  - CredentialStore and persisted slot storage
//! ├── demo_mode.rs    - Session-wide demo mode flag
//! ├── endpoint.rs     - Endpoint, categories, payload shapes
//! └── transport.rs    - reqwest transport
//! ```

pub mod client;
pub mod credentials;
pub mod demo_mode;
pub mod endpoint;
pub mod transport;

pub use client::{Payload, PayloadSource, RequestClient, RequestOptions, RequestOutcome};
pub use credentials::{Credential, CredentialStore, FileSlotStorage, MemorySlotStorage, CREDENTIAL_SLOT};
pub use demo_mode::DemoModeState;
pub use endpoint::{Endpoint, EndpointCategory, Method, PayloadShape};
pub use transport::HttpTransport;
