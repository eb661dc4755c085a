//! # evalboard SDK
//!
//! Rust client for the evalboard evaluation service.
//!
//! The service scores system outputs against reference datasets. This SDK
//! lets you:
//!
//! - **Create systems**: upload a system output file for a dataset and task
//! - **Fetch systems**: look a system up by its identifier
//! - **Evaluate files**: create a system and read back its overall metrics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evalboard_sdk::{Client, SystemId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .credentials("me@example.com", "your-api-key")
//!         .build()?;
//!
//!     let system = client.systems().get(&SystemId::new("63f1c0")).await?;
//!     println!("{}", system.system_id());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The SDK can be configured through environment variables:
//!
//! - `EB_ENV`: deployment (`main`, `staging`, `local`)
//! - `EB_API_URL`: API endpoint URL
//! - `EB_USERNAME` / `EB_API_KEY`: credentials
//!
//! ## Error Handling
//!
//! All operations return `Result<T, SdkError>`:
//!
//! ```rust,no_run
//! use evalboard_sdk::{Client, SdkError, SystemId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_env()?;
//! match client.systems().get(&SystemId::new("missing")).await {
//!     Ok(system) => println!("Found: {}", system.system_id()),
//!     Err(SdkError::NotFound { .. }) => println!("System not found"),
//!     Err(SdkError::Unauthorized { .. }) => println!("Invalid API key"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

// Re-exports
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, Environment};
pub use error::{SdkError, SdkResult};
pub use models::*;
pub use services::{SystemService, SystemsApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::error::{SdkError, SdkResult};
    pub use crate::models::*;
    pub use crate::services::*;
}

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
