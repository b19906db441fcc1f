//! Persistence core of the DiaDrop chart tool: projects of labeled values, the `.dia`
//! text format, and encrypted project files on disk.

pub mod autosave;
pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod fsutil;
pub mod import;
pub mod logger;
pub mod palette;
pub mod project;
pub mod store;

pub use codec::{deserialize, serialize};
pub use crypto::DiaCipher;
pub use errors::{DecryptFailure, DiaError};
pub use project::{ChartType, DataPoint, Project};
pub use store::{ProjectStore, StoreOptions};

/// Initializes logging from `DIADROP_LOG_*` environment variables.
///
/// Call once at startup; later calls leave the first configuration in place.
pub fn init() -> Result<(), DiaError> {
    logger::configure_from_env()
}
