//! # Split Dedup
//!
//! Splits a folder of wide images into left and right halves, then marks
//! near-duplicate frames in each half by structural similarity.
//!
//! ## Core Philosophy
//! - **Never lose a source** - originals are only deleted after both halves
//!   are written and verified
//! - **Never overwrite** - existing outputs are conflicts, duplicate names
//!   get a numeric disambiguator
//! - **One bad file never stops the batch**
//!
//! ## Architecture
//! - `core` - The splitter, the duplicate detector and the workflow that chains them
//! - `events` - Event-driven progress reporting
//! - `error` - Error taxonomy

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SplitDedupError};

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise skipped files are shown at `warn`,
/// and every comparison at `debug` when `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
