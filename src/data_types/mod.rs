pub mod color_domain;
pub mod config;
pub mod histogram;
pub mod snapshot;

// Re-export everything for convenience
pub use color_domain::*;
pub use config::*;
pub use histogram::*;
pub use snapshot::*;
