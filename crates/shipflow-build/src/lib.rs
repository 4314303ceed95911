//! ShipFlow Docker Image Build functionality
//!
//! This crate provides Docker image build capabilities for ShipFlow,
//! including Dockerfile resolution, build context creation from staging
//! directories, content-hash tagged image building with `latest` aliasing,
//! and dangling image cleanup.

pub mod builder;
pub mod cleaner;
pub mod context;
pub mod error;
pub mod resolver;

pub use builder::{DEFAULT_BUILD_TIMEOUT_SECS, ImageBuilder, validate_tag};
pub use cleaner::{CleanupReport, ImageCleaner, select_dangling};
pub use context::{ContextBuilder, content_tag};
pub use error::{BuildError, BuildResult};
pub use resolver::BuildResolver;
