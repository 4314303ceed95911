//! ShipFlow staging pipeline
//!
//! This crate assembles Docker build contexts from the build output tree:
//! artifact collection, web asset mirroring, assembly version correction,
//! and package cache staging.

pub mod artifacts;
pub mod error;
pub mod packages;
pub mod pipeline;
pub mod versions;
pub mod webassets;

pub use artifacts::{ARTIFACT_SUFFIXES, ArtifactCollector};
pub use error::{CopyFailure, MissingReason, StageError, StageResult};
pub use packages::{PACKAGE_SUFFIX, PackageStager, available_packages};
pub use pipeline::{StagePipeline, StagingSummary};
pub use versions::VersionCorrector;
pub use webassets::{WEB_ASSET_EXTENSIONS, WebAssetCollector};
