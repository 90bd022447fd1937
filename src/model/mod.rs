//! Format-independent view of SBOM documents.
//!
//! The compliance engine reads SBOMs exclusively through the [`Document`]
//! and [`Component`] traits. Each supported format provides a concrete
//! variant:
//!
//! - [`SpdxSbom`] / [`SpdxComponent`] for SPDX 2.x (JSON, YAML, tag-value)
//! - [`CycloneDxSbom`] / [`CycloneDxComponent`] for CycloneDX 1.x (JSON, XML)
//!
//! Other representations (test doubles, in-house formats) only need to
//! implement the two traits.

mod cyclonedx;
mod document;
mod spdx;

pub use cyclonedx::{CycloneDxComponent, CycloneDxSbom};
pub use document::{normalize_reference_kind, Component, Document, ExternalReference, Identity};
pub use spdx::{SpdxComponent, SpdxRelationship, SpdxSbom};
