//! Checklist compliance scoring.
//!
//! Evaluates a [`Document`](crate::model::Document) against a compliance
//! [`Standard`] (NTIA minimum elements by default). Each criterion check
//! produces one [`Record`] per entity (the document, or one component);
//! records are collected in a [`RecordStore`] and rolled up into a
//! [`Score`] on demand.
//!
//! # Usage
//!
//! ```no_run
//! use sbom_compliance::compliance::{ComplianceEngine, Score};
//! use sbom_compliance::parsers::parse_sbom;
//! use std::path::Path;
//!
//! let document = parse_sbom(Path::new("sbom.spdx.json")).unwrap();
//! let engine = ComplianceEngine::ntia().unwrap();
//! let store = engine.evaluate(document.as_ref());
//!
//! let score = Score::for_document(&store, engine.standard());
//! println!("NTIA score: {:.1}/10", score.total);
//! ```

pub mod checks;
mod criteria;
mod engine;
#[cfg(test)]
pub(crate) mod fixtures;
mod record;
mod resolve;
mod score;
mod store;

pub use criteria::{compare_section_ids, Criterion, CriterionLevel, CriterionMeta, Standard};
pub use engine::ComplianceEngine;
pub use record::{Record, DOC_ENTITY_ID, MAX_SCORE};
pub use resolve::ResolutionContext;
pub use score::{Score, Summary};
pub use store::RecordStore;
