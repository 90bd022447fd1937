//! Criterion identities and the static metadata tables that describe them.

use crate::error::{ComplianceError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Whether a criterion is evaluated once per document or once per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionLevel {
    Document,
    Component,
}

/// One compliance check identity.
///
/// The discriminant is the stable integer key used in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    SbomMachineFormat = 1,
    SbomCreator = 2,
    SbomTimestamp = 3,
    SbomDependency = 4,
    SbomComponents = 5,
    CompName = 6,
    CompDependencies = 7,
    CompSupplier = 8,
    CompVersion = 9,
    CompOtherUniqIds = 10,
}

impl Criterion {
    /// Every criterion, in key order.
    pub const ALL: [Self; 10] = [
        Self::SbomMachineFormat,
        Self::SbomCreator,
        Self::SbomTimestamp,
        Self::SbomDependency,
        Self::SbomComponents,
        Self::CompName,
        Self::CompDependencies,
        Self::CompSupplier,
        Self::CompVersion,
        Self::CompOtherUniqIds,
    ];

    #[must_use]
    pub const fn key(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_key(key: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    #[must_use]
    pub const fn level(self) -> CriterionLevel {
        match self {
            Self::SbomMachineFormat
            | Self::SbomCreator
            | Self::SbomTimestamp
            | Self::SbomDependency
            | Self::SbomComponents => CriterionLevel::Document,
            Self::CompName
            | Self::CompDependencies
            | Self::CompSupplier
            | Self::CompVersion
            | Self::CompOtherUniqIds => CriterionLevel::Component,
        }
    }

    /// Criteria evaluated at the given level, in key order.
    pub fn at_level(level: CriterionLevel) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |c| c.level() == level)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SbomMachineFormat => "sbom_machine_format",
            Self::SbomCreator => "sbom_creator",
            Self::SbomTimestamp => "sbom_timestamp",
            Self::SbomDependency => "sbom_dependency",
            Self::SbomComponents => "sbom_components",
            Self::CompName => "comp_name",
            Self::CompDependencies => "comp_dependencies",
            Self::CompSupplier => "comp_supplier",
            Self::CompVersion => "comp_version",
            Self::CompOtherUniqIds => "comp_other_uniq_ids",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-facing description of one criterion under a standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CriterionMeta {
    pub title: String,
    /// Section number in the standard, e.g. `2.4`
    pub section_id: String,
    /// Name of the data field being checked, e.g. `Package Supplier`
    pub data_field: String,
    pub required: bool,
}

impl CriterionMeta {
    pub fn new(
        title: impl Into<String>,
        section_id: impl Into<String>,
        data_field: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            title: title.into(),
            section_id: section_id.into(),
            data_field: data_field.into(),
            required,
        }
    }
}

/// A compliance standard: report labels plus the criterion table.
///
/// The table is immutable once built. [`Standard::validate`] checks that
/// every [`Criterion`] has an entry.
#[derive(Debug, Clone)]
pub struct Standard {
    name: String,
    report_name: String,
    subtitle: String,
    criteria: IndexMap<Criterion, CriterionMeta>,
}

impl Standard {
    pub fn new(
        name: impl Into<String>,
        report_name: impl Into<String>,
        subtitle: impl Into<String>,
        criteria: impl IntoIterator<Item = (Criterion, CriterionMeta)>,
    ) -> Self {
        Self {
            name: name.into(),
            report_name: report_name.into(),
            subtitle: subtitle.into(),
            criteria: criteria.into_iter().collect(),
        }
    }

    /// NTIA minimum elements (July 2021), loaded once per process.
    pub fn ntia() -> &'static Self {
        static NTIA: OnceLock<Standard> = OnceLock::new();
        NTIA.get_or_init(|| {
            let row = |title: &str, section: &str, field: &str| {
                CriterionMeta::new(title, section, field, true)
            };
            Self::new(
                "NTIA",
                "NTIA-minimum elements Compliance Report",
                "Part 2: Software Bill of Materials (SBOM)",
                [
                    (
                        Criterion::SbomMachineFormat,
                        row("Automation Support", "1.1", "Machine-Readable Formats"),
                    ),
                    (
                        Criterion::SbomCreator,
                        row("Required fields sboms", "2.1", "Author"),
                    ),
                    (
                        Criterion::SbomTimestamp,
                        row("Required fields sboms", "2.2", "Timestamp"),
                    ),
                    (
                        Criterion::SbomDependency,
                        row("Required fields sboms", "2.5", "Dependencies"),
                    ),
                    (
                        Criterion::SbomComponents,
                        row("Required sbom component", "2.3", "Packages"),
                    ),
                    (
                        Criterion::CompName,
                        row("Required fields components", "2.4", "Package Name"),
                    ),
                    (
                        Criterion::CompDependencies,
                        row(
                            "Required fields components",
                            "2.5",
                            "Dependencies on other components",
                        ),
                    ),
                    (
                        Criterion::CompSupplier,
                        row("Required fields component", "2.6", "Package Supplier"),
                    ),
                    (
                        Criterion::CompVersion,
                        row("Required fields components", "2.7", "Package Version"),
                    ),
                    (
                        Criterion::CompOtherUniqIds,
                        row("Required fields component", "2.8", "Other Uniq IDs"),
                    ),
                ],
            )
        })
    }

    /// Look up a standard by its config/CLI name.
    pub fn by_name(name: &str) -> Option<&'static Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ntia" => Some(Self::ntia()),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn meta(&self, criterion: Criterion) -> Option<&CriterionMeta> {
        self.criteria.get(&criterion)
    }

    /// Metadata for `criterion`, or a validation error naming it.
    pub fn require_meta(&self, criterion: Criterion) -> Result<&CriterionMeta> {
        self.meta(criterion).ok_or_else(|| {
            ComplianceError::validation(format!(
                "standard {} has no metadata for criterion {} (key {})",
                self.name,
                criterion,
                criterion.key()
            ))
        })
    }

    /// Unknown criteria count as optional.
    #[must_use]
    pub fn is_required(&self, criterion: Criterion) -> bool {
        self.meta(criterion).is_some_and(|m| m.required)
    }

    pub fn criteria(&self) -> impl Iterator<Item = (Criterion, &CriterionMeta)> {
        self.criteria.iter().map(|(c, m)| (*c, m))
    }

    /// Check that every criterion has metadata.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = Criterion::ALL
            .iter()
            .filter(|c| !self.criteria.contains_key(*c))
            .map(|c| format!("{} (key {})", c, c.key()))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ComplianceError::validation(format!(
                "standard {} is missing metadata for: {}",
                self.name,
                missing.join(", ")
            )))
        }
    }
}

/// Order section ids numerically per dotted segment, so `2.10` sorts after `2.9`.
#[must_use]
pub fn compare_section_ids(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u32>(), r.parse::<u32>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
