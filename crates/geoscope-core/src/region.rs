//! Administrative region catalog (gazetteer).
//!
//! Loaded once at startup from bulk records and shared read-only for the
//! process lifetime. Construction validates the hierarchy: every city's
//! parent must resolve to exactly one province, every district's parent to
//! exactly one city. A violation is fatal at load time.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Administrative level of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    Province,
    City,
    District,
}

impl RegionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::City => "city",
            Self::District => "district",
        }
    }
}

impl fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One administrative region.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub level: RegionLevel,
    pub admin_code: String,
    /// Admin code of the parent region; `None` for provinces.
    pub parent_admin_code: Option<String>,
}

/// Bulk-load wire format: `{name, level, admin_code, parent: {admin_code}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub level: RegionLevel,
    pub admin_code: String,
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    pub admin_code: String,
}

impl From<RegionRecord> for Region {
    fn from(record: RegionRecord) -> Self {
        Region {
            name: record.name,
            level: record.level,
            admin_code: record.admin_code,
            parent_admin_code: record.parent.map(|p| p.admin_code),
        }
    }
}

/// An inconsistency in the loaded gazetteer. Always fatal: the catalog is
/// reference data and a broken hierarchy poisons every downstream stage.
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("gazetteer parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate admin code {admin_code}")]
    DuplicateAdminCode { admin_code: String },

    #[error("{level} '{name}' ({admin_code}) has no parent admin code")]
    MissingParent {
        level: RegionLevel,
        name: String,
        admin_code: String,
    },

    #[error("{level} '{name}' references unknown parent {parent}")]
    UnknownParent {
        level: RegionLevel,
        name: String,
        parent: String,
    },

    #[error("{level} '{name}' has parent '{parent}' at level {parent_level}, expected {expected}")]
    ParentLevelMismatch {
        level: RegionLevel,
        name: String,
        parent: String,
        parent_level: RegionLevel,
        expected: RegionLevel,
    },
}

/// Immutable catalog of regions with admin-code lookup.
///
/// Built once, then only queried; share it across article workers behind
/// an `Arc`.
#[derive(Debug)]
pub struct Gazetteer {
    regions: Vec<Region>,
    by_admin_code: HashMap<String, usize>,
}

impl Gazetteer {
    /// Build and validate a gazetteer from region records.
    pub fn from_records(records: impl IntoIterator<Item = Region>) -> Result<Self, GazetteerError> {
        let regions: Vec<Region> = records.into_iter().collect();

        let mut by_admin_code = HashMap::with_capacity(regions.len());
        for (idx, region) in regions.iter().enumerate() {
            if by_admin_code.insert(region.admin_code.clone(), idx).is_some() {
                return Err(GazetteerError::DuplicateAdminCode {
                    admin_code: region.admin_code.clone(),
                });
            }
        }

        let gazetteer = Self {
            regions,
            by_admin_code,
        };
        gazetteer.validate()?;

        info!(regions = gazetteer.regions.len(), "gazetteer loaded");
        Ok(gazetteer)
    }

    /// Parse a JSON array of bulk-load records and build a gazetteer.
    pub fn from_json(text: &str) -> Result<Self, GazetteerError> {
        let records: Vec<RegionRecord> = serde_json::from_str(text)?;
        Self::from_records(records.into_iter().map(Region::from))
    }

    fn validate(&self) -> Result<(), GazetteerError> {
        for region in &self.regions {
            let expected = match region.level {
                RegionLevel::Province => continue,
                RegionLevel::City => RegionLevel::Province,
                RegionLevel::District => RegionLevel::City,
            };

            let parent_code = region.parent_admin_code.as_deref().ok_or_else(|| {
                GazetteerError::MissingParent {
                    level: region.level,
                    name: region.name.clone(),
                    admin_code: region.admin_code.clone(),
                }
            })?;

            let parent =
                self.by_admin_code(parent_code)
                    .ok_or_else(|| GazetteerError::UnknownParent {
                        level: region.level,
                        name: region.name.clone(),
                        parent: parent_code.to_string(),
                    })?;

            if parent.level != expected {
                return Err(GazetteerError::ParentLevelMismatch {
                    level: region.level,
                    name: region.name.clone(),
                    parent: parent.name.clone(),
                    parent_level: parent.level,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// All regions, in load order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn by_admin_code(&self, admin_code: &str) -> Option<&Region> {
        self.by_admin_code
            .get(admin_code)
            .map(|&idx| &self.regions[idx])
    }

    /// The parent region, if any. Always present for validated cities and
    /// districts.
    pub fn parent_of(&self, region: &Region) -> Option<&Region> {
        region
            .parent_admin_code
            .as_deref()
            .and_then(|code| self.by_admin_code(code))
    }

    /// Every district carrying `name`. District names collide across
    /// provinces, so this is a candidate set, not a unique lookup.
    pub fn districts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Region> + 'a {
        self.regions
            .iter()
            .filter(move |r| r.level == RegionLevel::District && r.name == name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
