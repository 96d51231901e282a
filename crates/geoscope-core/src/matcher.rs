//! Region Matcher: scan article text for gazetteer names.

use std::collections::BTreeSet;

use crate::names::region_name_in_content;
use crate::region::{Gazetteer, RegionLevel};

/// Region names found in one article, keyed by level. Sets, so repeated
/// mentions collapse to a single entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegionMatches {
    pub provinces: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub districts: BTreeSet<String>,
}

/// Scan `content` against every gazetteer region.
///
/// A region matches on its full name, its suffix-trimmed form (3+
/// character names only), or the trimmed form with ethnic qualifiers
/// removed. Every matched city also contributes its parent province's
/// canonical name. Linear scan; the gazetteer is small and static.
pub fn match_regions(content: &str, gazetteer: &Gazetteer) -> RegionMatches {
    let mut matches = RegionMatches::default();

    for region in gazetteer.regions() {
        if !region_name_in_content(content, &region.name) {
            continue;
        }
        match region.level {
            RegionLevel::Province => {
                matches.provinces.insert(region.name.clone());
            }
            RegionLevel::City => {
                matches.cities.insert(region.name.clone());
                if let Some(province) = gazetteer.parent_of(region) {
                    matches.provinces.insert(province.name.clone());
                }
            }
            RegionLevel::District => {
                matches.districts.insert(region.name.clone());
            }
        }
    }

    matches
}
