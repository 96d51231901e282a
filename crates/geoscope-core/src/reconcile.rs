//! NER Reconciler: drop entities already resolved as regions.
//!
//! A place the Region Matcher resolved authoritatively must not be
//! geocoded again, so any entity equal to a resolved region name (or to
//! its suffix-trimmed form) leaves the candidate set.

use std::collections::BTreeSet;

use crate::article::EntitySet;
use crate::names::entity_matches_region;

/// Build the geocode candidate set: location and institute entities,
/// minus anything that duplicates a resolved region name. Removal is by
/// value; an entity already gone is a no-op, which keeps overlapping
/// region matches harmless.
pub fn geocode_candidates<'a>(
    entities: &EntitySet,
    regions: impl IntoIterator<Item = &'a String>,
) -> BTreeSet<String> {
    let mut candidates: BTreeSet<String> = entities
        .locations
        .union(&entities.institutes)
        .cloned()
        .collect();

    for region in regions {
        candidates.retain(|entity| !entity_matches_region(entity, region));
    }

    candidates
}
