//! Hierarchy Disambiguator: drop district matches whose parent city was
//! not itself matched.
//!
//! District names collide across provinces, so a bare substring match is
//! not proof of relevance. A district name survives if at least one
//! same-named district's parent city appears in the matched city set.

use std::collections::BTreeSet;

use crate::region::Gazetteer;

/// Outcome of district filtering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DistrictFilter {
    /// District names with at least one accepted candidate.
    pub districts: BTreeSet<String>,
    /// Parent-city names of the candidates behind each dropped district.
    /// A diagnostic trail, not an error.
    pub debug: Vec<String>,
}

/// Keep each district name for which some same-named candidate's parent
/// city is in `cities`; drop the rest, recording their candidates' parent
/// cities. The test is existential, so evaluation order never changes the
/// surviving set.
pub fn filter_districts(
    districts: &BTreeSet<String>,
    cities: &BTreeSet<String>,
    gazetteer: &Gazetteer,
) -> DistrictFilter {
    let mut out = DistrictFilter::default();

    for name in districts {
        let mut accepted = false;
        let mut rejected_parents = Vec::new();

        for candidate in gazetteer.districts_named(name) {
            let Some(city) = gazetteer.parent_of(candidate) else {
                continue;
            };
            if cities.contains(&city.name) {
                accepted = true;
                break;
            }
            rejected_parents.push(city.name.clone());
        }

        if accepted {
            out.districts.insert(name.clone());
        } else {
            out.debug.extend(rejected_parents);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Region, RegionLevel};

    fn region(
        name: &str,
        level: RegionLevel,
        admin_code: &str,
        parent_admin_code: Option<&str>,
    ) -> Region {
        Region {
            name: name.into(),
            level,
            admin_code: admin_code.into(),
            parent_admin_code: parent_admin_code.map(Into::into),
        }
    }

    // 西陵区 exists under both 宜昌市 and (here, artificially) 武汉市 to
    // exercise the collision path.
    fn gazetteer() -> Gazetteer {
        Gazetteer::from_records(vec![
            region("湖北省", RegionLevel::Province, "420000", None),
            region("武汉市", RegionLevel::City, "420100", Some("420000")),
            region("宜昌市", RegionLevel::City, "420500", Some("420000")),
            region("黄石市", RegionLevel::City, "420200", Some("420000")),
            region("西陵区", RegionLevel::District, "420502", Some("420500")),
            region("西陵区", RegionLevel::District, "420198", Some("420100")),
            region("铁山区", RegionLevel::District, "420205", Some("420200")),
        ])
        .unwrap()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn district_with_matched_parent_survives() {
        let out = filter_districts(&set(&["西陵区"]), &set(&["宜昌市"]), &gazetteer());
        assert!(out.districts.contains("西陵区"));
    }

    #[test]
    fn any_candidate_suffices() {
        // Either parent city accepts the shared district name.
        let out = filter_districts(&set(&["西陵区"]), &set(&["武汉市"]), &gazetteer());
        assert!(out.districts.contains("西陵区"));
    }

    #[test]
    fn district_without_matched_parent_dropped() {
        let out = filter_districts(&set(&["铁山区"]), &set(&["宜昌市"]), &gazetteer());
        assert!(out.districts.is_empty());
        assert_eq!(out.debug, vec!["黄石市".to_string()]);
    }

    #[test]
    fn dropped_collision_records_every_parent() {
        let out = filter_districts(&set(&["西陵区"]), &set(&["黄石市"]), &gazetteer());
        assert!(out.districts.is_empty());
        assert_eq!(out.debug.len(), 2);
        assert!(out.debug.contains(&"宜昌市".to_string()));
        assert!(out.debug.contains(&"武汉市".to_string()));
    }

    #[test]
    fn empty_city_list_drops_everything() {
        let out = filter_districts(
            &set(&["西陵区", "铁山区"]),
            &BTreeSet::new(),
            &gazetteer(),
        );
        assert!(out.districts.is_empty());
        assert_eq!(out.debug.len(), 3);
    }
}
