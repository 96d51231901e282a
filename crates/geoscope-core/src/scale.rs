//! Scale classification: categorical geographic breadth of an article.

use std::collections::BTreeSet;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geographic breadth, most-local to nationwide. Serialized as the bare
/// integer 0-4 so persisted records keep the original schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scale {
    /// No resolvable place.
    NoPlace,
    /// Exactly one district.
    SingleDistrict,
    /// Multiple districts, one city.
    CityWide,
    /// Multiple cities, one province.
    ProvinceWide,
    /// Multiple provinces.
    National,
}

impl Scale {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::NoPlace => 0,
            Self::SingleDistrict => 1,
            Self::CityWide => 2,
            Self::ProvinceWide => 3,
            Self::National => 4,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoPlace),
            1 => Some(Self::SingleDistrict),
            2 => Some(Self::CityWide),
            3 => Some(Self::ProvinceWide),
            4 => Some(Self::National),
            _ => None,
        }
    }
}

impl Serialize for Scale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Scale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Scale::from_u8(value).ok_or_else(|| de::Error::custom(format!("invalid scale {value}")))
    }
}

/// Strict priority ladder, most-aggregate check first: multiple provinces
/// beat multiple cities beat multiple districts beat a single district.
pub fn classify_scale(
    provinces: &BTreeSet<String>,
    cities: &BTreeSet<String>,
    districts: &BTreeSet<String>,
) -> Scale {
    if provinces.len() > 1 {
        Scale::National
    } else if cities.len() > 1 {
        Scale::ProvinceWide
    } else if districts.len() > 1 {
        Scale::CityWide
    } else if districts.len() == 1 {
        Scale::SingleDistrict
    } else {
        Scale::NoPlace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn multi_province_is_national() {
        assert_eq!(
            classify_scale(&set(&["湖北省", "河南省"]), &set(&[]), &set(&[])),
            Scale::National
        );
    }

    #[test]
    fn multi_city_is_province_wide() {
        assert_eq!(
            classify_scale(&set(&["湖北省"]), &set(&["武汉市", "宜昌市"]), &set(&[])),
            Scale::ProvinceWide
        );
    }

    #[test]
    fn multi_district_is_city_wide() {
        assert_eq!(
            classify_scale(&set(&[]), &set(&[]), &set(&["江岸区", "汉阳区"])),
            Scale::CityWide
        );
    }

    #[test]
    fn single_district() {
        assert_eq!(
            classify_scale(&set(&[]), &set(&[]), &set(&["江岸区"])),
            Scale::SingleDistrict
        );
    }

    #[test]
    fn nothing_resolved() {
        assert_eq!(classify_scale(&set(&[]), &set(&[]), &set(&[])), Scale::NoPlace);
    }

    #[test]
    fn province_count_trumps_lower_levels() {
        // Two provinces win even with many cities and districts.
        assert_eq!(
            classify_scale(
                &set(&["湖北省", "河南省"]),
                &set(&["武汉市", "宜昌市"]),
                &set(&["江岸区"])
            ),
            Scale::National
        );
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Scale::National).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Scale::NoPlace).unwrap(), "0");
    }

    #[test]
    fn deserializes_from_integer() {
        let scale: Scale = serde_json::from_str("2").unwrap();
        assert_eq!(scale, Scale::CityWide);
        assert!(serde_json::from_str::<Scale>("7").is_err());
    }
}
