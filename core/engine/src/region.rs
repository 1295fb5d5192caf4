//! FILENAME: core/engine/src/region.rs
//! PURPOSE: Classifies geographic names and codes into macro-regions.
//! CONTEXT: Backed by a fixed table of nine regions, each with a curated list
//! of member countries (administrative name plus ISO 3166-1 alpha-3 code).
//!
//! Two entry points exist:
//! - `classify` resolves a single probe against the whole table.
//! - `resolve_feature` matches a map feature against the region keys that an
//!   aggregation produced from the data, returning the first key that fits.
//!   Key order is the aggregation's insertion order, so when two keys could
//!   both match one feature the winner depends on which appeared first in the
//!   data, not on geography.

use serde::{Deserialize, Serialize};

use crate::record::eq_ignore_case;

// ============================================================================
// REGION TABLE
// ============================================================================

/// A curated member of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionMember {
    /// Official administrative name, as used by map features.
    pub name: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub iso_a3: &'static str,
}

/// A macro-region with its curated member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDef {
    pub label: &'static str,
    pub members: &'static [RegionMember],
}

impl RegionDef {
    pub fn contains_name(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }
}

const fn member(name: &'static str, iso_a3: &'static str) -> RegionMember {
    RegionMember { name, iso_a3 }
}

pub static REGIONS: [RegionDef; 9] = [
    RegionDef {
        label: "Northern America",
        members: &[
            member("United States of America", "USA"),
            member("Canada", "CAN"),
            member("Mexico", "MEX"),
        ],
    },
    RegionDef {
        label: "Europe",
        members: &[
            member("Germany", "DEU"),
            member("United Kingdom", "GBR"),
            member("France", "FRA"),
            member("Italy", "ITA"),
            member("Spain", "ESP"),
            member("Russia", "RUS"),
            member("Ukraine", "UKR"),
            member("Poland", "POL"),
            member("Romania", "ROU"),
            member("Netherlands", "NLD"),
        ],
    },
    RegionDef {
        label: "Asia",
        members: &[
            member("China", "CHN"),
            member("India", "IND"),
            member("Japan", "JPN"),
            member("South Korea", "KOR"),
            member("Indonesia", "IDN"),
            member("Pakistan", "PAK"),
            member("Bangladesh", "BGD"),
            member("Vietnam", "VNM"),
            member("Thailand", "THA"),
            member("Malaysia", "MYS"),
        ],
    },
    RegionDef {
        label: "Africa",
        members: &[
            member("Nigeria", "NGA"),
            member("Ethiopia", "ETH"),
            member("Egypt", "EGY"),
            member("Democratic Republic of the Congo", "COD"),
            member("South Africa", "ZAF"),
            member("Kenya", "KEN"),
            member("Tanzania", "TZA"),
            member("Algeria", "DZA"),
            member("Sudan", "SDN"),
            member("Uganda", "UGA"),
        ],
    },
    RegionDef {
        label: "South America",
        members: &[
            member("Brazil", "BRA"),
            member("Colombia", "COL"),
            member("Argentina", "ARG"),
            member("Peru", "PER"),
            member("Venezuela", "VEN"),
            member("Chile", "CHL"),
            member("Ecuador", "ECU"),
            member("Bolivia", "BOL"),
            member("Paraguay", "PRY"),
            member("Uruguay", "URY"),
        ],
    },
    RegionDef {
        label: "Oceania",
        members: &[
            member("Australia", "AUS"),
            member("New Zealand", "NZL"),
            member("Papua New Guinea", "PNG"),
            member("Fiji", "FJI"),
            member("Solomon Islands", "SLB"),
            member("Vanuatu", "VUT"),
            member("New Caledonia", "NCL"),
            member("French Polynesia", "PYF"),
            member("Samoa", "WSM"),
            member("Tonga", "TON"),
        ],
    },
    RegionDef {
        label: "Central America",
        members: &[
            member("Guatemala", "GTM"),
            member("Honduras", "HND"),
            member("El Salvador", "SLV"),
            member("Nicaragua", "NIC"),
            member("Costa Rica", "CRI"),
            member("Panama", "PAN"),
            member("Belize", "BLZ"),
        ],
    },
    RegionDef {
        label: "Caribbean",
        members: &[
            member("Cuba", "CUB"),
            member("Haiti", "HTI"),
            member("Dominican Republic", "DOM"),
            member("Jamaica", "JAM"),
            member("Trinidad and Tobago", "TTO"),
            member("Bahamas", "BHS"),
            member("Barbados", "BRB"),
            member("Saint Lucia", "LCA"),
            member("Grenada", "GRD"),
            member("Antigua and Barbuda", "ATG"),
        ],
    },
    RegionDef {
        label: "Middle East",
        members: &[
            member("Saudi Arabia", "SAU"),
            member("Iran", "IRN"),
            member("Turkey", "TUR"),
            member("Iraq", "IRQ"),
            member("Israel", "ISR"),
            member("United Arab Emirates", "ARE"),
            member("Lebanon", "LBN"),
            member("Jordan", "JOR"),
            member("Kuwait", "KWT"),
            member("Oman", "OMN"),
        ],
    },
];

// ============================================================================
// RESOLUTION
// ============================================================================

/// Outcome of a classification. A miss is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "region", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(&'static str),
    Unresolved,
}

impl Resolution {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Resolution::Resolved(label) => Some(label),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// A map feature, identified the way world GeoJSON properties identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFeature {
    #[serde(rename = "ADMIN")]
    pub admin: String,
    #[serde(rename = "ISO_A3")]
    pub iso_a3: String,
}

impl MapFeature {
    pub fn new(admin: impl Into<String>, iso_a3: impl Into<String>) -> Self {
        MapFeature {
            admin: admin.into(),
            iso_a3: iso_a3.into(),
        }
    }
}

/// Resolves names and codes against the region table.
#[derive(Debug, Clone, Copy)]
pub struct RegionResolver {
    regions: &'static [RegionDef],
}

impl Default for RegionResolver {
    fn default() -> Self {
        RegionResolver { regions: &REGIONS }
    }
}

impl RegionResolver {
    pub fn new() -> Self {
        RegionResolver::default()
    }

    pub fn regions(&self) -> &'static [RegionDef] {
        self.regions
    }

    /// Exact (case-sensitive) lookup of a region by its label.
    pub fn region(&self, label: &str) -> Option<&'static RegionDef> {
        self.regions.iter().find(|r| r.label == label)
    }

    /// Classifies a country name, region label or 3-letter code.
    ///
    /// Rules are tried in order and the first hit wins:
    /// 1. exact membership of the probe in a curated member list
    /// 2. case-insensitive equality with a region label
    /// 3. case-insensitive equality with a member's 3-letter code
    pub fn classify(&self, probe: &str) -> Resolution {
        let by_member = self.regions.iter().find(|r| r.contains_name(probe));
        let by_label = || self.regions.iter().find(|r| eq_ignore_case(r.label, probe));
        let by_code = || {
            self.regions
                .iter()
                .find(|r| r.members.iter().any(|m| eq_ignore_case(m.iso_a3, probe)))
        };

        match by_member.or_else(by_label).or_else(by_code) {
            Some(region) => Resolution::Resolved(region.label),
            None => Resolution::Unresolved,
        }
    }

    /// True when a data-derived region key covers `feature`: the key names a
    /// curated region listing the feature, or equals its name or code.
    pub fn key_matches_feature(&self, key: &str, feature: &MapFeature) -> bool {
        if let Some(region) = self.region(key) {
            if region.contains_name(&feature.admin) {
                return true;
            }
        }
        eq_ignore_case(&feature.admin, key) || eq_ignore_case(&feature.iso_a3, key)
    }

    /// First key in iteration order that covers `feature`.
    pub fn resolve_feature<'k, I>(&self, feature: &MapFeature, keys: I) -> Option<&'k str>
    where
        I: IntoIterator<Item = &'k str>,
    {
        keys.into_iter().find(|key| self.key_matches_feature(key, feature))
    }
}
