//! Schengen Area membership classification.
//!
//! Membership is an explicit value rather than a process-wide table, so callers
//! (and tests) can model accessions or withdrawals by building their own
//! [`SchengenArea`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// ISO 3166-1 alpha-2 codes of the 27 current full members.
pub const DEFAULT_MEMBERS: [&str; 27] = [
    "AT", "BE", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IS", "IT", "LI",
    "LT", "LU", "LV", "MT", "NL", "NO", "PL", "PT", "SE", "SI", "SK",
];

/// A set of member-state codes.
///
/// Codes are stored trimmed and upper-cased; lookups apply the same
/// normalization, so `"de"`, `" DE "` and `"DE"` all resolve to Germany.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AreaMembers", into = "AreaMembers")]
pub struct SchengenArea {
    members: BTreeSet<String>,
}

/// On-disk shape of the `[area]` config table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AreaMembers {
    members: Vec<String>,
}

impl From<AreaMembers> for SchengenArea {
    fn from(raw: AreaMembers) -> Self {
        Self::from_codes(raw.members)
    }
}

impl From<SchengenArea> for AreaMembers {
    fn from(area: SchengenArea) -> Self {
        AreaMembers {
            members: area.members.into_iter().collect(),
        }
    }
}

impl Default for SchengenArea {
    fn default() -> Self {
        Self::from_codes(DEFAULT_MEMBERS)
    }
}

impl SchengenArea {
    /// Build a membership set from any list of country codes.
    ///
    /// Blank entries are ignored.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = codes
            .into_iter()
            .map(|c| normalize_code(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();
        Self { members }
    }

    /// Whether `country` belongs to this area. Unknown codes are simply not
    /// members; this never fails.
    pub fn is_member(&self, country: &str) -> bool {
        self.members.contains(&normalize_code(country))
    }

    /// Number of member states.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Classify a country against the default membership set.
pub fn is_schengen_member(country: &str) -> bool {
    let code = normalize_code(country);
    DEFAULT_MEMBERS.contains(&code.as_str())
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
