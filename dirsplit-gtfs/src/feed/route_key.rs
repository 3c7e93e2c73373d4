//! numeric route keys derived from agency route short names such as "1B", "21EB" or "DMSF".
use super::FeedError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// how short names that are not plain numbers map onto route keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RouteKeyRules {
    /// tokens marking a directional or peak variant; the key is the number before the token
    pub direction_markers: Vec<String>,
    /// trailing letters that offset the numeric part of the name, compared case-insensitively
    pub suffix_offsets: BTreeMap<String, u64>,
    /// whole names with a fixed key, compared case-insensitively
    pub special_names: BTreeMap<String, u64>,
}

impl Default for RouteKeyRules {
    fn default() -> Self {
        Self {
            direction_markers: ["EB", "WB", "AM", "PM"].map(String::from).to_vec(),
            suffix_offsets: BTreeMap::from([
                (String::from("A"), 10_000),
                (String::from("B"), 20_000),
                (String::from("C"), 30_000),
            ]),
            special_names: BTreeMap::from([(String::from("DMSF"), 99_000)]),
        }
    }
}

pub fn derive_route_key(short_name: &str, rules: &RouteKeyRules) -> Result<u64, FeedError> {
    let name = short_name.trim();
    let unexpected = || FeedError::RouteKeyError(short_name.to_string());

    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        return name.parse::<u64>().map_err(|_| unexpected());
    }

    for marker in rules.direction_markers.iter() {
        if let Some(idx) = name.find(marker.as_str()) {
            return name[..idx].trim().parse::<u64>().map_err(|_| unexpected());
        }
    }

    // first run of digits in the name
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if let Ok(number) = digits.parse::<u64>() {
        let offset = rules
            .suffix_offsets
            .iter()
            .find(|(suffix, _)| name.to_uppercase().ends_with(&suffix.to_uppercase()))
            .map(|(_, offset)| *offset);
        if let Some(offset) = offset {
            return offset.checked_add(number).ok_or_else(unexpected);
        }
    }

    rules
        .special_names
        .iter()
        .find(|(special, _)| special.eq_ignore_ascii_case(name))
        .map(|(_, key)| *key)
        .ok_or_else(unexpected)
}
