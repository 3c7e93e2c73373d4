use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// a set of observed headsign labels that all mean `canonical`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HeadsignClass {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl HeadsignClass {
    pub fn new(canonical: &str, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// every label belonging to this class, canonical first
    pub fn labels(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.canonical).chain(self.aliases.iter())
    }
}

/// label lookup for one route+direction, built from its headsign classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadsignTable {
    canonical_labels: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl HeadsignTable {
    /// builds a table from classes, plus an optional label that is canonical without
    /// belonging to any class (such as a direction's own label).
    pub fn new(label: Option<&str>, classes: &[HeadsignClass]) -> Self {
        let mut canonical_labels: BTreeSet<String> =
            classes.iter().map(|c| c.canonical.clone()).collect();
        if let Some(l) = label {
            canonical_labels.insert(l.to_string());
        }
        let aliases = classes
            .iter()
            .flat_map(|c| {
                c.aliases
                    .iter()
                    .filter(|a| **a != c.canonical)
                    .map(|a| (a.clone(), c.canonical.clone()))
            })
            .collect();
        Self {
            canonical_labels,
            aliases,
        }
    }

    /// canonical label for an observed label, or None when the table does not cover it.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        if let Some(canonical) = self.canonical_labels.get(label) {
            return Some(canonical.as_str());
        }
        self.aliases.get(label).map(|c| c.as_str())
    }
}
