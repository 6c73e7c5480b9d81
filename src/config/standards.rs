use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use super::error::ConfigError;

/// One reference or corrective material definition.
///
/// A standard is identified by a canonical key (e.g. `blank`, `qtycal`) and
/// carries every alternate spelling under which it may appear in raw
/// instrument output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDefinition {
    /// Canonical registry key. Assigned from the document map key, not from
    /// the object body.
    #[serde(skip)]
    pub key: String,

    /// Alternate names under which this standard appears in raw data.
    /// Stored under the `names` key in the document. Always non-empty in a
    /// constructed registry.
    #[serde(rename = "names")]
    pub aliases: Vec<String>,

    /// Physical material, or `None` when nothing is dropped into the
    /// analyzer (a blank). Presentation code may render `None` as "Nothing".
    #[serde(default)]
    pub material: Option<String>,

    /// Mass fraction of nitrogen, in [0, 1]. Absent when not applicable.
    #[serde(rename = "fractionN", default, skip_serializing_if = "Option::is_none")]
    pub fraction_n: Option<f64>,

    /// Mass fraction of carbon, in [0, 1]. Absent when not applicable.
    #[serde(rename = "fractionC", default, skip_serializing_if = "Option::is_none")]
    pub fraction_c: Option<f64>,

    /// Free-text notes. Carries no behavioral meaning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StandardDefinition {
    /// Create a definition with a key and alias list; the remaining fields
    /// start empty.
    pub fn new(key: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            key: key.into(),
            aliases,
            material: None,
            fraction_n: None,
            fraction_c: None,
            notes: None,
        }
    }
}

/// Normalized form of an alias used for the lookup fallback: lowercased with
/// whitespace and separator punctuation removed, so `"Empty Tin"`,
/// `"empty_tin"` and `"empty-tin"` all map to `"emptytin"`.
pub fn normalize_alias(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '-' | '.'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Insertion-ordered collection of [`StandardDefinition`]s with an alias
/// index for name resolution.
///
/// Invariant, enforced at construction: every alias is globally unique
/// across the registry, on its *normalized* form. Lookup is normalized, so
/// two raw-distinct aliases that normalize identically would make
/// resolution ambiguous.
#[derive(Debug, Clone, Default)]
pub struct StandardsRegistry {
    defs: Vec<StandardDefinition>,
    /// Raw alias -> index into `defs`, for the exact case-sensitive pass
    exact: HashMap<String, usize>,
    /// Normalized alias (and canonical key) -> index into `defs`
    normalized: HashMap<String, usize>,
}

impl StandardsRegistry {
    /// Build a registry from definitions, validating every invariant:
    /// non-empty trimmed aliases, global alias uniqueness, and mass
    /// fractions in [0, 1]. All-or-nothing: the first violation aborts
    /// construction.
    pub fn from_definitions(
        defs: impl IntoIterator<Item = StandardDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for def in defs {
            registry.insert(def)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, mut def: StandardDefinition) -> Result<(), ConfigError> {
        check_fraction(&def.key, "fractionN", def.fraction_n)?;
        check_fraction(&def.key, "fractionC", def.fraction_c)?;

        let aliases: Vec<String> = def
            .aliases
            .iter()
            .map(|a| a.trim().to_string())
            .collect();
        if aliases.is_empty() || aliases.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyAlias(def.key));
        }
        def.aliases = aliases;

        let idx = self.defs.len();
        for alias in def.aliases.clone() {
            self.claim(alias, idx, &def.key)?;
        }
        // The canonical key itself resolves too, and may not shadow another
        // standard's alias.
        self.claim(def.key.clone(), idx, &def.key)?;

        self.defs.push(def);
        Ok(())
    }

    fn claim(&mut self, raw: String, idx: usize, key: &str) -> Result<(), ConfigError> {
        let norm = normalize_alias(&raw);
        if let Some(&owner) = self.normalized.get(&norm) {
            if owner != idx {
                return Err(ConfigError::DuplicateAlias {
                    alias: raw,
                    first: self.defs[owner].key.clone(),
                    second: key.to_string(),
                });
            }
        } else {
            self.normalized.insert(norm, idx);
        }
        self.exact.entry(raw).or_insert(idx);
        Ok(())
    }

    /// Resolve a raw sample name to a standard definition.
    ///
    /// Exact case-sensitive alias match first, then a case-insensitive,
    /// separator-normalized fallback. `None` is the expected lookup-miss
    /// signal for ordinary sample names, not an error.
    pub fn resolve(&self, raw: &str) -> Option<&StandardDefinition> {
        if let Some(&i) = self.exact.get(raw) {
            return Some(&self.defs[i]);
        }
        self.normalized
            .get(&normalize_alias(raw))
            .map(|&i| &self.defs[i])
    }

    /// Look up a definition by its canonical key (exact match only).
    pub fn get(&self, key: &str) -> Option<&StandardDefinition> {
        self.defs.iter().find(|d| d.key == key)
    }

    /// Iterate definitions in document order.
    pub fn iter(&self) -> impl Iterator<Item = &StandardDefinition> {
        self.defs.iter()
    }

    /// Number of standards in the registry.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when the registry holds no standards.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn check_fraction(key: &str, field: &'static str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => Err(ConfigError::Range {
            key: key.to_string(),
            field,
            value: v,
        }),
        _ => Ok(()),
    }
}

// The indexes are derived state; equality is over the definitions alone.
impl PartialEq for StandardsRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.defs == other.defs
    }
}

// The document stores the registry as a JSON object keyed by canonical key.
impl Serialize for StandardsRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.defs.len()))?;
        for def in &self.defs {
            map.serialize_entry(&def.key, def)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StandardsRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = StandardsRegistry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of canonical key to standard definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut defs = Vec::new();
                while let Some((key, mut def)) =
                    access.next_entry::<String, StandardDefinition>()?
                {
                    def.key = key;
                    defs.push(def);
                }
                StandardsRegistry::from_definitions(defs).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}
