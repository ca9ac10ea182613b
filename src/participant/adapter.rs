//! Keyword container adapter.
//!
//! Units carry a mixed bag of keyword states and hook bindings, stored
//! either as a list or as a keyed map. This module turns that bag into a
//! tagged [`KeywordEntry`] per item at the boundary, so the rest of the
//! crate never inspects shapes.
//!
//! ## Untyped Input
//!
//! [`KeywordContainer::from_json`] accepts an array or an object. An entry
//! becomes a keyword when it is an object with a numeric `stacks` field
//! and a recognizable keyword id, taken from its `keyword` or `id` field
//! or, for maps, from its key. Anything else is dropped.
//!
//! ```
//! use combat_resolver::keywords::Keyword;
//! use combat_resolver::participant::KeywordContainer;
//!
//! let json = serde_json::json!({
//!     "bleed": { "stacks": 2, "potency": 5 },
//!     "aura": { "radius": 3 },
//! });
//! let container = KeywordContainer::from_json(&json).unwrap();
//!
//! let states: Vec<_> = container.keyword_states().collect();
//! assert_eq!(states.len(), 1);
//! assert_eq!(states[0].keyword, Keyword::Bleed);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::AdapterError;
use crate::hooks::HookBinding;
use crate::keywords::{Keyword, KeywordState};

/// One classified container item.
#[derive(Clone, Debug)]
pub enum KeywordEntry {
    /// A keyword with stacks, processed by the keyword engine.
    Keyword(KeywordState),
    /// Hooks contributed by the container, run after the unit's own hooks.
    Hook(HookBinding),
}

impl KeywordEntry {
    /// The keyword state, if this entry is one.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&KeywordState> {
        match self {
            Self::Keyword(state) => Some(state),
            Self::Hook(_) => None,
        }
    }

    /// The hook binding, if this entry is one.
    #[must_use]
    pub fn as_hook(&self) -> Option<&HookBinding> {
        match self {
            Self::Keyword(_) => None,
            Self::Hook(binding) => Some(binding),
        }
    }
}

impl From<KeywordState> for KeywordEntry {
    fn from(state: KeywordState) -> Self {
        Self::Keyword(state)
    }
}

impl From<HookBinding> for KeywordEntry {
    fn from(binding: HookBinding) -> Self {
        Self::Hook(binding)
    }
}

/// A unit's keyword container, as a list or a keyed map.
///
/// Map entries are visited in key order.
#[derive(Clone, Debug)]
pub enum KeywordContainer {
    /// Ordered entries.
    List(Vec<KeywordEntry>),
    /// Entries keyed by name.
    Map(BTreeMap<String, KeywordEntry>),
}

impl Default for KeywordContainer {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl KeywordContainer {
    /// Build a list container.
    pub fn list(entries: impl IntoIterator<Item = KeywordEntry>) -> Self {
        Self::List(entries.into_iter().collect())
    }

    /// Build a map container.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, KeywordEntry)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Add an entry. Map containers key it by keyword id, or by a
    /// positional name for hooks.
    pub fn push(&mut self, entry: KeywordEntry) {
        match self {
            Self::List(entries) => entries.push(entry),
            Self::Map(entries) => {
                let key = match &entry {
                    KeywordEntry::Keyword(state) => state.keyword.as_str().to_string(),
                    KeywordEntry::Hook(_) => format!("hooks{}", entries.len()),
                };
                entries.insert(key, entry);
            }
        }
    }

    /// All entries in visiting order.
    pub fn entries(&self) -> Box<dyn Iterator<Item = &KeywordEntry> + '_> {
        match self {
            Self::List(entries) => Box::new(entries.iter()),
            Self::Map(entries) => Box::new(entries.values()),
        }
    }

    /// All entries in visiting order, mutably.
    pub fn entries_mut(&mut self) -> Box<dyn Iterator<Item = &mut KeywordEntry> + '_> {
        match self {
            Self::List(entries) => Box::new(entries.iter_mut()),
            Self::Map(entries) => Box::new(entries.values_mut()),
        }
    }

    /// Keyword states.
    pub fn keyword_states(&self) -> impl Iterator<Item = &KeywordState> + '_ {
        self.entries().filter_map(KeywordEntry::as_keyword)
    }

    /// Keyword states, mutably, for the keyword engine.
    pub fn keyword_states_mut(&mut self) -> impl Iterator<Item = &mut KeywordState> + '_ {
        self.entries_mut().filter_map(|entry| match entry {
            KeywordEntry::Keyword(state) => Some(state),
            KeywordEntry::Hook(_) => None,
        })
    }

    /// Hook bindings.
    pub fn hook_bindings(&self) -> impl Iterator<Item = &HookBinding> + '_ {
        self.entries().filter_map(KeywordEntry::as_hook)
    }

    /// At least one keyword state is present.
    #[must_use]
    pub fn has_keywords(&self) -> bool {
        self.keyword_states().next().is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(entries) => entries.len(),
            Self::Map(entries) => entries.len(),
        }
    }

    /// No entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove keyword states with no stacks left. Returns how many were removed.
    ///
    /// The resolver never removes entries itself; callers prune between
    /// exchanges when they want exhausted keywords gone.
    pub fn prune_spent(&mut self) -> usize {
        let before = self.len();
        let spent = |entry: &KeywordEntry| matches!(entry, KeywordEntry::Keyword(s) if s.is_spent());
        match self {
            Self::List(entries) => entries.retain(|e| !spent(e)),
            Self::Map(entries) => entries.retain(|_, e| !spent(e)),
        }
        before - self.len()
    }

    /// Classify an untyped container.
    ///
    /// Unrecognized entries are dropped. Only a top-level value that is
    /// neither an array nor an object is an error.
    pub fn from_json(value: &Value) -> Result<Self, AdapterError> {
        match value {
            Value::Array(items) => Ok(Self::List(
                items
                    .iter()
                    .filter_map(|item| classify(None, item))
                    .map(KeywordEntry::Keyword)
                    .collect(),
            )),
            Value::Object(items) => Ok(Self::Map(
                items
                    .iter()
                    .filter_map(|(key, item)| {
                        classify(Some(key.as_str()), item).map(|state| (key.clone(), KeywordEntry::Keyword(state)))
                    })
                    .collect(),
            )),
            Value::Null => Err(AdapterError::UnsupportedContainer("null")),
            Value::Bool(_) => Err(AdapterError::UnsupportedContainer("bool")),
            Value::Number(_) => Err(AdapterError::UnsupportedContainer("number")),
            Value::String(_) => Err(AdapterError::UnsupportedContainer("string")),
        }
    }
}

impl<'de> Deserialize<'de> for KeywordContainer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Classify one untyped entry as a keyword state.
fn classify(key: Option<&str>, value: &Value) -> Option<KeywordState> {
    let Value::Object(fields) = value else {
        debug!(key, "dropping non-object keyword entry");
        return None;
    };

    let Some(stacks) = fields.get("stacks").and_then(Value::as_f64) else {
        debug!(key, "dropping keyword entry without numeric stacks");
        return None;
    };

    let id = fields
        .get("keyword")
        .or_else(|| fields.get("id"))
        .and_then(Value::as_str)
        .or(key)?;

    let keyword = match id.parse::<Keyword>() {
        Ok(keyword) => keyword,
        Err(err) => {
            debug!(%err, "dropping keyword entry");
            return None;
        }
    };

    Some(KeywordState {
        keyword,
        stacks,
        potency: fields.get("potency").and_then(Value::as_f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookFn;
    use serde_json::json;

    #[test]
    fn test_from_json_array() {
        let json = json!([
            { "keyword": "burn", "stacks": 3 },
            { "id": "Shield", "stacks": 1, "potency": 4 },
            { "keyword": "poison", "stacks": 2 },
            { "keyword": "bleed" },
            "lifesteal",
            42
        ]);
        let container = KeywordContainer::from_json(&json).unwrap();
        let states: Vec<_> = container.keyword_states().cloned().collect();

        assert_eq!(
            states,
            vec![
                KeywordState::new(Keyword::Burn, 3.0),
                KeywordState::new(Keyword::Shield, 1.0).with_potency(4.0),
            ]
        );
    }

    #[test]
    fn test_from_json_map_uses_key() {
        let json = json!({
            "lifesteal": { "stacks": 2 },
            "armor": { "keyword": "shield", "stacks": 1 },
            "mystery": { "stacks": 1 },
        });
        let container = KeywordContainer::from_json(&json).unwrap();
        let keywords: Vec<_> = container.keyword_states().map(|s| s.keyword).collect();

        // key order: armor, lifesteal
        assert_eq!(keywords, vec![Keyword::Shield, Keyword::Lifesteal]);
    }

    #[test]
    fn test_from_json_rejects_scalars() {
        assert_eq!(
            KeywordContainer::from_json(&json!(3)).unwrap_err(),
            AdapterError::UnsupportedContainer("number")
        );
        assert!(KeywordContainer::from_json(&Value::Null).is_err());
    }

    #[test]
    fn test_deserialize() {
        let container: KeywordContainer =
            serde_json::from_str(r#"[{ "keyword": "bleed", "stacks": 1 }]"#).unwrap();
        assert!(container.has_keywords());

        let err = serde_json::from_str::<KeywordContainer>("\"bleed\"").unwrap_err();
        assert!(err.to_string().contains("array or an object"));
    }

    #[test]
    fn test_mixed_entries() {
        let mut container = KeywordContainer::list([
            KeywordEntry::from(KeywordState::new(Keyword::Bleed, 1.0)),
            KeywordEntry::from(HookBinding::new().on_hit(HookFn::infallible("spark", |_| {}))),
        ]);
        container.push(KeywordState::new(Keyword::Burn, 2.0).into());

        assert_eq!(container.len(), 3);
        assert_eq!(container.keyword_states().count(), 2);
        assert_eq!(container.hook_bindings().count(), 1);

        for state in container.keyword_states_mut() {
            state.stacks = 0.0;
        }
        assert_eq!(container.prune_spent(), 2);
        assert_eq!(container.len(), 1);
        assert!(!container.has_keywords());
    }

    #[test]
    fn test_map_push_keys_by_keyword() {
        let mut container = KeywordContainer::map(Vec::<(String, KeywordEntry)>::new());
        container.push(KeywordState::new(Keyword::Shield, 1.0).into());
        container.push(HookBinding::new().into());

        let KeywordContainer::Map(entries) = &container else {
            panic!("expected map");
        };
        assert!(entries.contains_key("shield"));
        assert!(entries.contains_key("hooks1"));
    }
}
