//! Ordered ffmpeg option lists.

use ffshot_common::error::{FfshotError, FfshotResult};

/// Ordered `flag -> value` list.
///
/// ffmpeg is sensitive to option order, so entries keep insertion order.
/// Setting a flag that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, String)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from pairs, validating each one.
    pub fn from_pairs<I, K, V>(pairs: I) -> FfshotResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value)?;
        }
        Ok(map)
    }

    /// Set `key` to `value`.
    ///
    /// Keys must look like a flag (`-` followed by at least one
    /// non-whitespace character). Neither part may contain `"`, since option
    /// blocks are handed to the launcher inside double quotes.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> FfshotResult<()> {
        let key = key.into();
        let value = value.into();
        validate_key(&key)?;
        if value.contains('"') {
            return Err(FfshotError::invalid_argument(format!(
                "value for option {key} must not contain '\"'"
            )));
        }

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    /// Chaining form of [`OptionMap::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> FfshotResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Space-joined `key value` pairs. Flags with an empty value render
    /// as the bare flag.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_string()
                } else {
                    format!("{key} {value}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn validate_key(key: &str) -> FfshotResult<()> {
    let valid = key.len() > 1
        && key.starts_with('-')
        && !key.contains('"')
        && !key.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(FfshotError::invalid_argument(format!(
            "option key {key:?} is not a flag"
        )))
    }
}
