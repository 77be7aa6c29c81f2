use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ticket counts keyed by group name, in first-encountered key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl GroupCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one ticket to `key`, appending the key if it is new.
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key).copied() {
            Some(position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn into_vec(self) -> Vec<(String, usize)> {
        self.entries
    }
}

impl Serialize for GroupCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_encountered_order() {
        let mut counts = GroupCounts::new();
        counts.increment("Hall B");
        counts.increment("Hall A");
        counts.increment("Hall B");

        let entries: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(entries, vec![("Hall B", 2), ("Hall A", 1)]);
        assert_eq!(counts.get("Hall A"), Some(1));
        assert_eq!(counts.get("Hall C"), None);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut counts = GroupCounts::new();
        counts.increment("201");
        counts.increment("101");
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"201":1,"101":1}"#);
    }
}
