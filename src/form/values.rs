use std::collections::BTreeMap;

use crate::form::field::FieldDescriptor;

/// Flat `name -> string` map backing a form while it is edited.
///
/// Values stay strings until submission; a missing entry reads as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with an empty entry for every descriptor.
    pub fn empty_for(fields: &[FieldDescriptor]) -> Self {
        fields
            .iter()
            .map(|field| (field.name.to_string(), String::new()))
            .collect()
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::FieldKind;

    #[test]
    fn test_missing_reads_empty() {
        let values = FormValues::new();
        assert_eq!(values.get("age"), "");
        assert!(!values.contains("age"));
    }

    #[test]
    fn test_empty_for_descriptors() {
        let fields = [
            FieldDescriptor::new("a", "A", FieldKind::Text),
            FieldDescriptor::new("b", "B", FieldKind::Number),
        ];
        let values = FormValues::empty_for(&fields);
        assert_eq!(values.len(), 2);
        assert!(values.contains("b"));
        assert_eq!(values.get("b"), "");
    }

    #[test]
    fn test_set_overwrites() {
        let values = FormValues::new().with("name", "A").with("name", "B");
        assert_eq!(values.get("name"), "B");
        assert_eq!(values.len(), 1);
    }
}
