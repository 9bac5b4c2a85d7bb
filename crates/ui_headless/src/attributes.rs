//! Rendered DOM attribute sets.

use std::collections::BTreeMap;

/// Ordered attribute name/value map produced from controller props.
///
/// Absent optional attributes are omitted rather than rendered empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(BTreeMap<&'static str, String>);

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.0.insert(name, value.into());
        self
    }

    /// Sets an attribute only when `value` is present.
    pub fn set_opt(&mut self, name: &'static str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(name, value.into());
        }
        self
    }

    /// Sets a `"true"`/`"false"` token attribute.
    pub fn set_bool(&mut self, name: &'static str, value: bool) -> &mut Self {
        self.set(name, bool_token(value))
    }

    /// Sets a boolean presence attribute (`disabled`, `required`, ...).
    pub fn set_flag(&mut self, name: &'static str, present: bool) -> &mut Self {
        if present {
            self.0.insert(name, String::new());
        } else {
            self.0.remove(name);
        }
        self
    }

    /// Returns an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stable `"true"`/`"false"` token used for ARIA and `data-*` attributes.
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn optional_and_flag_attributes() {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", "save")
            .set_opt("aria-label", None::<String>)
            .set_bool("aria-busy", false)
            .set_flag("disabled", true)
            .set_flag("required", false);

        assert_eq!(
            attrs.iter().collect::<Vec<_>>(),
            vec![("aria-busy", "false"), ("disabled", ""), ("id", "save")]
        );
        assert!(!attrs.contains("aria-label"));
    }
}
