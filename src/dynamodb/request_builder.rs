use crate::expr::Condition;
use crate::value::AttributeMap;

use super::{GetDescriptor, PutDescriptor};

/// Builds a get-item key from equality or prefix predicates.
///
/// Key lookups use raw values, so the conditions are never rendered: each
/// one contributes `{key: value}` to the key map.
#[derive(Debug, Clone, Default)]
pub struct GetItemBuilder {
    key: AttributeMap,
}

impl GetItemBuilder {
    pub fn new(conditions: Vec<Condition>) -> Self {
        let mut key = AttributeMap::new();
        for condition in conditions {
            key.insert(condition.key(), condition.value().clone());
        }
        Self { key }
    }

    pub fn key(&self) -> &AttributeMap {
        &self.key
    }

    pub fn build(&self) -> GetDescriptor {
        GetDescriptor {
            table_name: String::new(),
            key: self.key.clone(),
        }
    }
}

/// Wraps an arbitrary mapping into a put descriptor, copying every entry.
pub fn make_put_descriptor(target: &AttributeMap) -> PutDescriptor {
    PutDescriptor {
        table_name: String::new(),
        item: target.clone(),
        return_values: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn get_key_uses_raw_values() {
        let descriptor = GetItemBuilder::new(vec![
            Condition::equals("PK", "USER#1"),
            Condition::begins_with("SK", "PROFILE"),
        ])
        .build();

        assert_eq!(descriptor.table_name, "");
        assert_eq!(descriptor.key.len(), 2);
        assert_eq!(descriptor.key.get("PK"), Some(&Value::from("USER#1")));
        assert_eq!(descriptor.key.get("SK"), Some(&Value::from("PROFILE")));
    }

    #[test]
    fn put_descriptor_copies_all_entries() {
        let mut target = AttributeMap::new();
        target.insert("PK", "USER#1");
        target.insert("tags", vec![Value::from("a")]);

        let descriptor = make_put_descriptor(&target);
        assert_eq!(descriptor.item, target);
        assert_eq!(descriptor.return_values, None);
        assert_eq!(descriptor.table_name, "");
    }
}
