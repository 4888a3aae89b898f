use super::Record;
use crate::dynamodb::{PutDescriptor, WriteRequest};
use crate::value::{AttributeMap, Value};

fn collect<R: Record + ?Sized>(record: &R, keep: impl Fn(&Value) -> bool) -> AttributeMap {
    let mut mapping = AttributeMap::new();
    for (name, value) in record.fields() {
        if let Some(value) = value.filter(|value| keep(value)) {
            mapping.insert(name, value);
        }
    }
    mapping
}

/// Plain attributes of `record`. Arrays, nested mappings and nested records
/// are left out; callers serialize those separately.
pub fn to_mapping<R: Record + ?Sized>(record: &R) -> AttributeMap {
    collect(record, |value| !value.is_composite())
}

/// Attributes for a batch-write put request. Only arrays are left out;
/// nested mappings and records stay.
pub fn to_put_request_item<R: Record + ?Sized>(record: &R) -> AttributeMap {
    collect(record, |value| !value.is_list())
}

/// Every set attribute of `record`, without exclusions.
pub fn to_full_mapping<R: Record + ?Sized>(record: &R) -> AttributeMap {
    collect(record, |_| true)
}

/// Copies values from `mapping` into the fields `record` declares.
///
/// Keys the record does not declare and keys missing from the mapping are
/// skipped.
pub fn from_mapping<R: Record + ?Sized>(record: &mut R, mapping: &AttributeMap) {
    let declared: Vec<String> = record
        .fields()
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();
    for name in declared {
        if let Some(value) = mapping.get(&name) {
            record.set_field(&name, value.clone());
        }
    }
}

/// Put descriptor for a single-item write of `record`.
pub fn put_descriptor<R: Record + ?Sized>(record: &R) -> PutDescriptor {
    PutDescriptor {
        table_name: String::new(),
        item: to_mapping(record),
        return_values: None,
    }
}

/// Put request for a batch write of `record`.
pub fn put_request<R: Record + ?Sized>(record: &R) -> WriteRequest {
    WriteRequest::Put(to_put_request_item(record))
}
