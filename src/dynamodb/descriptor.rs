//! Request payloads mirroring the DynamoDB wire schema for each operation.
//!
//! Descriptors are built fresh per call. Builders leave `table_name` empty;
//! the client (or a transactional batch) stamps it before sending.

use aws_sdk_dynamodb::types::ReturnValue;

use crate::value::{AttributeMap, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub table_name: String,
    pub index_name: Option<String>,
    pub key_condition_expression: String,
    pub filter_expression: Option<String>,
    pub expression_attribute_values: AttributeMap,
    pub scan_index_forward: bool,
    pub consistent_read: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetDescriptor {
    pub table_name: String,
    pub key: AttributeMap,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutDescriptor {
    pub table_name: String,
    pub item: AttributeMap,
    pub return_values: Option<ReturnValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDescriptor {
    pub table_name: String,
    pub key: AttributeMap,
    pub update_expression: String,
    pub condition_expression: Option<String>,
    pub expression_attribute_values: AttributeMap,
    pub return_values: Option<ReturnValue>,
}

impl UpdateDescriptor {
    /// Update returning every attribute of the item after the write.
    pub fn new(key: AttributeMap, update_expression: impl Into<String>) -> Self {
        Self {
            key,
            update_expression: update_expression.into(),
            return_values: Some(ReturnValue::AllNew),
            ..Default::default()
        }
    }

    pub fn bind(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Self {
        self.expression_attribute_values.insert(placeholder, value);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchGetDescriptor {
    pub table_name: String,
    pub keys: Vec<AttributeMap>,
    pub consistent_read: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest {
    Put(AttributeMap),
    Delete(AttributeMap),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchWriteDescriptor {
    pub table_name: String,
    pub requests: Vec<WriteRequest>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactGet {
    Get(GetDescriptor),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactWrite {
    Put(PutDescriptor),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactGetDescriptor {
    pub transact_items: Vec<TransactGet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactWriteDescriptor {
    pub transact_items: Vec<TransactWrite>,
}
