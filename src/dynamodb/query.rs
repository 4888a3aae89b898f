use crate::expr::{FilterGroup, KeyExpression};
use crate::value::{AttributeMap, Value};

use super::QueryDescriptor;

/// Assembles key-condition and filter expressions into a query descriptor.
///
/// A single counter is shared by key conditions and filters so that every
/// placeholder in the final request is unique, e.g. `:PK0`, `:age1`, `:age2`.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    index_name: Option<String>,
    key_condition_expression: String,
    filter_expression: String,
    expression_attribute_values: AttributeMap,
    count: usize,
}

impl QueryBuilder {
    pub fn new(key_expression: KeyExpression) -> Self {
        let mut builder = Self {
            index_name: key_expression.index_name,
            ..Default::default()
        };

        let mut key_conditions = Vec::with_capacity(key_expression.conditions.len());
        for condition in &key_expression.conditions {
            key_conditions.push(condition.render(builder.count));
            builder.bind(condition.binding_key(builder.count), condition.value().clone());
        }
        builder.key_condition_expression = key_conditions.join(" And ");
        builder
    }

    /// Appends a filter group.
    ///
    /// Groups after the first are joined with the group's connective. A group
    /// with more than one filter is wrapped in parentheses. Every filter that
    /// carries a connective emits it before its fragment, the first one
    /// included.
    pub fn add_filter_group(&mut self, group: FilterGroup) -> &mut Self {
        if !self.filter_expression.is_empty() {
            let connective = group.connective.unwrap_or_default();
            self.filter_expression.push_str(&format!(" {connective} "));
        }

        let grouped = group.filters.len() > 1;
        let mut expression = String::new();
        if grouped {
            expression.push_str("( ");
        }

        for filter in &group.filters {
            if let Some(connective) = filter.connective {
                expression.push_str(&format!(" {connective} "));
            }
            expression.push_str(&filter.condition.render(self.count));
            self.bind(
                filter.condition.binding_key(self.count),
                filter.condition.value().clone(),
            );
        }

        if grouped {
            expression.push(')');
        }

        self.filter_expression.push_str(&expression);
        self
    }

    pub fn with_filter_group(mut self, group: FilterGroup) -> Self {
        self.add_filter_group(group);
        self
    }

    pub fn key_condition_expression(&self) -> &str {
        &self.key_condition_expression
    }

    pub fn filter_expression(&self) -> Option<&str> {
        (!self.filter_expression.is_empty()).then_some(self.filter_expression.as_str())
    }

    pub fn expression_attribute_values(&self) -> &AttributeMap {
        &self.expression_attribute_values
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn build(&self) -> QueryDescriptor {
        QueryDescriptor {
            table_name: String::new(),
            index_name: self.index_name().map(str::to_string),
            key_condition_expression: self.key_condition_expression.clone(),
            filter_expression: self.filter_expression().map(str::to_string),
            expression_attribute_values: self.expression_attribute_values.clone(),
            scan_index_forward: false,
            consistent_read: true,
        }
    }

    fn bind(&mut self, placeholder: String, value: Value) {
        debug_assert!(
            !self.expression_attribute_values.contains_key(&placeholder),
            "placeholder {placeholder} is already bound"
        );
        self.expression_attribute_values.insert(placeholder, value);
        self.count += 1;
    }
}
