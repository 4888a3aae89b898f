use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    operation::{
        batch_get_item::BatchGetItemOutput, batch_write_item::BatchWriteItemOutput,
        get_item::GetItemOutput, put_item::PutItemOutput, query::QueryOutput,
        transact_get_items::TransactGetItemsOutput,
        transact_write_items::TransactWriteItemsOutput, update_item::UpdateItemOutput,
    },
    types::{
        AttributeValue, DeleteRequest, Get, KeysAndAttributes, Put, PutRequest, TransactGetItem,
        TransactWriteItem,
    },
};

use super::{
    BatchGetDescriptor, BatchWriteDescriptor, GetDescriptor, PutDescriptor, QueryDescriptor,
    TransactGet, TransactGetDescriptor, TransactWrite, TransactWriteDescriptor, UpdateDescriptor,
    WriteRequest, send_dynamo_request,
};
use crate::error::Result;
use crate::value::AttributeMap;

/// The document-store operations the client facade relies on.
///
/// Implemented for [`aws_sdk_dynamodb::Client`]; tests provide their own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(&self, input: &QueryDescriptor) -> Result<QueryOutput>;
    async fn get_item(&self, input: &GetDescriptor) -> Result<GetItemOutput>;
    async fn put_item(&self, input: &PutDescriptor) -> Result<PutItemOutput>;
    async fn update_item(&self, input: &UpdateDescriptor) -> Result<UpdateItemOutput>;
    async fn batch_get_item(&self, input: &BatchGetDescriptor) -> Result<BatchGetItemOutput>;
    async fn batch_write_item(&self, input: &BatchWriteDescriptor) -> Result<BatchWriteItemOutput>;
    async fn transact_get_items(
        &self,
        input: &TransactGetDescriptor,
    ) -> Result<TransactGetItemsOutput>;
    async fn transact_write_items(
        &self,
        input: &TransactWriteDescriptor,
    ) -> Result<TransactWriteItemsOutput>;
}

fn non_empty(values: &AttributeMap) -> Option<HashMap<String, AttributeValue>> {
    (!values.is_empty()).then(|| values.to_item())
}

#[async_trait]
impl DocumentStore for Client {
    async fn query(&self, input: &QueryDescriptor) -> Result<QueryOutput> {
        tracing::trace!(
            table = %input.table_name,
            index = ?input.index_name,
            key_condition_expression = %input.key_condition_expression,
            filter_expression = ?input.filter_expression,
            attribute_values = ?input.expression_attribute_values,
            "Query"
        );
        let request = self
            .query()
            .table_name(&input.table_name)
            .set_index_name(input.index_name.clone())
            .key_condition_expression(&input.key_condition_expression)
            .set_filter_expression(input.filter_expression.clone())
            .set_expression_attribute_values(non_empty(&input.expression_attribute_values))
            .scan_index_forward(input.scan_index_forward)
            .consistent_read(input.consistent_read);

        let span = tracing::trace_span!(
            "Query",
            table = %input.table_name,
            index = ?input.index_name
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn get_item(&self, input: &GetDescriptor) -> Result<GetItemOutput> {
        let request = self
            .get_item()
            .table_name(&input.table_name)
            .set_key(Some(input.key.to_item()));

        let span = tracing::trace_span!("GetItem", table = %input.table_name, key = ?input.key);
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn put_item(&self, input: &PutDescriptor) -> Result<PutItemOutput> {
        let request = self
            .put_item()
            .table_name(&input.table_name)
            .set_item(Some(input.item.to_item()))
            .set_return_values(input.return_values.clone());

        let span = tracing::trace_span!(
            "PutItem",
            table = %input.table_name,
            attributes = input.item.len()
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn update_item(&self, input: &UpdateDescriptor) -> Result<UpdateItemOutput> {
        tracing::trace!(
            table = %input.table_name,
            update_expression = %input.update_expression,
            condition_expression = ?input.condition_expression,
            attribute_values = ?input.expression_attribute_values,
            "UpdateItem"
        );
        let request = self
            .update_item()
            .table_name(&input.table_name)
            .set_key(Some(input.key.to_item()))
            .update_expression(&input.update_expression)
            .set_condition_expression(input.condition_expression.clone())
            .set_expression_attribute_values(non_empty(&input.expression_attribute_values))
            .set_return_values(input.return_values.clone());

        let span = tracing::trace_span!("UpdateItem", table = %input.table_name, key = ?input.key);
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn batch_get_item(&self, input: &BatchGetDescriptor) -> Result<BatchGetItemOutput> {
        let keys = input.keys.iter().map(AttributeMap::to_item).collect();
        let keys_and_attributes = KeysAndAttributes::builder()
            .set_keys(Some(keys))
            .set_consistent_read(input.consistent_read)
            .build()?;
        let request = self
            .batch_get_item()
            .request_items(&input.table_name, keys_and_attributes);

        let span = tracing::trace_span!(
            "BatchGetItem",
            table = %input.table_name,
            keys = input.keys.len()
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn batch_write_item(&self, input: &BatchWriteDescriptor) -> Result<BatchWriteItemOutput> {
        let mut write_requests = Vec::with_capacity(input.requests.len());
        for request in &input.requests {
            let write_request = match request {
                WriteRequest::Put(item) => aws_sdk_dynamodb::types::WriteRequest::builder()
                    .put_request(PutRequest::builder().set_item(Some(item.to_item())).build()?)
                    .build(),
                WriteRequest::Delete(key) => aws_sdk_dynamodb::types::WriteRequest::builder()
                    .delete_request(DeleteRequest::builder().set_key(Some(key.to_item())).build()?)
                    .build(),
            };
            write_requests.push(write_request);
        }
        let request = self
            .batch_write_item()
            .request_items(&input.table_name, write_requests);

        let span = tracing::trace_span!(
            "BatchWriteItem",
            table = %input.table_name,
            requests = input.requests.len()
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn transact_get_items(
        &self,
        input: &TransactGetDescriptor,
    ) -> Result<TransactGetItemsOutput> {
        let mut transact_items = Vec::with_capacity(input.transact_items.len());
        for entry in &input.transact_items {
            let TransactGet::Get(get) = entry;
            let get = Get::builder()
                .table_name(&get.table_name)
                .set_key(Some(get.key.to_item()))
                .build()?;
            transact_items.push(TransactGetItem::builder().get(get).build());
        }
        let request = self
            .transact_get_items()
            .set_transact_items(Some(transact_items));

        let span = tracing::trace_span!(
            "TransactGetItems",
            items = input.transact_items.len()
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }

    async fn transact_write_items(
        &self,
        input: &TransactWriteDescriptor,
    ) -> Result<TransactWriteItemsOutput> {
        let mut transact_items = Vec::with_capacity(input.transact_items.len());
        for entry in &input.transact_items {
            let TransactWrite::Put(put) = entry;
            let put = Put::builder()
                .table_name(&put.table_name)
                .set_item(Some(put.item.to_item()))
                .build()?;
            transact_items.push(TransactWriteItem::builder().put(put).build());
        }
        let request = self
            .transact_write_items()
            .set_transact_items(Some(transact_items));

        let span = tracing::trace_span!(
            "TransactWriteItems",
            items = input.transact_items.len()
        );
        Ok(send_dynamo_request(span, || request.send()).await?)
    }
}
