use std::sync::Arc;

use aws_sdk_dynamodb::operation::{
    transact_get_items::TransactGetItemsOutput, transact_write_items::TransactWriteItemsOutput,
};

use crate::dynamodb::{
    BatchGetDescriptor, BatchWriteDescriptor, DocumentStore, GetDescriptor, PutDescriptor,
    QueryDescriptor, TransactGetDescriptor, TransactWriteDescriptor, UpdateDescriptor,
};
use crate::error::{Error, Result};
use crate::record::{Record, from_mapping};
use crate::value::AttributeMap;

/// Table-scoped facade over a [`DocumentStore`].
///
/// Every call stamps the table name on its descriptor, sends it through the
/// shared store handle and rebuilds records with the caller's constructor.
/// Store errors are returned as-is.
pub struct SimpleClient<S = aws_sdk_dynamodb::Client> {
    store: Arc<S>,
    table_name: String,
}

impl<S> Clone for SimpleClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            table_name: self.table_name.clone(),
        }
    }
}

fn hydrate<T, C>(ctor: &C, mapping: &AttributeMap) -> T
where
    T: Record,
    C: Fn() -> T,
{
    let mut record = ctor();
    from_mapping(&mut record, mapping);
    record
}

impl<S: DocumentStore> SimpleClient<S> {
    pub fn new(store: Arc<S>, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn query<T, C>(&self, ctor: C, mut descriptor: QueryDescriptor) -> Result<Vec<T>>
    where
        T: Record,
        C: Fn() -> T,
    {
        descriptor.table_name = self.table_name.clone();
        let output = self.store.query(&descriptor).await?;

        let items = output.items.unwrap_or_default();
        tracing::debug!(table = %self.table_name, count = items.len(), "Query returned items");
        let mut records = Vec::with_capacity(items.len());
        for item in &items {
            let mapping = AttributeMap::from_item(item)?;
            records.push(hydrate(&ctor, &mapping));
        }
        Ok(records)
    }

    pub async fn get<T, C>(&self, ctor: C, mut descriptor: GetDescriptor) -> Result<T>
    where
        T: Record,
        C: Fn() -> T,
    {
        descriptor.table_name = self.table_name.clone();
        let output = self.store.get_item(&descriptor).await?;

        let Some(item) = output.item else {
            tracing::debug!(table = %self.table_name, key = ?descriptor.key, "Item not found");
            return Err(Error::NotFound);
        };
        let mapping = AttributeMap::from_item(&item)?;
        Ok(hydrate(&ctor, &mapping))
    }

    /// Writes the descriptor's item and returns it as a record.
    pub async fn put<T, C>(&self, ctor: C, mut descriptor: PutDescriptor) -> Result<T>
    where
        T: Record,
        C: Fn() -> T,
    {
        descriptor.table_name = self.table_name.clone();
        self.store.put_item(&descriptor).await?;
        Ok(hydrate(&ctor, &descriptor.item))
    }

    /// Applies the update and returns the attributes the store sent back.
    /// Without returned attributes the record stays blank.
    pub async fn update<T, C>(&self, ctor: C, mut descriptor: UpdateDescriptor) -> Result<T>
    where
        T: Record,
        C: Fn() -> T,
    {
        descriptor.table_name = self.table_name.clone();
        let output = self.store.update_item(&descriptor).await?;

        let mapping = match output.attributes {
            Some(attributes) => AttributeMap::from_item(&attributes)?,
            None => AttributeMap::new(),
        };
        Ok(hydrate(&ctor, &mapping))
    }

    /// Issues the batch read but always yields no records.
    pub async fn batch_get<T, C>(
        &self,
        _ctor: C,
        mut descriptor: BatchGetDescriptor,
    ) -> Result<Vec<T>>
    where
        T: Record,
        C: Fn() -> T,
    {
        // TODO: hydrate `responses[table_name]` through `_ctor` once a caller needs batch reads.
        descriptor.table_name = self.table_name.clone();
        let output = self.store.batch_get_item(&descriptor).await?;

        let returned = output
            .responses
            .as_ref()
            .and_then(|responses| responses.get(&self.table_name))
            .map_or(0, Vec::len);
        tracing::debug!(
            table = %self.table_name,
            requested = descriptor.keys.len(),
            returned,
            "Batch get response discarded"
        );
        Ok(Vec::new())
    }

    /// Returns how many write requests the store left unprocessed.
    pub async fn batch_write(&self, mut descriptor: BatchWriteDescriptor) -> Result<usize> {
        descriptor.table_name = self.table_name.clone();
        let output = self.store.batch_write_item(&descriptor).await?;

        let unprocessed = output
            .unprocessed_items
            .as_ref()
            .map_or(0, |items| items.values().map(Vec::len).sum::<usize>());
        if unprocessed > 0 {
            tracing::debug!(
                table = %self.table_name,
                unprocessed,
                "Batch write left items unprocessed"
            );
        }
        Ok(unprocessed)
    }

    pub async fn transact_get(
        &self,
        descriptor: TransactGetDescriptor,
    ) -> Result<TransactGetItemsOutput> {
        self.store.transact_get_items(&descriptor).await
    }

    pub async fn commit(
        &self,
        descriptor: TransactWriteDescriptor,
    ) -> Result<TransactWriteItemsOutput> {
        self.store.transact_write_items(&descriptor).await
    }
}
