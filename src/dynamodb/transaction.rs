use super::{
    GetDescriptor, PutDescriptor, TransactGet, TransactGetDescriptor, TransactWrite,
    TransactWriteDescriptor,
};

/// Collects get operations on one table into a single transactional read.
#[derive(Debug, Clone)]
pub struct TransactGetBatch {
    table_name: String,
    transact_items: Vec<TransactGet>,
}

impl TransactGetBatch {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            transact_items: Vec::new(),
        }
    }

    pub fn put(&mut self, mut get: GetDescriptor) -> &mut Self {
        get.table_name = self.table_name.clone();
        self.transact_items.push(TransactGet::Get(get));
        self
    }

    pub fn len(&self) -> usize {
        self.transact_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transact_items.is_empty()
    }

    pub fn build(&self) -> TransactGetDescriptor {
        TransactGetDescriptor {
            transact_items: self.transact_items.clone(),
        }
    }
}

/// Collects put operations on one table into a single all-or-nothing write.
///
/// The store's per-transaction item limit is not checked here.
#[derive(Debug, Clone)]
pub struct TransactWriteBatch {
    table_name: String,
    transact_items: Vec<TransactWrite>,
}

impl TransactWriteBatch {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            transact_items: Vec::new(),
        }
    }

    pub fn put(&mut self, mut put: PutDescriptor) -> &mut Self {
        put.table_name = self.table_name.clone();
        self.transact_items.push(TransactWrite::Put(put));
        self
    }

    pub fn len(&self) -> usize {
        self.transact_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transact_items.is_empty()
    }

    pub fn build(&self) -> TransactWriteDescriptor {
        TransactWriteDescriptor {
            transact_items: self.transact_items.clone(),
        }
    }
}
