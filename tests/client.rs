use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::{
    batch_get_item::BatchGetItemOutput, batch_write_item::BatchWriteItemOutput,
    get_item::GetItemOutput, put_item::PutItemOutput, query::QueryOutput,
    transact_get_items::TransactGetItemsOutput, transact_write_items::TransactWriteItemsOutput,
    update_item::UpdateItemOutput,
};
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{AttributeValue, ItemResponse, PutRequest};
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;

use simple_dynamo::dynamodb::{
    BatchGetDescriptor, BatchWriteDescriptor, DocumentStore, GetDescriptor, GetItemBuilder,
    PutDescriptor, QueryBuilder, QueryDescriptor, TransactGetBatch, TransactGetDescriptor,
    TransactWriteBatch, TransactWriteDescriptor, UpdateDescriptor, WriteRequest,
};
use simple_dynamo::error::NOT_FOUND_MESSAGE;
use simple_dynamo::expr::{Condition, KeyExpression};
use simple_dynamo::record::{put_descriptor, put_request};
use simple_dynamo::{AttributeMap, Document, Error, Record, Sequence, SimpleClient, Value};

type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
enum Call {
    Query(QueryDescriptor),
    Get(GetDescriptor),
    Put(PutDescriptor),
    Update(UpdateDescriptor),
    BatchGet(BatchGetDescriptor),
    BatchWrite(BatchWriteDescriptor),
    TransactGet(TransactGetDescriptor),
    TransactWrite(TransactWriteDescriptor),
}

/// Store double that records every descriptor and answers from canned data.
#[derive(Default)]
struct MockStore {
    calls: Mutex<Vec<Call>>,
    items: Vec<Item>,
    item: Option<Item>,
    attributes: Option<Item>,
    unprocessed: usize,
    fail: bool,
}

impl MockStore {
    fn record(&self, call: Call) -> simple_dynamo::Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            let missing = ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build();
            return Err(Error::Store(
                aws_sdk_dynamodb::Error::ResourceNotFoundException(missing),
            ));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn query(&self, input: &QueryDescriptor) -> simple_dynamo::Result<QueryOutput> {
        self.record(Call::Query(input.clone()))?;
        Ok(QueryOutput::builder()
            .set_items(Some(self.items.clone()))
            .build())
    }

    async fn get_item(&self, input: &GetDescriptor) -> simple_dynamo::Result<GetItemOutput> {
        self.record(Call::Get(input.clone()))?;
        Ok(GetItemOutput::builder().set_item(self.item.clone()).build())
    }

    async fn put_item(&self, input: &PutDescriptor) -> simple_dynamo::Result<PutItemOutput> {
        self.record(Call::Put(input.clone()))?;
        Ok(PutItemOutput::builder().build())
    }

    async fn update_item(
        &self,
        input: &UpdateDescriptor,
    ) -> simple_dynamo::Result<UpdateItemOutput> {
        self.record(Call::Update(input.clone()))?;
        Ok(UpdateItemOutput::builder()
            .set_attributes(self.attributes.clone())
            .build())
    }

    async fn batch_get_item(
        &self,
        input: &BatchGetDescriptor,
    ) -> simple_dynamo::Result<BatchGetItemOutput> {
        self.record(Call::BatchGet(input.clone()))?;
        let responses = HashMap::from([(input.table_name.clone(), self.items.clone())]);
        Ok(BatchGetItemOutput::builder()
            .set_responses(Some(responses))
            .build())
    }

    async fn batch_write_item(
        &self,
        input: &BatchWriteDescriptor,
    ) -> simple_dynamo::Result<BatchWriteItemOutput> {
        self.record(Call::BatchWrite(input.clone()))?;
        let pending = (0..self.unprocessed)
            .map(|i| {
                let put = PutRequest::builder()
                    .item("PK", AttributeValue::S(format!("PENDING#{i}")))
                    .build()
                    .unwrap();
                aws_sdk_dynamodb::types::WriteRequest::builder()
                    .put_request(put)
                    .build()
            })
            .collect();
        Ok(BatchWriteItemOutput::builder()
            .set_unprocessed_items(Some(HashMap::from([(input.table_name.clone(), pending)])))
            .build())
    }

    async fn transact_get_items(
        &self,
        input: &TransactGetDescriptor,
    ) -> simple_dynamo::Result<TransactGetItemsOutput> {
        self.record(Call::TransactGet(input.clone()))?;
        let responses = self
            .items
            .iter()
            .map(|item| ItemResponse::builder().set_item(Some(item.clone())).build())
            .collect();
        Ok(TransactGetItemsOutput::builder()
            .set_responses(Some(responses))
            .build())
    }

    async fn transact_write_items(
        &self,
        input: &TransactWriteDescriptor,
    ) -> simple_dynamo::Result<TransactWriteItemsOutput> {
        self.record(Call::TransactWrite(input.clone()))?;
        Ok(TransactWriteItemsOutput::builder().build())
    }
}

fn item(pk: &str, sk: &str, name: &str) -> Item {
    HashMap::from([
        ("PK".to_string(), AttributeValue::S(pk.to_string())),
        ("SK".to_string(), AttributeValue::S(sk.to_string())),
        ("name".to_string(), AttributeValue::S(name.to_string())),
        ("age".to_string(), AttributeValue::N("42".to_string())),
    ])
}

fn client(store: MockStore) -> (SimpleClient<MockStore>, Arc<MockStore>) {
    let store = Arc::new(store);
    (SimpleClient::new(store.clone(), "users"), store)
}

fn person() -> Document {
    Document::new(["name"])
}

#[tokio::test]
async fn query_stamps_table_and_hydrates_in_order() {
    let (client, store) = client(MockStore {
        items: vec![
            item("USER#1", "PROFILE#2", "Grace"),
            item("USER#1", "PROFILE#1", "Ada"),
        ],
        ..Default::default()
    });
    let descriptor =
        QueryBuilder::new(KeyExpression::new(vec![Condition::equals("PK", "USER#1")])).build();

    let people = client.query(person, descriptor).await.unwrap();

    let names: Vec<_> = people
        .iter()
        .map(|person| person.get("name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["Grace", "Ada"]);
    assert_eq!(people[0].sort_key(), "PROFILE#2");
    // Undeclared attributes stay out of the record.
    assert_eq!(people[0].get("age"), None);

    let calls = store.calls();
    let [Call::Query(sent)] = calls.as_slice() else {
        panic!("expected a single query");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(sent.key_condition_expression, "PK = :PK0");
    assert!(!sent.scan_index_forward);
    assert!(sent.consistent_read);
}

#[tokio::test]
async fn query_with_no_matches_is_empty() {
    let (client, _) = client(MockStore::default());
    let descriptor =
        QueryBuilder::new(KeyExpression::new(vec![Condition::equals("PK", "NOBODY")])).build();

    let people = client.query(person, descriptor).await.unwrap();
    assert!(people.is_empty());
}

#[tokio::test]
async fn get_returns_hydrated_record() {
    let (client, store) = client(MockStore {
        item: Some(item("USER#1", "PROFILE", "Ada")),
        ..Default::default()
    });
    let descriptor = GetItemBuilder::new(vec![
        Condition::equals("PK", "USER#1"),
        Condition::equals("SK", "PROFILE"),
    ])
    .build();

    let ada = client.get(person, descriptor).await.unwrap();
    assert_eq!(ada.partition_key(), "USER#1");
    assert_eq!(ada.get("name"), Some(&Value::from("Ada")));

    let calls = store.calls();
    let [Call::Get(sent)] = calls.as_slice() else {
        panic!("expected a single get");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(sent.key.get("SK"), Some(&Value::from("PROFILE")));
}

#[tokio::test]
async fn get_tolerates_undeclared_binary_attributes() {
    let mut stored = item("USER#1", "PROFILE", "Ada");
    stored.insert("avatar".to_string(), AttributeValue::B(Blob::new(vec![0x89, 0x50])));
    let (client, _) = client(MockStore {
        item: Some(stored),
        ..Default::default()
    });
    let descriptor = GetItemBuilder::new(vec![
        Condition::equals("PK", "USER#1"),
        Condition::equals("SK", "PROFILE"),
    ])
    .build();

    let ada = client.get(person, descriptor).await.unwrap();
    assert_eq!(ada.get("name"), Some(&Value::from("Ada")));
    assert_eq!(ada.get("avatar"), None);
}

#[tokio::test]
async fn large_numbers_survive_read_then_write() {
    let mut stored = item("USER#1", "PROFILE", "Ada");
    stored.insert(
        "id".to_string(),
        AttributeValue::N("9007199254740993".to_string()),
    );
    let (client, store) = client(MockStore {
        item: Some(stored),
        ..Default::default()
    });
    let descriptor = GetItemBuilder::new(vec![
        Condition::equals("PK", "USER#1"),
        Condition::equals("SK", "PROFILE"),
    ])
    .build();

    let fetched = client
        .get(|| Document::new(["id"]), descriptor)
        .await
        .unwrap();
    client
        .put(|| Document::new(["id"]), put_descriptor(&fetched))
        .await
        .unwrap();

    let calls = store.calls();
    let [Call::Get(_), Call::Put(sent)] = calls.as_slice() else {
        panic!("expected a get then a put");
    };
    assert_eq!(
        sent.item.to_item().get("id"),
        Some(&AttributeValue::N("9007199254740993".to_string()))
    );
}

#[tokio::test]
async fn get_without_item_is_not_found() {
    let (client, _) = client(MockStore::default());
    let descriptor = GetItemBuilder::new(vec![Condition::equals("PK", "USER#404")]).build();

    let err = client.get(person, descriptor).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    assert_eq!(err.to_string(), "cannot get a item by key");
}

#[tokio::test]
async fn put_returns_written_record() {
    let (client, store) = client(MockStore::default());
    let sequence = Sequence::with_value(3);

    let written: Sequence = client
        .put(Sequence::new, put_descriptor(&sequence))
        .await
        .unwrap();
    assert_eq!(written, sequence);

    let calls = store.calls();
    let [Call::Put(sent)] = calls.as_slice() else {
        panic!("expected a single put");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(sent.item.get("PK"), Some(&Value::from("GLOBAL")));
    assert_eq!(sent.item.get("currentValue"), Some(&Value::from(3)));
}

#[tokio::test]
async fn update_hydrates_returned_attributes() {
    let attributes = HashMap::from([
        ("PK".to_string(), AttributeValue::S("GLOBAL".to_string())),
        ("SK".to_string(), AttributeValue::S("SEQUENCE".to_string())),
        ("currentValue".to_string(), AttributeValue::N("8".to_string())),
    ]);
    let (client, store) = client(MockStore {
        attributes: Some(attributes),
        ..Default::default()
    });
    let key: AttributeMap = [
        ("PK".to_string(), Value::from(Sequence::PK)),
        ("SK".to_string(), Value::from(Sequence::SK)),
    ]
    .into_iter()
    .collect();
    let descriptor = UpdateDescriptor::new(key, "SET currentValue = currentValue + :inc")
        .bind(":inc", 1);

    let sequence = client.update(Sequence::new, descriptor).await.unwrap();
    assert_eq!(sequence.current_value(), Some(8));

    let calls = store.calls();
    let [Call::Update(sent)] = calls.as_slice() else {
        panic!("expected a single update");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(
        sent.expression_attribute_values.get(":inc"),
        Some(&Value::from(1))
    );
}

#[tokio::test]
async fn update_without_attributes_yields_blank_record() {
    let (client, _) = client(MockStore::default());
    let descriptor = UpdateDescriptor::new(AttributeMap::new(), "SET seen = :seen")
        .bind(":seen", true);

    let document = client.update(person, descriptor).await.unwrap();
    assert!(document.attributes().is_empty());
}

#[tokio::test]
async fn batch_get_discards_responses() {
    let (client, store) = client(MockStore {
        items: vec![item("USER#1", "PROFILE", "Ada")],
        ..Default::default()
    });
    let descriptor = BatchGetDescriptor {
        keys: vec![GetItemBuilder::new(vec![Condition::equals("PK", "USER#1")])
            .key()
            .clone()],
        ..Default::default()
    };

    let people = client.batch_get(person, descriptor).await.unwrap();
    assert!(people.is_empty());

    let calls = store.calls();
    let [Call::BatchGet(sent)] = calls.as_slice() else {
        panic!("expected a single batch get");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(sent.keys.len(), 1);
}

#[tokio::test]
async fn batch_write_reports_unprocessed_requests() {
    let (client, store) = client(MockStore {
        unprocessed: 2,
        ..Default::default()
    });
    let descriptor = BatchWriteDescriptor {
        requests: vec![
            put_request(&Sequence::with_value(1)),
            WriteRequest::Delete(GetItemBuilder::new(vec![Condition::equals("PK", "X")]).key().clone()),
        ],
        ..Default::default()
    };

    let unprocessed = client.batch_write(descriptor).await.unwrap();
    assert_eq!(unprocessed, 2);

    let calls = store.calls();
    let [Call::BatchWrite(sent)] = calls.as_slice() else {
        panic!("expected a single batch write");
    };
    assert_eq!(sent.table_name, "users");
    assert_eq!(sent.requests.len(), 2);
}

#[tokio::test]
async fn transactions_pass_through() {
    let (client, store) = client(MockStore {
        items: vec![item("USER#1", "PROFILE", "Ada")],
        ..Default::default()
    });

    let mut reads = TransactGetBatch::new("users");
    reads.put(GetItemBuilder::new(vec![Condition::equals("PK", "USER#1")]).build());
    let output = client.transact_get(reads.build()).await.unwrap();
    assert_eq!(output.responses().len(), 1);

    let mut writes = TransactWriteBatch::new("users");
    writes
        .put(put_descriptor(&Sequence::with_value(1)))
        .put(put_descriptor(&Sequence::with_value(2)));
    client.commit(writes.build()).await.unwrap();

    let calls = store.calls();
    let [Call::TransactGet(read), Call::TransactWrite(write)] = calls.as_slice() else {
        panic!("expected a transactional read then write");
    };
    assert_eq!(read.transact_items.len(), 1);
    assert_eq!(write.transact_items.len(), 2);
}

#[tokio::test]
async fn store_errors_are_forwarded() {
    let (client, _) = client(MockStore {
        fail: true,
        ..Default::default()
    });
    let descriptor = GetItemBuilder::new(vec![Condition::equals("PK", "USER#1")]).build();

    let err = client.get(person, descriptor).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Store(aws_sdk_dynamodb::Error::ResourceNotFoundException(_))
    ));
    assert!(!err.is_not_found());
}
