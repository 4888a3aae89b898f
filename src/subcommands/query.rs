use color_eyre::Result;
use simple_dynamo::SimpleClient;
use simple_dynamo::dynamodb::QueryBuilder;
use simple_dynamo::expr::{Condition, KeyExpression};
use simple_dynamo::record::{PARTITION_KEY, SORT_KEY};

use super::{document_ctor, print_document};

#[derive(clap::Args, Debug)]
pub struct Options {
    /// Partition key value
    #[arg(long)]
    pub pk: String,

    /// Only return items whose sort key starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub sk_prefix: Option<String>,

    /// Query a secondary index instead of the table
    #[arg(long, value_name = "NAME")]
    pub index: Option<String>,

    /// Attribute to print besides the key; repeatable
    #[arg(long = "field", value_name = "NAME", action = clap::ArgAction::Append)]
    pub fields: Vec<String>,
}

fn key_expression(options: &Options) -> KeyExpression {
    let mut conditions = vec![Condition::equals(PARTITION_KEY, options.pk.as_str())];
    if let Some(prefix) = &options.sk_prefix {
        conditions.push(Condition::begins_with(SORT_KEY, prefix.as_str()));
    }
    match &options.index {
        Some(index) => KeyExpression::on_index(index.as_str(), conditions),
        None => KeyExpression::new(conditions),
    }
}

pub async fn command(client: &SimpleClient, options: Options) -> Result<()> {
    let descriptor = QueryBuilder::new(key_expression(&options)).build();
    tracing::debug!(
        key_condition = %descriptor.key_condition_expression,
        index = ?descriptor.index_name,
        "Running query"
    );
    let documents = client.query(document_ctor(options.fields), descriptor).await?;
    if documents.is_empty() {
        eprintln!("No items found");
    }
    for document in &documents {
        print_document(document)?;
    }
    Ok(())
}
