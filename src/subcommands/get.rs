use color_eyre::Result;
use simple_dynamo::SimpleClient;
use simple_dynamo::dynamodb::GetItemBuilder;
use simple_dynamo::expr::Condition;
use simple_dynamo::record::{PARTITION_KEY, SORT_KEY};

use super::{document_ctor, print_document};

#[derive(clap::Args, Debug)]
pub struct Options {
    /// Partition key value
    #[arg(long)]
    pub pk: String,

    /// Sort key value
    #[arg(long)]
    pub sk: String,

    /// Attribute to print besides the key; repeatable
    #[arg(long = "field", value_name = "NAME", action = clap::ArgAction::Append)]
    pub fields: Vec<String>,
}

pub async fn command(client: &SimpleClient, options: Options) -> Result<()> {
    let descriptor = GetItemBuilder::new(vec![
        Condition::equals(PARTITION_KEY, options.pk),
        Condition::equals(SORT_KEY, options.sk),
    ])
    .build();
    let document = client.get(document_ctor(options.fields), descriptor).await?;
    print_document(&document)
}
