use color_eyre::Result;
use simple_dynamo::dynamodb::{from_json_string, is_json, make_put_descriptor};
use simple_dynamo::{Document, SimpleClient};

use super::print_document;

#[derive(clap::Args, Debug)]
pub struct Options {
    /// Item as a JSON object; must contain PK and SK
    #[arg(long, value_name = "JSON")]
    pub item: String,
}

pub async fn command(client: &SimpleClient, options: Options) -> Result<()> {
    is_json(&options.item)?;
    let item = from_json_string(&options.item)?;
    let descriptor = make_put_descriptor(&item);
    let field_names: Vec<String> = item.keys().map(str::to_string).collect();

    let document = client
        .put(move || Document::new(field_names.iter().cloned()), descriptor)
        .await?;
    print_document(&document)
}
