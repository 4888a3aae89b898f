pub mod get;
pub mod put;
pub mod query;

use color_eyre::Result;
use simple_dynamo::Document;
use simple_dynamo::dynamodb::to_json_string;

/// Constructor for records declaring the key plus every `--field`.
fn document_ctor(fields: Vec<String>) -> impl Fn() -> Document {
    move || Document::new(fields.iter().cloned())
}

fn print_document(document: &Document) -> Result<()> {
    println!("{}", to_json_string(document.attributes())?);
    Ok(())
}
