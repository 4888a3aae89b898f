pub mod aws;
pub mod client;
pub mod dynamodb;
pub mod error;
pub mod expr;
pub mod record;
pub mod util;
pub mod value;

pub use client::SimpleClient;
pub use error::{Error, Result};
pub use record::{Document, Record, Sequence};
pub use value::{AttributeMap, Value};
