pub mod debug;
pub mod descriptor;
pub mod json;
pub mod query;
pub mod request_builder;
pub mod store;
pub mod transaction;

pub use debug::send_dynamo_request;
pub use descriptor::*;
pub use json::*;
pub use query::*;
pub use request_builder::*;
pub use store::*;
pub use transaction::*;
