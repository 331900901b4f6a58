//! # Request Object Resolver module
//! Fetches, validates and merges [JWT secured authorization requests](https://www.rfc-editor.org/rfc/rfc9101).

mod josekit_processor;
mod request_object_resolver;

pub use josekit_processor::JosekitJwtProcessor;
pub use request_object_resolver::RequestObjectResolver;
