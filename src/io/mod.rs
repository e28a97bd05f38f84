mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{is_empty_document, parse_document_str};
pub use output::{Io, to_pretty_json};
