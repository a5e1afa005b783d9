pub mod analyzers;
pub mod directive;
pub mod error;
pub mod output;
pub mod parser;
pub mod record;

pub use error::{Error, Result};
