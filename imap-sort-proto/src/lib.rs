pub mod builders;
mod error;
mod helpers;
pub mod parser;
pub mod types;

pub use crate::builders::command::{Command, CommandBuilder, SortCommandBuilder, SortRequest};
pub use crate::error::Error;
pub use crate::helpers::is_ascii;
pub use crate::parser::{parse_response, ParseResult};
pub use crate::types::*;
