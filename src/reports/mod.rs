mod aggregate;
mod parser;

pub use aggregate::aggregate;
pub use parser::{is_status_report, parse_report};
