pub mod header;
pub mod line;
pub mod page;

pub use header::parse_header;
pub use line::{parse_line, ParsedLine};
pub use page::extract_page;
