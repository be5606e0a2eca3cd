mod common;
mod parse;

pub use common::*;
pub use parse::scan_header_boundary;
