pub mod parse;
pub mod suppliers;
