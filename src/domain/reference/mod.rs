//! Scripture references and the book tables they resolve against.

mod catalog;
mod parse;

pub use catalog::BookCatalog;
pub use parse::ScriptureReference;
