pub mod brief;
pub mod document;
pub mod graph;
pub mod page;
pub mod vocabulary;
