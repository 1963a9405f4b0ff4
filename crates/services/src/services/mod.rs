pub mod extract;
pub mod gemini;
pub mod generation;
pub mod graph;
pub mod images;
pub mod prompt;
pub mod rules;
pub mod store;
pub mod transform;
