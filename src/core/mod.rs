pub mod cache;
pub mod distance;
pub mod engine;
pub mod flow;
pub mod lexicon;
pub mod matcher;
pub mod phonetics;
pub mod types;
