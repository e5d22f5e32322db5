pub mod analyzers;
pub mod cleaner;
pub mod dashboard;
pub mod graph;
pub mod loader;
pub mod output;
pub mod table;
