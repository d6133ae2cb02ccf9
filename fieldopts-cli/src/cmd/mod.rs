pub mod describe;
pub mod graph;
pub mod migrate;
pub mod providers;
pub mod resolve;
pub mod validate;
