pub mod data;
pub mod settlement;
