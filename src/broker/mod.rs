pub mod dead_letter;
pub mod engine;
pub mod filter;
pub mod message;
pub mod stats;
pub mod subscription;
pub mod topic;

pub use engine::{Limits, Simulator};
