pub mod runner;
pub mod event;

pub use runner::{run, LoopConfig, Sample};
