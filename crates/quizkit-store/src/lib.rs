//! quizkit-store — Exercise store implementations.
//!
//! Implements the `ExerciseStore` trait over an in-memory map and over TOML
//! exercise banks, and loads the quizkit configuration file.

pub mod bank;
pub mod config;
pub mod memory;

pub use bank::BankStore;
pub use config::{load_config, load_config_from, QuizkitConfig};
pub use memory::InMemoryStore;
