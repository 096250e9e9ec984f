// The library holds the whole program so integration tests and criterion
// benchmarks can reach it as `vocabdr::*`; main.rs only wires up the terminal.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod ui;
pub mod vocab;
