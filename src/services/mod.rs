// src/services/mod.rs

pub mod completion;
pub mod progress;
pub mod scorer;
pub mod shuffle;
