//! Command implementations for colconv-cmd

pub mod decode;
pub mod types;
