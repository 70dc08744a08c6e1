// src/lib.rs

#[macro_use]
pub mod macros;

pub mod ast;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod log;
pub mod parse;
pub mod scrape;
