#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod prompt;
pub mod signals;
