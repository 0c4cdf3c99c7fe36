//! Core editing state: buffer, persistence session, commands, configuration

pub mod buffer;
pub mod command;
pub mod config;
pub mod error;
pub mod session;
