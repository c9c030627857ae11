pub mod commands;
pub mod config;
pub mod errors;
pub mod ident;
pub mod sweeper;
pub mod task;
pub mod usecase;
