pub mod chain;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod schema;
pub mod wallet;
