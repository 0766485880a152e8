pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod exit;
pub mod filter;
pub mod metrics;
pub mod perm;
pub mod report;
pub mod state;
pub mod store;
pub mod tui;
pub mod ui;
