pub mod api;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod models;
pub mod review;
pub mod session;
pub mod stage;
pub mod tally;
pub mod utils;
pub mod view;
