pub mod catalog;
pub mod check;
pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod operations;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod templates;
