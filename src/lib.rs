pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod handlers;
pub mod leads;
pub mod middleware;
pub mod services;
pub mod uploads;
pub mod validation;
