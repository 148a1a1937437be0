pub mod config;
pub mod constants;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
pub mod structs;
