// src/lib.rs

pub mod api;
pub mod config;
pub mod engine;
pub mod state;
pub mod store;
