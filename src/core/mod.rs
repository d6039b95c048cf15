//! Configuration and data types shared by the relay and its trigger adapter.

pub mod config;
pub mod models;
