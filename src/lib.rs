pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
pub mod views;
