//! # Rotakey API
//!
//! Actix-web surface of the Rotakey server: user signup and login, refresh
//! token rotation, logout and bearer-protected profile routes.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
