//! course-service: CRUD HTTP API for the course catalog, backed by MongoDB.
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
