#![doc = "The `projectforge` library crate."]
#![doc = ""]
#![doc = "This crate contains all the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the ProjectForge"]
#![doc = "backend. It is used by the main binary (`main.rs`) to construct and run the"]
#![doc = "application, and by the integration tests to assemble an identical `App`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
