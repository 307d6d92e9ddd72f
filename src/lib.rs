//! wordbank - vocabulary service for word games
//!
//! A versioned REST API over a document store of words, with category and
//! length filters, search, random selection and an opt-in switch for
//! endpoints that mutate data.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;
