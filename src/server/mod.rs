//! Server-side API backend and business logic.
//!
//! This module contains the complete backend of the guild cloner: HTTP endpoints,
//! the clone pipeline, Discord REST access and supporting infrastructure. The backend
//! uses Axum as the web framework and Serenity's HTTP client for Discord calls.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Clone pipeline stages and their orchestration
//! - **Data Layer** (`data/`) - Discord REST calls, retry policy and Serenity-to-domain conversion
//! - **Model Layer** (`model/`) - Domain models, request payloads and the clone report
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (config, HTTP client, shutdown token)
//! - **Startup** (`startup`) - HTTP client, listener and shutdown signal setup
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Controller** validates parameters and builds a Discord client for the bot token
//! 3. **Service** authorizes the caller, then runs the pipeline stages
//! 4. **Data** performs each Discord call with retries and returns domain models
//! 5. **Controller** renders the `CloneReport` into the response DTO

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
