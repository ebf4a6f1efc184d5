//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (Discord) layer. Services are responsible for:
//!
//! - **Business Logic**: Ownership checks, `@everyone` protection, payload construction
//! - **Orchestration**: Running clone stages in order with bounded concurrency
//! - **Domain Models**: Working with domain models rather than DTOs or Serenity models

pub mod clone;
