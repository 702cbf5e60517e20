//! Cardano Transaction Gateway Library
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                TRANSACTION GATEWAY                │
//!                     │                                                   │
//!   Build request     │  ┌─────────┐   ┌───────────┐   ┌──────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│    dsl    │──▶│   compiler   │  │
//!                     │  │ server  │   │ validator │   │  dispatcher  │  │
//!                     │  └─────────┘   └───────────┘   └──────┬───────┘  │
//!                     │       │                               │          │
//!                     │       ▼                               ▼          │
//!   Balance / UTXOs   │  ┌──────────┐   ┌───────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│providers │──▶│  balance  │   │ ledger SDK │  │
//!                     │  │readiness │   │aggregator │   │  adapter   │  │
//!                     │  └──────────┘   └───────────┘   └────────────┘  │
//!                     │                                                   │
//!                     │  ┌─────────────────────────────────────────────┐ │
//!                     │  │   config   │  observability  │ error model  │ │
//!                     │  └─────────────────────────────────────────────┘ │
//!                     └───────────────────────────────────────────────────┘
//! ```
//!
//! Every request resolves provider readiness fresh, validates its action
//! sequence before any network call, and either compiles the whole sequence
//! into one unsigned transaction or fails atomically.

pub mod balance;
pub mod compiler;
pub mod config;
pub mod dsl;
pub mod http;
pub mod observability;
pub mod providers;

pub use config::GatewayConfig;
pub use http::HttpServer;
