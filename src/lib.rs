//! gemini-bridge - chat-completion compatible bridge to Gemini
//!
//! Accepts chat-completion style requests, forwards them to Gemini's
//! `generateContent` endpoint and translates the answer back. Upstream errors
//! are relayed unchanged.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod telemetry;
pub mod translate;
pub mod upstream;
