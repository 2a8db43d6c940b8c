//! Wijk payroll engine for delivery staff.
//!
//! This crate prices delivery zone ("wijk") assignments by segment count,
//! adds a per-kilometer trip allowance for worked days, and aggregates the
//! results into daily records, period summaries and manager overviews. An
//! axum API exposes the calculations behind a role-gated login.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
