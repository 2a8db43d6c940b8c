//! HTTP API module for the wijk payroll engine.
//!
//! This module provides the REST endpoints for logging in, viewing daily
//! and period earnings, the manager overview, and submitting and reviewing
//! zone assignments.

mod context;
mod handlers;
mod menu;
mod request;
mod response;
mod state;

pub use context::RequestContext;
pub use handlers::create_router;
pub use menu::{MenuItem, menu_for};
pub use request::{
    AssignmentQuery, LoginRequest, OverviewQuery, RangeQuery, SubmitAssignmentRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, DayRecordView, DisplayAmounts, LoginResponse, PeriodSummaryView,
};
pub use state::{AppState, ScheduleSource};
