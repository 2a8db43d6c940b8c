//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_day, calculate_overview, calculate_period_summary};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Assignment, AssignmentStatus, Employee, EmployeeOverview, NewAssignment, PayPeriod, Role,
};
use crate::store::AssignmentFilter;

use super::context::RequestContext;
use super::menu::{MenuItem, menu_for};
use super::request::{
    AssignmentQuery, LoginRequest, OverviewQuery, RangeQuery, SubmitAssignmentRequest,
};
use super::response::{ApiErrorResponse, DayRecordView, LoginResponse, PeriodSummaryView};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/menu", get(menu_handler))
        .route("/employees", get(list_employees_handler))
        .route("/employees/:id/days", get(period_handler))
        .route("/employees/:id/days/:date", get(day_handler))
        .route("/overview", get(overview_handler))
        .route(
            "/assignments",
            post(submit_assignment_handler).get(list_assignments_handler),
        )
        .route("/assignments/:id/approve", post(approve_handler))
        .route("/assignments/:id/reject", post(reject_handler))
        .with_state(state)
}

/// Handler for POST /login.
///
/// Verifies the password and issues a bearer token for the employee.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload?;

    let verifier = state.clone();
    let (username, password) = (request.username.clone(), request.password);
    let verified =
        run_blocking(move || verifier.credentials().verify(&username, &password)).await?;
    let employee = match state.config().config().employee(&request.username) {
        Some(employee) if verified => employee.clone(),
        _ => {
            warn!(
                correlation_id = %correlation_id,
                username = %request.username,
                "Login rejected"
            );
            return Err(PayrollError::Unauthorized {
                message: "invalid username or password".to_string(),
            }
            .into());
        }
    };

    let token = state.sessions().issue(&employee.id);
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        role = %employee.role,
        "Login succeeded"
    );
    Ok(Json(LoginResponse {
        token,
        menu: menu_for(employee.role),
        employee,
    }))
}

/// Handler for POST /logout.
async fn logout_handler(State(state): State<AppState>, ctx: RequestContext) -> StatusCode {
    state.sessions().revoke(&ctx.token);
    info!(
        correlation_id = %ctx.correlation_id,
        employee_id = %ctx.employee.id,
        "Logged out"
    );
    StatusCode::NO_CONTENT
}

/// Handler for GET /menu.
async fn menu_handler(ctx: RequestContext) -> Json<Vec<MenuItem>> {
    Json(menu_for(ctx.employee.role))
}

/// Handler for GET /employees. Lists the employees the caller may view.
async fn list_employees_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Json<Vec<Employee>> {
    let visible = state
        .config()
        .config()
        .employees()
        .filter(|employee| ctx.employee.can_view(employee))
        .cloned()
        .collect();
    Json(visible)
}

/// Handler for GET /employees/:id/days/:date.
async fn day_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((employee_id, date)): Path<(String, String)>,
) -> ApiResult<Json<DayRecordView>> {
    let date = parse_date(&date)?;
    let employee = viewable_employee(&state, &ctx, &employee_id)?;

    let record = calculate_day(
        employee,
        date,
        &PayPeriod::single_day(date),
        state.resolver(),
        state.config().config(),
    )
    .inspect_err(|err| log_failure(&ctx, err))?;

    info!(
        correlation_id = %ctx.correlation_id,
        employee_id = %employee.id,
        date = %date,
        total = %record.total,
        "Day calculated"
    );
    Ok(Json(record.into()))
}

/// Handler for GET /employees/:id/days?start=&end=.
async fn period_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(employee_id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<PeriodSummaryView>> {
    let Query(range) = query?;
    let period = range.period()?;
    let employee = viewable_employee(&state, &ctx, &employee_id)?.clone();

    let start_time = Instant::now();
    let worker = state.clone();
    let summary = run_blocking(move || {
        calculate_period_summary(
            &employee,
            &period,
            worker.resolver(),
            worker.config().config(),
        )
    })
    .await
    .inspect_err(|err| log_failure(&ctx, err))?;

    info!(
        correlation_id = %ctx.correlation_id,
        employee_id = %summary.employee_id,
        days = summary.days.len(),
        total = %summary.totals.total,
        duration_us = start_time.elapsed().as_micros(),
        "Period calculated"
    );
    Ok(Json(summary.into()))
}

/// Handler for GET /overview?start=&end=&employees=.
///
/// Managers and admins only. Without an `employees` list the overview
/// covers everyone the caller may view.
async fn overview_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<OverviewQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeOverview>>> {
    let Query(query) = query?;
    if ctx.employee.role == Role::Employee {
        return Err(PayrollError::Forbidden {
            message: "the overview is for managers and admins".to_string(),
        }
        .into());
    }
    let period = query.period()?;

    let employees: Vec<Employee> = match query.employee_ids() {
        Some(ids) => ids
            .iter()
            .map(|id| viewable_employee(&state, &ctx, id).cloned())
            .collect::<PayrollResult<_>>()?,
        None => state
            .config()
            .config()
            .employees()
            .filter(|employee| ctx.employee.can_view(employee))
            .cloned()
            .collect(),
    };

    let worker = state.clone();
    let rows = run_blocking(move || {
        calculate_overview(
            &employees,
            &period,
            worker.resolver(),
            worker.config().config(),
        )
    })
    .await
    .inspect_err(|err| log_failure(&ctx, err))?;

    info!(
        correlation_id = %ctx.correlation_id,
        employees = rows.len(),
        start = %query.start,
        end = %query.end,
        "Overview calculated"
    );
    Ok(Json(rows))
}

/// Handler for POST /assignments.
///
/// Employees submit for themselves; admins may submit for anyone.
async fn submit_assignment_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<SubmitAssignmentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    let Json(request) = payload?;

    let employee_id = request
        .employee_id
        .unwrap_or_else(|| ctx.employee.id.clone());
    if employee_id != ctx.employee.id && ctx.employee.role != Role::Admin {
        return Err(PayrollError::Forbidden {
            message: format!("{} may not submit for {}", ctx.employee.id, employee_id),
        }
        .into());
    }
    state.config().get_employee(&employee_id)?;

    let zone = request.zone.trim().to_string();
    if request.segments == Some(0) {
        return Err(PayrollError::validation("segments", "must be at least 1").into());
    }
    let config = state.config().config();
    if config.zone(&zone).is_none()
        && config
            .settings()
            .ad_hoc_segments
            .resolve(request.segments)
            .is_none()
    {
        return Err(PayrollError::validation(
            "segments",
            format!("zone '{}' is not in the catalog; enter a segment count", zone),
        )
        .into());
    }

    let assignment = state
        .store()
        .create(NewAssignment {
            date: request.date,
            employee_id,
            zone,
            segments: request.segments,
        })
        .inspect_err(|err| log_failure(&ctx, err))?;

    info!(
        correlation_id = %ctx.correlation_id,
        assignment_id = %assignment.id,
        submitted_by = %ctx.employee.id,
        "Assignment submitted"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Handler for GET /assignments?employee=&start=&end=&status=.
async fn list_assignments_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<AssignmentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Assignment>>> {
    let Query(query) = query?;
    if let Some(id) = query.employee.as_deref() {
        viewable_employee(&state, &ctx, id)?;
    }

    let filter = AssignmentFilter {
        employee_id: query.employee.clone(),
        period: query.period()?,
        status: query.status()?,
    };
    let config = state.config().config();
    let rows: Vec<Assignment> = state
        .store()
        .list_all(&filter)?
        .into_iter()
        .filter(|row| {
            config
                .employee(&row.employee_id)
                .is_some_and(|owner| ctx.employee.can_view(owner))
        })
        .collect();

    info!(
        correlation_id = %ctx.correlation_id,
        rows = rows.len(),
        "Assignments listed"
    );
    Ok(Json(rows))
}

/// Handler for POST /assignments/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<Assignment>> {
    review(&state, &ctx, &id, AssignmentStatus::Approved)
}

/// Handler for POST /assignments/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<Assignment>> {
    review(&state, &ctx, &id, AssignmentStatus::Rejected)
}

fn review(
    state: &AppState,
    ctx: &RequestContext,
    id: &str,
    status: AssignmentStatus,
) -> ApiResult<Json<Assignment>> {
    let id = Uuid::parse_str(id)
        .map_err(|_| PayrollError::validation("id", format!("'{}' is not a valid id", id)))?;
    let current = state.store().get(id)?;
    let owner = state.config().get_employee(&current.employee_id)?;
    ctx.ensure_can_review(owner)?;

    let updated = state
        .store()
        .update_status(id, status, &ctx.employee.id)
        .inspect_err(|err| log_failure(ctx, err))?;

    info!(
        correlation_id = %ctx.correlation_id,
        assignment_id = %id,
        status = %updated.status,
        reviewer = %ctx.employee.id,
        "Assignment reviewed"
    );
    Ok(Json(updated))
}

/// Runs CPU-bound work (password hashing, multi-day calculations) off the
/// async workers.
async fn run_blocking<T, F>(task: F) -> PayrollResult<T>
where
    F: FnOnce() -> PayrollResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| PayrollError::TaskFailed {
            message: err.to_string(),
        })?
}

/// Looks up `id` and checks the caller may view it.
fn viewable_employee<'a>(
    state: &'a AppState,
    ctx: &RequestContext,
    id: &str,
) -> PayrollResult<&'a Employee> {
    let employee = state.config().get_employee(id)?;
    ctx.ensure_can_view(employee)?;
    Ok(employee)
}

fn parse_date(raw: &str) -> PayrollResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| PayrollError::validation("date", format!("'{}' is not a YYYY-MM-DD date", raw)))
}

fn log_failure(ctx: &RequestContext, err: &PayrollError) {
    warn!(
        correlation_id = %ctx.correlation_id,
        error = %err,
        "Request failed"
    );
}
