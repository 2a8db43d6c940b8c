//! Assignment storage.
//!
//! The [`AssignmentStore`] trait is the seam between the payroll core and
//! wherever submitted assignments live. The crate ships an in-memory
//! implementation; the calculator behaves the same whatever backs it.

mod memory;

pub use memory::InMemoryAssignmentStore;

use uuid::Uuid;

use crate::error::PayrollResult;
use crate::models::{Assignment, AssignmentStatus, NewAssignment, PayPeriod};

/// Filter for listing assignments across employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    /// Only this employee.
    pub employee_id: Option<String>,
    /// Only days inside this period.
    pub period: Option<PayPeriod>,
    /// Only this review status.
    pub status: Option<AssignmentStatus>,
}

impl AssignmentFilter {
    /// Returns true if `assignment` passes every set criterion.
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| assignment.employee_id == id)
            && self
                .period
                .is_none_or(|period| period.contains_date(assignment.date))
            && self.status.is_none_or(|status| assignment.status == status)
    }
}

/// Create, list and review operations on assignment records.
pub trait AssignmentStore: Send + Sync {
    /// Stores a new pending assignment.
    fn create(&self, new: NewAssignment) -> PayrollResult<Assignment>;

    /// Lists one employee's assignments inside `period`, ordered by date
    /// and then submission order.
    fn list(&self, employee_id: &str, period: &PayPeriod) -> PayrollResult<Vec<Assignment>>;

    /// Lists assignments matching `filter`, in the same order as [`list`](Self::list).
    fn list_all(&self, filter: &AssignmentFilter) -> PayrollResult<Vec<Assignment>>;

    /// Fetches one assignment.
    fn get(&self, id: Uuid) -> PayrollResult<Assignment>;

    /// Moves an assignment to a new review status.
    fn update_status(
        &self,
        id: Uuid,
        status: AssignmentStatus,
        reviewer: &str,
    ) -> PayrollResult<Assignment>;
}
