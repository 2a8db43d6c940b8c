//! Assignment model and review workflow.
//!
//! An assignment records that an employee worked a zone on a date. Every
//! submission starts out pending and is approved or rejected once by a
//! reviewer. The review status is metadata only and never changes the
//! earnings arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

use super::WorkedZone;

/// Review status of a submitted assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Accepted by a reviewer. Terminal.
    Approved,
    /// Refused by a reviewer. Terminal.
    Rejected,
}

impl AssignmentStatus {
    /// Returns true for statuses with no outgoing transition.
    pub fn is_terminal(self) -> bool {
        !matches!(self, AssignmentStatus::Pending)
    }

    /// Returns true if the workflow allows moving from `self` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wijk_payroll::models::AssignmentStatus;
    ///
    /// assert!(AssignmentStatus::Pending.can_transition_to(AssignmentStatus::Approved));
    /// assert!(!AssignmentStatus::Approved.can_transition_to(AssignmentStatus::Rejected));
    /// ```
    pub fn can_transition_to(self, target: AssignmentStatus) -> bool {
        matches!(
            (self, target),
            (AssignmentStatus::Pending, AssignmentStatus::Approved)
                | (AssignmentStatus::Pending, AssignmentStatus::Rejected)
        )
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "pending"),
            AssignmentStatus::Approved => write!(f, "approved"),
            AssignmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "approved" => Ok(AssignmentStatus::Approved),
            "rejected" => Ok(AssignmentStatus::Rejected),
            other => Err(PayrollError::validation(
                "status",
                format!("unknown assignment status '{}'", other),
            )),
        }
    }
}

/// Input for a new assignment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    /// The day the zone was worked.
    pub date: NaiveDate,
    /// The employee who worked it.
    pub employee_id: String,
    /// Zone name.
    pub zone: String,
    /// Segment count for zones outside the catalog.
    #[serde(default)]
    pub segments: Option<u32>,
}

/// A stored assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier.
    pub id: Uuid,
    /// The day the zone was worked.
    pub date: NaiveDate,
    /// The employee who worked it.
    pub employee_id: String,
    /// Zone name.
    pub zone: String,
    /// Segment count entered with the submission.
    pub segments: Option<u32>,
    /// Review status.
    pub status: AssignmentStatus,
    /// When the submission was stored.
    pub submitted_at: DateTime<Utc>,
    /// Who reviewed it.
    pub reviewed_by: Option<String>,
    /// When it was reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Creates a pending assignment from a submission.
    pub fn submit(new: NewAssignment, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: new.date,
            employee_id: new.employee_id,
            zone: new.zone,
            segments: new.segments,
            status: AssignmentStatus::Pending,
            submitted_at,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    /// Moves the assignment to `target`, recording the reviewer.
    ///
    /// Fails with [`PayrollError::InvalidTransition`] unless the assignment
    /// is pending and `target` is approved or rejected.
    pub fn transition(
        &mut self,
        target: AssignmentStatus,
        reviewer: &str,
        at: DateTime<Utc>,
    ) -> PayrollResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(PayrollError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.reviewed_by = Some(reviewer.to_string());
        self.reviewed_at = Some(at);
        Ok(())
    }

    /// The zone as seen by the calculator.
    pub fn worked_zone(&self) -> WorkedZone {
        WorkedZone {
            name: self.zone.clone(),
            segments: self.segments,
        }
    }
}
