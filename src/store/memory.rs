//! In-memory assignment store backed by a concurrent map.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Assignment, AssignmentStatus, NewAssignment, PayPeriod};

use super::{AssignmentFilter, AssignmentStore};

struct StoredAssignment {
    seq: u64,
    assignment: Assignment,
}

/// Keeps assignments in a [`DashMap`] for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryAssignmentStore {
    rows: DashMap<Uuid, StoredAssignment>,
    next_seq: AtomicU64,
}

impl InMemoryAssignmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assignments.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing has been submitted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn collect(&self, filter: &AssignmentFilter) -> Vec<Assignment> {
        let mut rows: Vec<(u64, Assignment)> = self
            .rows
            .iter()
            .filter(|entry| filter.matches(&entry.assignment))
            .map(|entry| (entry.seq, entry.assignment.clone()))
            .collect();
        rows.sort_by_key(|(seq, assignment)| (assignment.date, *seq));
        rows.into_iter().map(|(_, assignment)| assignment).collect()
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn create(&self, new: NewAssignment) -> PayrollResult<Assignment> {
        if new.employee_id.trim().is_empty() {
            return Err(PayrollError::validation("employee_id", "must not be empty"));
        }
        if new.zone.trim().is_empty() {
            return Err(PayrollError::validation("zone", "must not be empty"));
        }

        let assignment = Assignment::submit(new, Utc::now());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(
            assignment.id,
            StoredAssignment {
                seq,
                assignment: assignment.clone(),
            },
        );

        info!(
            assignment_id = %assignment.id,
            employee_id = %assignment.employee_id,
            zone = %assignment.zone,
            date = %assignment.date,
            "Assignment submitted"
        );
        Ok(assignment)
    }

    fn list(&self, employee_id: &str, period: &PayPeriod) -> PayrollResult<Vec<Assignment>> {
        Ok(self.collect(&AssignmentFilter {
            employee_id: Some(employee_id.to_string()),
            period: Some(*period),
            status: None,
        }))
    }

    fn list_all(&self, filter: &AssignmentFilter) -> PayrollResult<Vec<Assignment>> {
        Ok(self.collect(filter))
    }

    fn get(&self, id: Uuid) -> PayrollResult<Assignment> {
        self.rows
            .get(&id)
            .map(|entry| entry.assignment.clone())
            .ok_or(PayrollError::AssignmentNotFound { id })
    }

    fn update_status(
        &self,
        id: Uuid,
        status: AssignmentStatus,
        reviewer: &str,
    ) -> PayrollResult<Assignment> {
        let mut entry = self
            .rows
            .get_mut(&id)
            .ok_or(PayrollError::AssignmentNotFound { id })?;
        entry.assignment.transition(status, reviewer, Utc::now())?;

        info!(
            assignment_id = %id,
            status = %status,
            reviewer,
            "Assignment reviewed"
        );
        Ok(entry.assignment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn submission(employee: &str, day: u32, zone: &str) -> NewAssignment {
        NewAssignment {
            date: date(day),
            employee_id: employee.to_string(),
            zone: zone.to_string(),
            segments: None,
        }
    }

    #[test]
    fn test_create_stores_pending_assignment() {
        let store = InMemoryAssignmentStore::new();
        let created = store.create(submission("hossein", 3, "Chaam1")).unwrap();

        assert_eq!(created.status, AssignmentStatus::Pending);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(created.id).unwrap(), created);
    }

    #[test]
    fn test_create_rejects_blank_zone() {
        let store = InMemoryAssignmentStore::new();
        let result = store.create(submission("hossein", 3, "  "));
        assert!(matches!(result, Err(PayrollError::ValidationError { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_filters_by_employee_and_period() {
        let store = InMemoryAssignmentStore::new();
        store.create(submission("hossein", 3, "Chaam1")).unwrap();
        store.create(submission("hossein", 4, "Chaam4")).unwrap();
        store.create(submission("hossein", 20, "Galder1")).unwrap();
        store.create(submission("masoud", 3, "Rotterdam1")).unwrap();

        let rows = store
            .list("hossein", &PayPeriod::new(date(1), date(13)))
            .unwrap();
        let zones: Vec<&str> = rows.iter().map(|a| a.zone.as_str()).collect();
        assert_eq!(zones, vec!["Chaam1", "Chaam4"]);
    }

    #[test]
    fn test_list_orders_by_date_then_submission() {
        let store = InMemoryAssignmentStore::new();
        store.create(submission("hossein", 4, "Chaam4")).unwrap();
        store.create(submission("hossein", 3, "Galder1")).unwrap();
        store.create(submission("hossein", 3, "Chaam1")).unwrap();

        let rows = store
            .list("hossein", &PayPeriod::new(date(1), date(13)))
            .unwrap();
        let zones: Vec<&str> = rows.iter().map(|a| a.zone.as_str()).collect();
        assert_eq!(zones, vec!["Galder1", "Chaam1", "Chaam4"]);
    }

    #[test]
    fn test_list_empty_range_returns_nothing() {
        let store = InMemoryAssignmentStore::new();
        store.create(submission("hossein", 3, "Chaam1")).unwrap();

        let rows = store
            .list("hossein", &PayPeriod::new(date(13), date(1)))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_list_all_by_status() {
        let store = InMemoryAssignmentStore::new();
        let first = store.create(submission("hossein", 3, "Chaam1")).unwrap();
        store.create(submission("masoud", 3, "Rotterdam1")).unwrap();
        store
            .update_status(first.id, AssignmentStatus::Approved, "manager")
            .unwrap();

        let pending = store
            .list_all(&AssignmentFilter {
                status: Some(AssignmentStatus::Pending),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].employee_id, "masoud");
    }

    #[test]
    fn test_update_status_records_reviewer() {
        let store = InMemoryAssignmentStore::new();
        let created = store.create(submission("hossein", 3, "Chaam1")).unwrap();

        let reviewed = store
            .update_status(created.id, AssignmentStatus::Rejected, "manager")
            .unwrap();
        assert_eq!(reviewed.status, AssignmentStatus::Rejected);
        assert_eq!(reviewed.reviewed_by.as_deref(), Some("manager"));
        assert_eq!(store.get(created.id).unwrap().status, AssignmentStatus::Rejected);
    }

    #[test]
    fn test_update_status_twice_fails() {
        let store = InMemoryAssignmentStore::new();
        let created = store.create(submission("hossein", 3, "Chaam1")).unwrap();
        store
            .update_status(created.id, AssignmentStatus::Approved, "manager")
            .unwrap();

        let result = store.update_status(created.id, AssignmentStatus::Rejected, "manager");
        assert!(matches!(result, Err(PayrollError::InvalidTransition { .. })));
        assert_eq!(store.get(created.id).unwrap().status, AssignmentStatus::Approved);
    }

    #[test]
    fn test_unknown_id_not_found() {
        let store = InMemoryAssignmentStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.get(id),
            Err(PayrollError::AssignmentNotFound { .. })
        ));
        assert!(matches!(
            store.update_status(id, AssignmentStatus::Approved, "manager"),
            Err(PayrollError::AssignmentNotFound { .. })
        ));
    }

    #[test]
    fn test_concurrent_submissions() {
        let store = Arc::new(InMemoryAssignmentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for day in 1..=10 {
                        store
                            .create(submission(&format!("emp_{}", i), day, "Chaam1"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 80);
    }
}
