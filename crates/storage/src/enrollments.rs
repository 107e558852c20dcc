use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shared::domain::{Course, CourseNumber, Employee, EmployeeId};
use tracing::debug;

/// Links one employee to one course by identifier.
///
/// Holds no entity data; readers resolve both sides through
/// [`EntityStore`](crate::EntityStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub employee_id: EmployeeId,
    pub course_number: CourseNumber,
    pub enrolled_at: DateTime<Utc>,
}

/// Index of enrollments keyed by employee. At most one entry per employee.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentRegistry {
    enrollments: BTreeMap<EmployeeId, Enrollment>,
}

impl EnrollmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrolls `employee` in `course`, returning the enrollment it replaced.
    pub fn enroll(&mut self, employee: &Employee, course: &Course) -> Option<Enrollment> {
        let enrollment = Enrollment {
            employee_id: employee.id(),
            course_number: course.number(),
            enrolled_at: Utc::now(),
        };
        let previous = self.enrollments.insert(employee.id(), enrollment);
        if let Some(previous) = &previous {
            debug!(
                employee_id = %employee.id(),
                previous_course = %previous.course_number,
                course_number = %course.number(),
                "replaced existing enrollment"
            );
        }
        previous
    }

    pub fn lookup(&self, employee_id: EmployeeId) -> Option<&Enrollment> {
        self.enrollments.get(&employee_id)
    }

    pub fn all(&self) -> impl Iterator<Item = (EmployeeId, &Enrollment)> + '_ {
        self.enrollments.iter().map(|(id, enrollment)| (*id, enrollment))
    }

    /// Employees currently enrolled in `course_number`.
    pub fn enrolled_in(
        &self,
        course_number: CourseNumber,
    ) -> impl Iterator<Item = EmployeeId> + '_ {
        self.enrollments
            .values()
            .filter(move |enrollment| enrollment.course_number == course_number)
            .map(|enrollment| enrollment.employee_id)
    }

    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }

    pub fn cascade_remove_by_employee(&mut self, employee_id: EmployeeId) -> Option<Enrollment> {
        let removed = self.enrollments.remove(&employee_id);
        if removed.is_some() {
            debug!(%employee_id, "dropped enrollment for removed employee");
        }
        removed
    }

    /// The registry is keyed by employee, so this scans every entry.
    pub fn cascade_remove_by_course(&mut self, course_number: CourseNumber) -> Vec<Enrollment> {
        let mut removed = Vec::new();
        self.enrollments.retain(|_, enrollment| {
            if enrollment.course_number == course_number {
                removed.push(enrollment.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            debug!(
                %course_number,
                count = removed.len(),
                "dropped enrollments for removed course"
            );
        }
        removed
    }
}
