use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseNumber, Employee, EmployeeId};

/// An enrollment resolved against the live employee and course records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentView {
    pub employee: Employee,
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
}

impl EnrollmentView {
    pub fn employee_id(&self) -> EmployeeId {
        self.employee.id()
    }

    pub fn course_number(&self) -> CourseNumber {
        self.course.number()
    }

    pub fn performance(&self) -> i64 {
        self.employee.performance()
    }
}

/// One line of the employee performance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub employee_name: String,
    pub position: String,
    pub department: String,
    pub employee_id: EmployeeId,
    pub course_title: String,
    pub course_description: String,
    pub instructor: String,
    pub course_number: CourseNumber,
    pub performance: i64,
    pub enrolled_at: DateTime<Utc>,
}

impl From<&EnrollmentView> for ReportRow {
    fn from(view: &EnrollmentView) -> Self {
        Self {
            employee_name: view.employee.name().to_string(),
            position: view.employee.position().to_string(),
            department: view.employee.department().to_string(),
            employee_id: view.employee.id(),
            course_title: view.course.title().to_string(),
            course_description: view.course.description().to_string(),
            instructor: view.course.instructor().to_string(),
            course_number: view.course.number(),
            performance: view.employee.performance(),
            enrolled_at: view.enrolled_at,
        }
    }
}
