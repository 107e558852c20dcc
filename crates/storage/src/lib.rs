use std::collections::{btree_map::Entry, BTreeMap};

use shared::{
    domain::{Course, CourseNumber, Employee, EmployeeId, RecordKind},
    error::CatalogError,
};
use tracing::debug;

mod enrollments;

pub use enrollments::{Enrollment, EnrollmentRegistry};

/// Authoritative owner of every live course and employee.
///
/// Removal takes the [`EnrollmentRegistry`] so dependent enrollments are
/// dropped before the record they point at.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    courses: BTreeMap<CourseNumber, Course>,
    employees: BTreeMap<EmployeeId, Employee>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&mut self, course: Course) -> Result<(), CatalogError> {
        match self.courses.entry(course.number()) {
            Entry::Occupied(_) => Err(CatalogError::duplicate(RecordKind::Course, course.number())),
            Entry::Vacant(slot) => {
                debug!(course_number = %course.number(), "course stored");
                slot.insert(course);
                Ok(())
            }
        }
    }

    pub fn add_employee(&mut self, employee: Employee) -> Result<(), CatalogError> {
        match self.employees.entry(employee.id()) {
            Entry::Occupied(_) => Err(CatalogError::duplicate(
                RecordKind::Employee,
                employee.id(),
            )),
            Entry::Vacant(slot) => {
                debug!(employee_id = %employee.id(), "employee stored");
                slot.insert(employee);
                Ok(())
            }
        }
    }

    pub fn find_course(&self, number: CourseNumber) -> Option<&Course> {
        self.courses.get(&number)
    }

    pub fn find_employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.employees.values()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Enrolls an employee in a course and records their performance.
    ///
    /// Both sides are resolved before anything is written, so a failure
    /// leaves the registry and the score as they were. The employee is
    /// checked first.
    pub fn enroll(
        &mut self,
        employee_id: EmployeeId,
        course_number: CourseNumber,
        performance: i64,
        enrollments: &mut EnrollmentRegistry,
    ) -> Result<Option<Enrollment>, CatalogError> {
        let employee = self
            .employees
            .get_mut(&employee_id)
            .ok_or_else(|| CatalogError::entity_not_found(RecordKind::Employee, employee_id))?;
        let course = self
            .courses
            .get(&course_number)
            .ok_or_else(|| CatalogError::entity_not_found(RecordKind::Course, course_number))?;

        let previous = enrollments.enroll(employee, course);
        employee.set_performance(performance);
        Ok(previous)
    }

    pub fn remove_course(
        &mut self,
        number: CourseNumber,
        enrollments: &mut EnrollmentRegistry,
    ) -> Result<Course, CatalogError> {
        if !self.courses.contains_key(&number) {
            return Err(CatalogError::not_found(RecordKind::Course, number));
        }
        enrollments.cascade_remove_by_course(number);
        self.courses
            .remove(&number)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Course, number))
    }

    pub fn remove_employee(
        &mut self,
        id: EmployeeId,
        enrollments: &mut EnrollmentRegistry,
    ) -> Result<Employee, CatalogError> {
        if !self.employees.contains_key(&id) {
            return Err(CatalogError::not_found(RecordKind::Employee, id));
        }
        enrollments.cascade_remove_by_employee(id);
        self.employees
            .remove(&id)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Employee, id))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
