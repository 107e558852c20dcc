use shared::{
    domain::{Course, CourseNumber, Employee, EmployeeId, RecordKind},
    error::CatalogError,
    view::{EnrollmentView, ReportRow},
};
use storage::{EnrollmentRegistry, EntityStore};
use tracing::{info, warn};

mod event_log;
mod report;

pub use event_log::{EventLog, FileEventLog, MemoryEventLog, NoopEventLog};
pub use report::ReportGenerator;

/// Entry point for the console: owns the entity store, the enrollment index
/// and the injected event log.
pub struct TrainingCatalog {
    store: EntityStore,
    enrollments: EnrollmentRegistry,
    log: Box<dyn EventLog>,
}

impl Default for TrainingCatalog {
    fn default() -> Self {
        Self::new(NoopEventLog)
    }
}

impl TrainingCatalog {
    pub fn new(log: impl EventLog + 'static) -> Self {
        Self {
            store: EntityStore::new(),
            enrollments: EnrollmentRegistry::new(),
            log: Box::new(log),
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn enrollments(&self) -> &EnrollmentRegistry {
        &self.enrollments
    }

    pub fn add_course(&mut self, course: Course) -> Result<(), CatalogError> {
        let number = course.number();
        let result = self.store.add_course(course);
        self.audit("add course", result, |_| {
            format!("Course {number} added successfully!")
        })
    }

    pub fn add_employee(&mut self, employee: Employee) -> Result<(), CatalogError> {
        let id = employee.id();
        let result = self.store.add_employee(employee);
        self.audit("add employee", result, |_| {
            format!("Employee {id} added successfully!")
        })
    }

    pub fn remove_course(&mut self, number: CourseNumber) -> Result<Course, CatalogError> {
        let result = self.store.remove_course(number, &mut self.enrollments);
        self.audit("remove course", result, |course| {
            format!("Course {} ({}) removed successfully!", course.number(), course.title())
        })
    }

    pub fn remove_employee(&mut self, id: EmployeeId) -> Result<Employee, CatalogError> {
        let result = self.store.remove_employee(id, &mut self.enrollments);
        self.audit("remove employee", result, |employee| {
            format!("Employee {} ({}) removed successfully!", employee.id(), employee.name())
        })
    }

    /// Enrolls an employee and records their performance.
    ///
    /// Both records are looked up before anything changes, so a missing
    /// employee or course leaves the catalog exactly as it was.
    pub fn enroll_employee(
        &mut self,
        employee_id: EmployeeId,
        course_number: CourseNumber,
        performance: i64,
    ) -> Result<EnrollmentView, CatalogError> {
        let result = self.try_enroll(employee_id, course_number, performance);
        self.audit("enroll employee", result, |view| {
            format!(
                "Enrollment successful! employee {} in course {} with performance {}",
                view.employee_id(),
                view.course_number(),
                view.performance()
            )
        })
    }

    fn try_enroll(
        &mut self,
        employee_id: EmployeeId,
        course_number: CourseNumber,
        performance: i64,
    ) -> Result<EnrollmentView, CatalogError> {
        self.store.enroll(employee_id, course_number, performance, &mut self.enrollments)?;
        self.view_enrollment(employee_id)
    }

    pub fn view_enrollment(&self, employee_id: EmployeeId) -> Result<EnrollmentView, CatalogError> {
        self.enrollments
            .lookup(employee_id)
            .and_then(|enrollment| report::resolve(&self.store, enrollment))
            .ok_or_else(|| CatalogError::not_found(RecordKind::Enrollment, employee_id))
    }

    pub fn generate_employee_report(&self) -> impl Iterator<Item = ReportRow> + '_ {
        ReportGenerator::new(&self.store, &self.enrollments).employee_report()
    }

    pub fn find_course(&self, number: CourseNumber) -> Option<&Course> {
        self.store.find_course(number)
    }

    pub fn find_employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.store.find_employee(id)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.store.courses()
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.store.employees()
    }

    fn audit<T>(
        &self,
        action: &str,
        result: Result<T, CatalogError>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, CatalogError> {
        match &result {
            Ok(value) => {
                let line = describe(value);
                info!(action, "{line}");
                self.log.record(&line);
            }
            Err(error) => {
                warn!(action, %error, "catalog operation rejected");
                self.log.record(&format!("{action} failed: {error}"));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro() -> Course {
        Course::new(CourseNumber(101), "Intro", "Getting started", "Grace")
    }

    fn ann() -> Employee {
        Employee::new(EmployeeId(1), "Ann", "Analyst", "Finance", 10)
    }

    fn seeded() -> (TrainingCatalog, MemoryEventLog) {
        let log = MemoryEventLog::new();
        let mut catalog = TrainingCatalog::new(log.clone());
        catalog.add_course(intro()).expect("course");
        catalog
            .add_course(Course::new(CourseNumber(202), "Advanced", "Deep dive", "Alan"))
            .expect("course");
        catalog.add_employee(ann()).expect("employee");
        (catalog, log)
    }

    #[test]
    fn enroll_then_view_joins_both_records() {
        let (mut catalog, _) = seeded();
        let enrolled = catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 90)
            .expect("enroll");
        assert_eq!(enrolled.performance(), 90);

        let view = catalog.view_enrollment(EmployeeId(1)).expect("view");
        assert_eq!(view.employee.name(), "Ann");
        assert_eq!(view.course.title(), "Intro");
        assert_eq!(view.performance(), 90);
        assert_eq!(
            catalog.find_employee(EmployeeId(1)).expect("ann").performance(),
            90
        );
    }

    #[test]
    fn enroll_with_missing_employee_changes_nothing() {
        let (mut catalog, _) = seeded();
        let err = catalog
            .enroll_employee(EmployeeId(99), CourseNumber(101), 50)
            .expect_err("missing employee");
        assert_eq!(err, CatalogError::entity_not_found(RecordKind::Employee, 99));
        assert!(catalog.enrollments().is_empty());
    }

    #[test]
    fn enroll_with_missing_course_keeps_old_performance() {
        let (mut catalog, _) = seeded();
        let err = catalog
            .enroll_employee(EmployeeId(1), CourseNumber(999), 50)
            .expect_err("missing course");
        assert_eq!(err.kind(), RecordKind::Course);
        assert!(catalog.enrollments().is_empty());
        assert_eq!(
            catalog.find_employee(EmployeeId(1)).expect("ann").performance(),
            10
        );
    }

    #[test]
    fn failed_enroll_keeps_existing_enrollment() {
        let (mut catalog, _) = seeded();
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 70)
            .expect("enroll");
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(999), 20)
            .expect_err("missing course");
        let view = catalog.view_enrollment(EmployeeId(1)).expect("still enrolled");
        assert_eq!(view.course_number(), CourseNumber(101));
        assert_eq!(view.performance(), 70);
    }

    #[test]
    fn re_enrolling_moves_employee_to_new_course() {
        let (mut catalog, _) = seeded();
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 60)
            .expect("first");
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(202), 80)
            .expect("second");
        let view = catalog.view_enrollment(EmployeeId(1)).expect("view");
        assert_eq!(view.course.title(), "Advanced");
        assert_eq!(catalog.enrollments().len(), 1);
        assert_eq!(catalog.generate_employee_report().count(), 1);
    }

    #[test]
    fn removing_enrolled_course_hides_enrollment() {
        let (mut catalog, _) = seeded();
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 90)
            .expect("enroll");
        let removed = catalog.remove_course(CourseNumber(101)).expect("remove");
        assert_eq!(removed.title(), "Intro");

        let err = catalog.view_enrollment(EmployeeId(1)).expect_err("gone");
        assert_eq!(err, CatalogError::not_found(RecordKind::Enrollment, 1));
        assert!(catalog.find_employee(EmployeeId(1)).is_some());
    }

    #[test]
    fn removing_enrolled_employee_drops_enrollment() {
        let (mut catalog, _) = seeded();
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(202), 40)
            .expect("enroll");
        catalog.remove_employee(EmployeeId(1)).expect("remove");
        assert!(catalog.enrollments().lookup(EmployeeId(1)).is_none());
        assert_eq!(catalog.generate_employee_report().count(), 0);
    }

    #[test]
    fn duplicate_add_is_rejected_and_logged() {
        let (mut catalog, log) = seeded();
        let err = catalog.add_course(intro()).expect_err("duplicate");
        assert_eq!(err.code(), shared::error::ErrorCode::DuplicateIdentifier);
        assert_eq!(catalog.courses().count(), 2);
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("add course failed: course 101 already exists")
        );
    }

    #[test]
    fn successful_mutations_are_logged() {
        let (mut catalog, log) = seeded();
        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 90)
            .expect("enroll");
        let lines = log.lines();
        assert_eq!(lines[0], "Course 101 added successfully!");
        assert_eq!(lines[2], "Employee 1 added successfully!");
        assert_eq!(
            lines[3],
            "Enrollment successful! employee 1 in course 101 with performance 90"
        );
    }

    #[test]
    fn report_is_recomputed_from_current_state() {
        let (mut catalog, _) = seeded();
        assert_eq!(catalog.generate_employee_report().count(), 0);

        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 90)
            .expect("enroll");
        let rows: Vec<_> = catalog.generate_employee_report().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Ann");
        assert_eq!(rows[0].department, "Finance");
        assert_eq!(rows[0].course_title, "Intro");
        assert_eq!(rows[0].instructor, "Grace");
        assert_eq!(rows[0].performance, 90);

        catalog
            .enroll_employee(EmployeeId(1), CourseNumber(101), 95)
            .expect("re-enroll");
        let rows: Vec<_> = catalog.generate_employee_report().collect();
        assert_eq!(rows[0].performance, 95);
    }
}
