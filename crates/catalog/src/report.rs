use shared::view::{EnrollmentView, ReportRow};
use storage::{Enrollment, EnrollmentRegistry, EntityStore};

/// Joins an enrollment with the records it points at.
pub fn resolve(store: &EntityStore, enrollment: &Enrollment) -> Option<EnrollmentView> {
    let employee = store.find_employee(enrollment.employee_id)?;
    let course = store.find_course(enrollment.course_number)?;
    Some(EnrollmentView {
        employee: employee.clone(),
        course: course.clone(),
        enrolled_at: enrollment.enrolled_at,
    })
}

/// Read-only view over the catalog that produces report rows on demand.
#[derive(Clone, Copy)]
pub struct ReportGenerator<'a> {
    store: &'a EntityStore,
    enrollments: &'a EnrollmentRegistry,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(store: &'a EntityStore, enrollments: &'a EnrollmentRegistry) -> Self {
        Self { store, enrollments }
    }

    /// One row per enrollment, in employee id order. Nothing is cached.
    pub fn employee_report(self) -> impl Iterator<Item = ReportRow> + 'a {
        let store = self.store;
        self.enrollments
            .all()
            .filter_map(move |(_, enrollment)| resolve(store, enrollment))
            .map(|view| ReportRow::from(&view))
    }
}
