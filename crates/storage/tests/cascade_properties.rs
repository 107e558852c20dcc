use std::collections::BTreeSet;

use proptest::prelude::*;
use shared::domain::{Course, CourseNumber, Employee, EmployeeId};
use storage::{EnrollmentRegistry, EntityStore};

#[derive(Debug, Clone)]
enum Op {
    AddCourse(i64),
    AddEmployee(i64),
    RemoveCourse(i64),
    RemoveEmployee(i64),
    Enroll(i64, i64),
}

fn op() -> impl Strategy<Value = Op> {
    // Small id space so collisions and removals of enrolled records are common.
    let id = 0i64..6;
    prop_oneof![
        id.clone().prop_map(Op::AddCourse),
        id.clone().prop_map(Op::AddEmployee),
        id.clone().prop_map(Op::RemoveCourse),
        id.clone().prop_map(Op::RemoveEmployee),
        (id.clone(), id).prop_map(|(e, c)| Op::Enroll(e, c)),
    ]
}

fn apply(store: &mut EntityStore, registry: &mut EnrollmentRegistry, op: &Op) {
    match *op {
        Op::AddCourse(n) => {
            let _ = store.add_course(Course::new(CourseNumber(n), "t", "d", "i"));
        }
        Op::AddEmployee(id) => {
            let _ = store.add_employee(Employee::new(EmployeeId(id), "n", "p", "d", 0));
        }
        Op::RemoveCourse(n) => {
            let _ = store.remove_course(CourseNumber(n), registry);
        }
        Op::RemoveEmployee(id) => {
            let _ = store.remove_employee(EmployeeId(id), registry);
        }
        Op::Enroll(e, c) => {
            if let (Some(employee), Some(course)) = (
                store.find_employee(EmployeeId(e)),
                store.find_course(CourseNumber(c)),
            ) {
                registry.enroll(employee, course);
            }
        }
    }
}

proptest! {
    #[test]
    fn identifiers_stay_unique(ops in prop::collection::vec(op(), 0..64)) {
        let mut store = EntityStore::new();
        let mut registry = EnrollmentRegistry::new();
        for op in &ops {
            apply(&mut store, &mut registry, op);
            let numbers: BTreeSet<_> = store.courses().map(Course::number).collect();
            prop_assert_eq!(numbers.len(), store.course_count());
            let ids: BTreeSet<_> = store.employees().map(Employee::id).collect();
            prop_assert_eq!(ids.len(), store.employee_count());
        }
    }

    #[test]
    fn enrollments_never_dangle(ops in prop::collection::vec(op(), 0..64)) {
        let mut store = EntityStore::new();
        let mut registry = EnrollmentRegistry::new();
        for op in &ops {
            apply(&mut store, &mut registry, op);
            for (employee_id, enrollment) in registry.all() {
                prop_assert_eq!(employee_id, enrollment.employee_id);
                prop_assert!(store.find_employee(enrollment.employee_id).is_some());
                prop_assert!(store.find_course(enrollment.course_number).is_some());
            }
            prop_assert!(registry.len() <= store.employee_count());
        }
    }

    #[test]
    fn removal_leaves_no_reference_behind(
        ops in prop::collection::vec(op(), 0..32),
        target in 0i64..6,
    ) {
        let mut store = EntityStore::new();
        let mut registry = EnrollmentRegistry::new();
        for op in &ops {
            apply(&mut store, &mut registry, op);
        }

        let mut by_course = registry.clone();
        let mut course_store = store.clone();
        if course_store.remove_course(CourseNumber(target), &mut by_course).is_ok() {
            prop_assert_eq!(by_course.enrolled_in(CourseNumber(target)).count(), 0);
        }

        if store.remove_employee(EmployeeId(target), &mut registry).is_ok() {
            prop_assert!(registry.lookup(EmployeeId(target)).is_none());
        }
    }
}
