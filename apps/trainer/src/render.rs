use std::io::Write;

use anyhow::Result;
use shared::{
    domain::RecordKind,
    error::CatalogError,
    view::{EnrollmentView, ReportRow},
};

use crate::config::ReportFormat;

const RULE: &str = "---------------------";

pub fn failure_message(error: &CatalogError) -> String {
    match error {
        CatalogError::NotFound {
            kind: RecordKind::Course,
            ..
        } => "Course not found. Please check the Course Number.".to_string(),
        CatalogError::NotFound {
            kind: RecordKind::Employee,
            ..
        } => "Employee not found. Please check the Employee ID.".to_string(),
        CatalogError::NotFound {
            kind: RecordKind::Enrollment,
            ..
        } => "\nEnrollment not found. Please check the Employee ID.".to_string(),
        CatalogError::DuplicateIdentifier {
            kind: RecordKind::Course,
            id,
        } => format!("Course Number {id} is already in use. Course not added."),
        CatalogError::DuplicateIdentifier { id, .. } => {
            format!("Employee ID {id} is already in use. Employee not added.")
        }
        CatalogError::EntityNotFound { kind, id } => {
            let label = match kind {
                RecordKind::Course => "Course",
                _ => "Employee",
            };
            format!("{label} {id} not found. Please check the provided IDs.")
        }
    }
}

pub fn write_enrollment(out: &mut impl Write, view: &EnrollmentView) -> Result<()> {
    writeln!(out, "\nEnrollment Details:")?;
    writeln!(out, "Employee Name: {}", view.employee.name())?;
    writeln!(out, "Course Title: {}", view.course.title())?;
    writeln!(out, "Description: {}", view.course.description())?;
    writeln!(out, "Instructor: {}", view.course.instructor())?;
    writeln!(out, "Course Number: {}", view.course.number())?;
    writeln!(out, "Employee ID: {}", view.employee.id())?;
    writeln!(out, "Performance: {}", view.employee.performance())?;
    Ok(())
}

pub fn write_report(
    out: &mut impl Write,
    rows: impl Iterator<Item = ReportRow>,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => write_report_text(out, rows),
        ReportFormat::Json => {
            let rows: Vec<_> = rows.collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_report_text(out: &mut impl Write, rows: impl Iterator<Item = ReportRow>) -> Result<()> {
    let mut written = 0usize;
    for row in rows {
        writeln!(out, "{RULE}")?;
        writeln!(out, "Employee Name: {}", row.employee_name)?;
        writeln!(out, "Position: {}", row.position)?;
        writeln!(out, "Department: {}", row.department)?;
        writeln!(out, "Employee ID: {}", row.employee_id)?;
        writeln!(out, "Course Title: {}", row.course_title)?;
        writeln!(out, "Description: {}", row.course_description)?;
        writeln!(out, "Instructor: {}", row.instructor)?;
        writeln!(out, "Course Number: {}", row.course_number)?;
        writeln!(out, "Performance: {}", row.performance)?;
        writeln!(out, "{RULE}")?;
        written += 1;
    }
    if written == 0 {
        writeln!(out, "No enrollments to report.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_failures_name_the_missing_side() {
        let err = CatalogError::entity_not_found(RecordKind::Course, 5);
        assert_eq!(
            failure_message(&err),
            "Course 5 not found. Please check the provided IDs."
        );
    }

    #[test]
    fn empty_text_report_says_so() {
        let mut out = Vec::new();
        write_report(&mut out, std::iter::empty(), ReportFormat::Text).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "No enrollments to report.\n");
    }

    #[test]
    fn empty_json_report_is_an_empty_array() {
        let mut out = Vec::new();
        write_report(&mut out, std::iter::empty(), ReportFormat::Json).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "[]\n");
    }
}
