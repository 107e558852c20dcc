use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use catalog::TrainingCatalog;
use shared::domain::{Course, CourseNumber, Employee, EmployeeId};
use tracing::debug;

use crate::{config::ReportFormat, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCourse,
    AddEmployee,
    RemoveCourse,
    RemoveEmployee,
    EnrollEmployee,
    ViewEnrollment,
    EmployeeReport,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Self::AddCourse),
            "2" => Ok(Self::AddEmployee),
            "3" => Ok(Self::RemoveCourse),
            "4" => Ok(Self::RemoveEmployee),
            "5" => Ok(Self::EnrollEmployee),
            "6" => Ok(Self::ViewEnrollment),
            "7" => Ok(Self::EmployeeReport),
            "8" => Ok(Self::Exit),
            other => Err(anyhow!("unknown menu choice '{other}'")),
        }
    }
}

const MENU: &str = "\nMenu:
1. Add Course
2. Add Employee
3. Remove Course
4. Remove Employee
5. Enroll Employee
6. View Enrollment Details
7. Generate Report for employee performance
8. Exit";

/// Text front end over a [`TrainingCatalog`].
///
/// End of input at any prompt ends the session as if `8` had been chosen.
pub struct Console<R, W> {
    catalog: TrainingCatalog,
    input: R,
    output: W,
    report_format: ReportFormat,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(catalog: TrainingCatalog, input: R, output: W, report_format: ReportFormat) -> Self {
        Self {
            catalog,
            input,
            output,
            report_format,
        }
    }

    pub fn catalog(&self) -> &TrainingCatalog {
        &self.catalog
    }

    pub fn into_parts(self) -> (TrainingCatalog, W) {
        (self.catalog, self.output)
    }

    /// Bulk entry of the starting courses and employees.
    pub fn run_setup(&mut self) -> Result<()> {
        let Some(course_count) = self.prompt_int("Enter the number of courses: ")? else {
            return Ok(());
        };
        for index in 1..=course_count.max(0) {
            writeln!(self.output, "Enter details for Course {index}:")?;
            let Some(course) = self.read_course()? else {
                return Ok(());
            };
            if let Err(error) = self.catalog.add_course(course) {
                writeln!(self.output, "{}", render::failure_message(&error))?;
            }
        }

        let Some(employee_count) = self.prompt_int("\nEnter the number of employees: ")? else {
            return Ok(());
        };
        for index in 1..=employee_count.max(0) {
            writeln!(self.output, "Enter details for Employee {index}:")?;
            let Some(employee) = self.read_employee("Employee Performance: ")? else {
                return Ok(());
            };
            if let Err(error) = self.catalog.add_employee(employee) {
                writeln!(self.output, "{}", render::failure_message(&error))?;
            }
        }
        Ok(())
    }

    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt_line("Enter your choice: ")? else {
                self.end_of_input()?;
                return Ok(());
            };
            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(error) => {
                    debug!(%error, "rejected menu input");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };
            if self.dispatch(choice)?.is_break() {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<ControlFlow<()>> {
        match choice {
            MenuChoice::AddCourse => self.add_course(),
            MenuChoice::AddEmployee => self.add_employee(),
            MenuChoice::RemoveCourse => self.remove_course(),
            MenuChoice::RemoveEmployee => self.remove_employee(),
            MenuChoice::EnrollEmployee => self.enroll_employee(),
            MenuChoice::ViewEnrollment => self.view_enrollment(),
            MenuChoice::EmployeeReport => {
                render::write_report(
                    &mut self.output,
                    self.catalog.generate_employee_report(),
                    self.report_format,
                )?;
                Ok(ControlFlow::Continue(()))
            }
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting...")?;
                Ok(ControlFlow::Break(()))
            }
        }
    }

    /// Input ran out mid-prompt; leave the menu as `8` would.
    fn end_of_input(&mut self) -> Result<ControlFlow<()>> {
        writeln!(self.output, "\nExiting...")?;
        Ok(ControlFlow::Break(()))
    }

    fn add_course(&mut self) -> Result<ControlFlow<()>> {
        writeln!(self.output, "Enter details for the new Course:")?;
        let Some(course) = self.read_course()? else {
            return self.end_of_input();
        };
        match self.catalog.add_course(course) {
            Ok(()) => writeln!(self.output, "Course added successfully!")?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn add_employee(&mut self) -> Result<ControlFlow<()>> {
        writeln!(self.output, "Enter details for the new Employee:")?;
        let Some(employee) = self.read_employee("Enter Employee Performance: ")? else {
            return self.end_of_input();
        };
        match self.catalog.add_employee(employee) {
            Ok(()) => writeln!(self.output, "Employee added successfully!")?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn remove_course(&mut self) -> Result<ControlFlow<()>> {
        let Some(number) = self.prompt_int("Enter the Course Number to remove: ")? else {
            return self.end_of_input();
        };
        match self.catalog.remove_course(CourseNumber(number)) {
            Ok(_) => writeln!(self.output, "Course removed successfully!")?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn remove_employee(&mut self) -> Result<ControlFlow<()>> {
        let Some(id) = self.prompt_int("Enter the Employee ID to remove: ")? else {
            return self.end_of_input();
        };
        match self.catalog.remove_employee(EmployeeId(id)) {
            Ok(_) => writeln!(self.output, "Employee removed successfully!")?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn enroll_employee(&mut self) -> Result<ControlFlow<()>> {
        let Some(employee_id) = self.prompt_int("Enter Employee ID to enroll: ")? else {
            return self.end_of_input();
        };
        let Some(course_number) = self.prompt_int("Enter Course Number to enroll: ")? else {
            return self.end_of_input();
        };
        let Some(performance) = self.prompt_int("Enter Employee Performance: ")? else {
            return self.end_of_input();
        };
        match self.catalog.enroll_employee(
            EmployeeId(employee_id),
            CourseNumber(course_number),
            performance,
        ) {
            Ok(_) => writeln!(self.output, "Enrollment successful!")?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn view_enrollment(&mut self) -> Result<ControlFlow<()>> {
        let Some(id) =
            self.prompt_int("Enter the Employee ID to view enrollment details: ")?
        else {
            return self.end_of_input();
        };
        match self.catalog.view_enrollment(EmployeeId(id)) {
            Ok(view) => render::write_enrollment(&mut self.output, &view)?,
            Err(error) => writeln!(self.output, "{}", render::failure_message(&error))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn read_course(&mut self) -> Result<Option<Course>> {
        let Some(title) = self.prompt_line("Course Title: ")? else {
            return Ok(None);
        };
        let Some(description) = self.prompt_line("Description: ")? else {
            return Ok(None);
        };
        let Some(instructor) = self.prompt_line("Instructor: ")? else {
            return Ok(None);
        };
        let Some(number) = self.prompt_int("Course Number: ")? else {
            return Ok(None);
        };
        Ok(Some(Course::new(
            CourseNumber(number),
            title,
            description,
            instructor,
        )))
    }

    fn read_employee(&mut self, performance_prompt: &str) -> Result<Option<Employee>> {
        let Some(name) = self.prompt_line("Employee Name: ")? else {
            return Ok(None);
        };
        let Some(position) = self.prompt_line("Position: ")? else {
            return Ok(None);
        };
        let Some(department) = self.prompt_line("Department: ")? else {
            return Ok(None);
        };
        let Some(id) = self.prompt_int("Employee ID: ")? else {
            return Ok(None);
        };
        let Some(performance) = self.prompt_int(performance_prompt)? else {
            return Ok(None);
        };
        Ok(Some(Employee::new(
            EmployeeId(id),
            name,
            position,
            department,
            performance,
        )))
    }

    /// `None` once input is exhausted. Bytes that are not UTF-8 become U+FFFD.
    fn prompt_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("failed to flush console output")?;

        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("failed to read console input")?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn prompt_int(&mut self, label: &str) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt_line(label)? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
