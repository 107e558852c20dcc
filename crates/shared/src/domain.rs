use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CourseNumber);
id_newtype!(EmployeeId);

/// Kind of record an identifier addresses, carried by errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Course,
    Employee,
    Enrollment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Course => "course",
            RecordKind::Employee => "employee",
            RecordKind::Enrollment => "enrollment",
        })
    }
}

/// A training course. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    number: CourseNumber,
    title: String,
    description: String,
    instructor: String,
}

impl Course {
    pub fn new(
        number: CourseNumber,
        title: impl Into<String>,
        description: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            description: description.into(),
            instructor: instructor.into(),
        }
    }

    pub fn number(&self) -> CourseNumber {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }
}

/// An employee. Everything but `performance` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    position: String,
    department: String,
    performance: i64,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
        performance: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
            department: department.into(),
            performance,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn performance(&self) -> i64 {
        self.performance
    }

    pub fn set_performance(&mut self, performance: i64) {
        self.performance = performance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_serialize_as_bare_integers() {
        let json = serde_json::to_string(&CourseNumber(101)).expect("json");
        assert_eq!(json, "101");
        let id: EmployeeId = serde_json::from_str("7").expect("parse");
        assert_eq!(id, EmployeeId(7));
    }

    #[test]
    fn record_kind_displays_lowercase() {
        assert_eq!(RecordKind::Employee.to_string(), "employee");
        assert_eq!(
            serde_json::to_string(&RecordKind::Enrollment).expect("json"),
            "\"enrollment\""
        );
    }
}
