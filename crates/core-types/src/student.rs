use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The storage-assigned identity key of a student record.
pub type StudentId = i32;

/// A stored student record.
///
/// Field names are serialized in `PascalCase` (`Id`, `FullName`, ...) so that
/// the same struct binds the edit form and feeds the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub email: String,
    pub course: String,
    pub age: i32,
}

/// The fields of a student that does not have an Id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub course: String,
    pub age: i32,
}

impl NewStudent {
    /// Attaches a storage-assigned Id, producing the stored record.
    pub fn with_id(self, id: StudentId) -> Student {
        Student {
            id,
            full_name: self.full_name,
            email: self.email,
            course: self.course,
            age: self.age,
        }
    }
}

impl From<Student> for NewStudent {
    fn from(student: Student) -> Self {
        Self {
            full_name: student.full_name,
            email: student.email,
            course: student.course,
            age: student.age,
        }
    }
}
