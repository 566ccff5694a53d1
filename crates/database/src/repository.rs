use crate::DbError;
use async_trait::async_trait;
use core_types::{NewStudent, Student, StudentId};
use sqlx::postgres::PgPool;

/// The persistence façade for student records.
///
/// Every operation touches at most one record and maps directly onto a
/// single storage call. Lookups of an Id that matches nothing return
/// `DbError::NotFound`; `update` leaves storage untouched in that case.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Returns every record in Id order.
    async fn list_all(&self) -> Result<Vec<Student>, DbError>;

    /// Persists a new record and returns it with its storage-assigned Id.
    async fn create(&self, student: NewStudent) -> Result<Student, DbError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Student, DbError>;

    /// Replaces every field of the record with the same Id.
    async fn update(&self, student: Student) -> Result<Student, DbError>;

    /// Removes the record if present. Returns whether a record was removed;
    /// deleting an absent Id is not an error.
    async fn delete(&self, id: StudentId) -> Result<bool, DbError>;
}

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for DbRepository {
    async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, course, age FROM students ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DbError> {
        let created = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (full_name, email, course, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, course, age
            "#,
        )
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(&student.course)
        .bind(student.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Student, DbError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, course, age FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => other.into(),
        })?;
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, DbError> {
        let updated = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET full_name = $1, email = $2, course = $3, age = $4
            WHERE id = $5
            RETURNING id, full_name, email, course, age
            "#,
        )
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(&student.course)
        .bind(student.age)
        .bind(student.id)
        .fetch_optional(&self.pool)
        .await?;
        updated.ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
