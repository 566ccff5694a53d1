use crate::{DbError, StudentStore};
use async_trait::async_trait;
use core_types::{NewStudent, Student, StudentId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A `StudentStore` kept entirely in process memory.
///
/// Ids come from a counter that only moves forward, so like the identity
/// column of the SQL table an Id is never handed out twice.
#[derive(Debug)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

#[derive(Debug)]
struct Table {
    next_id: StudentId,
    rows: BTreeMap<StudentId, Student>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentStore for InMemoryRepository {
    async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DbError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id.checked_add(1).ok_or(DbError::IdsExhausted)?;
        let created = student.with_id(id);
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Student, DbError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn update(&self, student: Student) -> Result<Student, DbError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&student.id).ok_or(DbError::NotFound)?;
        *row = student.clone();
        Ok(student)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, DbError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
