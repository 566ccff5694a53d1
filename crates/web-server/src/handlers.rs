use crate::{AppState, error::AppError};
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use core_types::{NewStudent, Student, StudentId};
use database::DbError;
use serde::Deserialize;
use std::sync::Arc;

/// Where every successful form submission lands.
pub const LIST_PATH: &str = "/Student/List";

/// The body posted by the delete confirmation page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteStudentForm {
    pub id: StudentId,
}

/// # GET /Student/List
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let students = state.store.list_all().await?;
    Ok(Html(state.views.student_list(&students)?))
}

/// # GET /Student/Create
pub async fn show_create_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.create_form()?))
}

/// # POST /Student/Create
/// Fields are stored exactly as posted. Every submission creates a new record.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Form(student): Form<NewStudent>,
) -> Result<Redirect, AppError> {
    let created = state.store.create(student).await?;
    tracing::info!(student_id = created.id, "Created student.");
    Ok(Redirect::to(LIST_PATH))
}

/// # GET /Student/Edit/:id
pub async fn show_edit_form(
    Path(id): Path<StudentId>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let student = state.store.find_by_id(id).await?;
    Ok(Html(state.views.edit_form(&student)?))
}

/// # POST /Student/Edit
/// Redirects to the list whether or not the Id matched a record.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Form(student): Form<Student>,
) -> Result<Redirect, AppError> {
    let student_id = student.id;
    match state.store.update(student).await {
        Ok(_) => tracing::info!(student_id, "Updated student."),
        Err(DbError::NotFound) => {
            tracing::warn!(student_id, "Update matched no student; nothing changed.")
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to(LIST_PATH))
}

/// # GET /Student/Delete/:id
pub async fn show_delete_confirmation(
    Path(id): Path<StudentId>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let student = state.store.find_by_id(id).await?;
    Ok(Html(state.views.delete_confirmation(&student)?))
}

/// # POST /Student/Delete
/// Redirects to the list whether or not a record was removed.
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteStudentForm>,
) -> Result<Redirect, AppError> {
    if state.store.delete(form.id).await? {
        tracing::info!(student_id = form.id, "Deleted student.");
    } else {
        tracing::debug!(student_id = form.id, "Delete matched no student.");
    }
    Ok(Redirect::to(LIST_PATH))
}
