use core_types::{Student, StudentId};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

/// The compiled page templates. Built once at start-up and shared by all handlers.
pub struct Views {
    registry: Handlebars<'static>,
}

#[derive(Serialize)]
struct ListPage<'a> {
    title: &'static str,
    students: &'a [Student],
}

#[derive(Serialize)]
struct FormPage {
    title: &'static str,
    action: &'static str,
    submit_label: &'static str,
    student: FormFields,
}

/// Values pre-filled into the shared student form. Empty for a new record.
#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
struct FormFields {
    id: Option<StudentId>,
    full_name: String,
    email: String,
    course: String,
    age: Option<i32>,
}

impl From<&Student> for FormFields {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id),
            full_name: student.full_name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            age: Some(student.age),
        }
    }
}

#[derive(Serialize)]
struct DeletePage<'a> {
    title: &'static str,
    student: &'a Student,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        registry.register_partial("student_form", include_str!("../templates/student_form.hbs"))?;
        registry.register_template_string("list", include_str!("../templates/list.hbs"))?;
        registry.register_template_string("form", include_str!("../templates/form.hbs"))?;
        registry.register_template_string("delete", include_str!("../templates/delete.hbs"))?;
        Ok(Self { registry })
    }

    pub fn student_list(&self, students: &[Student]) -> Result<String, RenderError> {
        self.registry.render(
            "list",
            &ListPage {
                title: "Students",
                students,
            },
        )
    }

    pub fn create_form(&self) -> Result<String, RenderError> {
        self.registry.render(
            "form",
            &FormPage {
                title: "Create student",
                action: "/Student/Create",
                submit_label: "Create",
                student: FormFields::default(),
            },
        )
    }

    pub fn edit_form(&self, student: &Student) -> Result<String, RenderError> {
        self.registry.render(
            "form",
            &FormPage {
                title: "Edit student",
                action: "/Student/Edit",
                submit_label: "Save",
                student: FormFields::from(student),
            },
        )
    }

    pub fn delete_confirmation(&self, student: &Student) -> Result<String, RenderError> {
        self.registry.render(
            "delete",
            &DeletePage {
                title: "Delete student",
                student,
            },
        )
    }
}
