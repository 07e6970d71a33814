//! Form field record and the default seeded layout.
//!
//! The form record is the flat key/value data the user types into the cover
//! page form. The editor reads it only to seed the initial element layout;
//! every missing key backfills to its default on load.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::DEFAULT_IMAGE_SIZE;
use crate::doc::{DEFAULT_TEXT_COLOR, Element, FontWeight, ImageElement, Size, TextAlign, TextElement};

/// Document type used when the record has none.
pub const DEFAULT_DOCUMENT_TYPE: &str = "Assignment";

/// Site-relative path of the university logo placed by the default layout.
pub const DEFAULT_LOGO_SRC: &str = "/diu_logo.png";

/// A title / experiment-number pair for multi-page lab reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleExperiment {
    pub title: String,
    pub experiment_no: String,
}

/// Cover page form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormRecord {
    /// Document type, e.g. "Assignment" or "Lab Report".
    #[serde(rename = "type")]
    pub doc_type: String,
    pub course_code: String,
    pub course_title: String,
    pub topic: String,
    pub teacher_name: String,
    pub designation: String,
    pub teacher_department: String,
    pub student_name: String,
    pub student_id: String,
    pub section: String,
    pub student_department: String,
    pub submission_date: String,
    pub title_experiments: Vec<TitleExperiment>,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            doc_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            course_code: String::new(),
            course_title: String::new(),
            topic: String::new(),
            teacher_name: String::new(),
            designation: String::new(),
            teacher_department: String::new(),
            student_name: String::new(),
            student_id: String::new(),
            section: String::new(),
            student_department: String::new(),
            submission_date: String::new(),
            title_experiments: Vec::new(),
        }
    }
}

impl FormRecord {
    /// Document type, or the default when blank.
    #[must_use]
    pub fn document_type(&self) -> &str {
        let trimmed = self.doc_type.trim();
        if trimmed.is_empty() { DEFAULT_DOCUMENT_TYPE } else { trimmed }
    }

    /// Set a field by its camelCase key. Returns false for unknown keys.
    pub fn set_field(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "type" => &mut self.doc_type,
            "courseCode" => &mut self.course_code,
            "courseTitle" => &mut self.course_title,
            "topic" => &mut self.topic,
            "teacherName" => &mut self.teacher_name,
            "designation" => &mut self.designation,
            "teacherDepartment" => &mut self.teacher_department,
            "studentName" => &mut self.student_name,
            "studentId" => &mut self.student_id,
            "section" => &mut self.section,
            "studentDepartment" => &mut self.student_department,
            "submissionDate" => &mut self.submission_date,
            _ => return false,
        };
        *slot = value;
        true
    }
}

fn seed_text(content: String, x: f64, y: f64, font_size: u32, font_weight: FontWeight) -> Element {
    Element::Text(TextElement {
        id: Uuid::new_v4(),
        position: Point::new(x, y),
        content,
        font_size,
        font_weight,
        color: DEFAULT_TEXT_COLOR.to_string(),
        opacity: 100,
        align: TextAlign::Center,
    })
}

fn present(value: &str) -> Option<&str> {
    let v = value.trim();
    if v.is_empty() { None } else { Some(v) }
}

/// Build the default element layout for a form record.
///
/// Logo and document type are always present; every other line appears only
/// when its field is filled in. Teacher details need a teacher name and
/// student details need a student name.
#[must_use]
pub fn seed_elements(form: &FormRecord) -> Vec<Element> {
    let mut out = vec![
        Element::Image(ImageElement {
            id: Uuid::new_v4(),
            position: Point::new(250.0, 50.0),
            src: DEFAULT_LOGO_SRC.to_string(),
            size: Size::new(DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE),
        }),
        seed_text(form.document_type().to_string(), 200.0, 170.0, 28, FontWeight::Bold),
    ];

    if let Some(v) = present(&form.course_code) {
        out.push(seed_text(format!("Course Code: {v}"), 150.0, 220.0, 18, FontWeight::Normal));
    }
    if let Some(v) = present(&form.course_title) {
        out.push(seed_text(format!("Course Title: {v}"), 150.0, 250.0, 18, FontWeight::Normal));
    }
    if let Some(v) = present(&form.topic) {
        out.push(seed_text(format!("Topic: {v}"), 150.0, 280.0, 18, FontWeight::Normal));
    }

    if let Some(name) = present(&form.teacher_name) {
        out.push(seed_text("Submitted To:".into(), 150.0, 350.0, 16, FontWeight::Bold));
        out.push(seed_text(name.to_string(), 150.0, 380.0, 16, FontWeight::Normal));
        if let Some(v) = present(&form.designation) {
            out.push(seed_text(v.to_string(), 150.0, 410.0, 16, FontWeight::Normal));
        }
        if let Some(v) = present(&form.teacher_department) {
            out.push(seed_text(v.to_string(), 150.0, 440.0, 16, FontWeight::Normal));
        }
    }

    if let Some(name) = present(&form.student_name) {
        out.push(seed_text("Submitted By:".into(), 150.0, 500.0, 16, FontWeight::Bold));
        out.push(seed_text(name.to_string(), 150.0, 530.0, 16, FontWeight::Normal));
        if let Some(v) = present(&form.student_id) {
            out.push(seed_text(format!("ID: {v}"), 150.0, 560.0, 16, FontWeight::Normal));
        }
        if let Some(v) = present(&form.section) {
            out.push(seed_text(format!("Section: {v}"), 150.0, 590.0, 16, FontWeight::Normal));
        }
        if let Some(v) = present(&form.student_department) {
            out.push(seed_text(v.to_string(), 150.0, 620.0, 16, FontWeight::Normal));
        }
    }

    if let Some(v) = present(&form.submission_date) {
        out.push(seed_text(format!("Submission Date: {v}"), 150.0, 680.0, 16, FontWeight::Normal));
    }

    out
}
