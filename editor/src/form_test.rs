#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn texts(elements: &[Element]) -> Vec<String> {
    elements.iter().filter_map(|e| e.as_text().map(|t| t.content.clone())).collect()
}

// =============================================================
// FormRecord defaults / serde
// =============================================================

#[test]
fn default_type_is_assignment() {
    assert_eq!(FormRecord::default().doc_type, "Assignment");
}

#[test]
fn missing_keys_backfill_on_load() {
    let form: FormRecord = serde_json::from_value(json!({ "courseCode": "CSE101" })).unwrap();
    assert_eq!(form.course_code, "CSE101");
    assert_eq!(form.doc_type, "Assignment");
    assert!(form.title_experiments.is_empty());
    assert!(form.teacher_name.is_empty());
}

#[test]
fn title_experiments_backfill_missing_fields() {
    let form: FormRecord = serde_json::from_value(json!({
        "type": "Lab Report",
        "titleExperiments": [{ "title": "Ohm's law" }]
    }))
    .unwrap();
    assert_eq!(form.title_experiments.len(), 1);
    assert_eq!(form.title_experiments[0].title, "Ohm's law");
    assert_eq!(form.title_experiments[0].experiment_no, "");
}

#[test]
fn serializes_with_camel_case_keys() {
    let value = serde_json::to_value(FormRecord::default()).unwrap();
    assert_eq!(value["type"], "Assignment");
    assert!(value.get("courseCode").is_some());
    assert!(value.get("submissionDate").is_some());
}

#[test]
fn blank_type_reads_as_default() {
    let form = FormRecord { doc_type: "  ".into(), ..Default::default() };
    assert_eq!(form.document_type(), "Assignment");
}

#[test]
fn set_field_by_key() {
    let mut form = FormRecord::default();
    assert!(form.set_field("studentId", "221-15-0001".into()));
    assert_eq!(form.student_id, "221-15-0001");
    assert!(!form.set_field("nope", "x".into()));
}

// =============================================================
// seed_elements
// =============================================================

#[test]
fn seed_always_has_logo_and_type() {
    let elements = seed_elements(&FormRecord::default());
    assert_eq!(elements.len(), 2);

    let logo = elements[0].as_image().unwrap();
    assert_eq!(logo.src, DEFAULT_LOGO_SRC);
    assert_eq!(logo.position, Point::new(250.0, 50.0));
    assert_eq!(logo.size, Size::new(100.0, 100.0));

    let title = elements[1].as_text().unwrap();
    assert_eq!(title.content, "Assignment");
    assert_eq!(title.position, Point::new(200.0, 170.0));
    assert_eq!(title.font_size, 28);
    assert_eq!(title.font_weight, FontWeight::Bold);
    assert_eq!(title.align, TextAlign::Center);
}

#[test]
fn seed_course_code_line() {
    let form = FormRecord { course_code: "CSE101".into(), ..Default::default() };
    let elements = seed_elements(&form);
    assert_eq!(elements.len(), 3);
    let line = elements[2].as_text().unwrap();
    assert_eq!(line.content, "Course Code: CSE101");
    assert_eq!(line.position, Point::new(150.0, 220.0));
    assert_eq!(line.font_size, 18);
}

#[test]
fn seed_full_record_orders_lines_top_to_bottom() {
    let form = FormRecord {
        doc_type: "Lab Report".into(),
        course_code: "CSE101".into(),
        course_title: "Structured Programming".into(),
        topic: "Loops".into(),
        teacher_name: "Dr. Rahman".into(),
        designation: "Lecturer".into(),
        teacher_department: "CSE".into(),
        student_name: "Ayesha".into(),
        student_id: "221-15-0001".into(),
        section: "A".into(),
        student_department: "CSE".into(),
        submission_date: "2025-03-01".into(),
        title_experiments: Vec::new(),
    };
    let elements = seed_elements(&form);
    assert_eq!(
        texts(&elements),
        [
            "Lab Report",
            "Course Code: CSE101",
            "Course Title: Structured Programming",
            "Topic: Loops",
            "Submitted To:",
            "Dr. Rahman",
            "Lecturer",
            "CSE",
            "Submitted By:",
            "Ayesha",
            "ID: 221-15-0001",
            "Section: A",
            "CSE",
            "Submission Date: 2025-03-01",
        ]
    );
    let ys: Vec<f64> = elements.iter().skip(1).map(|e| e.position().y).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn teacher_details_need_teacher_name() {
    let form = FormRecord { designation: "Lecturer".into(), ..Default::default() };
    assert_eq!(seed_elements(&form).len(), 2);
}

#[test]
fn student_details_need_student_name() {
    let form = FormRecord { student_id: "42".into(), section: "B".into(), ..Default::default() };
    assert_eq!(seed_elements(&form).len(), 2);
}

#[test]
fn seeded_ids_are_unique() {
    let form = FormRecord { course_code: "X".into(), topic: "Y".into(), ..Default::default() };
    let elements = seed_elements(&form);
    let mut ids: Vec<_> = elements.iter().map(Element::id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), elements.len());
}
