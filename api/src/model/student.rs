use kernel::model::student::Student;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub admission_year: i32,
    pub repeated_years: i32,
    // 貸出先として本に記録する "HF" 付きの参照
    pub reference: String,
    pub course: i32,
}

impl StudentResponse {
    pub fn new(student: Student, current_year: i32) -> Self {
        let reference = student.reference().to_string();
        let course = student.course(current_year);
        let Student {
            student_id,
            first_name,
            last_name,
            admission_year,
            repeated_years,
        } = student;
        Self {
            student_id,
            first_name,
            last_name,
            admission_year,
            repeated_years,
            reference,
            course,
        }
    }
}
