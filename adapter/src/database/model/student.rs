use kernel::model::student::Student;

#[derive(sqlx::FromRow)]
pub struct StudentRow {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub admission_year: i32,
    pub repeated_years: i32,
}

impl From<StudentRow> for Student {
    fn from(value: StudentRow) -> Self {
        let StudentRow {
            student_id,
            first_name,
            last_name,
            admission_year,
            repeated_years,
        } = value;
        Student {
            student_id,
            first_name,
            last_name,
            admission_year,
            repeated_years,
        }
    }
}
