use kernel::model::auth::Identity;

#[derive(sqlx::FromRow)]
pub struct SessionRow {
    pub email: String,
}

impl From<SessionRow> for Identity {
    fn from(value: SessionRow) -> Self {
        Identity(value.email)
    }
}
