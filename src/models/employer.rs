use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employer {
    pub employer_id: i32,
    pub employer_title: String,
    pub employer_url: String,
    pub open_vacancies: i32,
}
