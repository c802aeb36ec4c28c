use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `vacancies` table. `employer_title` is a copy of the employer's
/// name, not a reference to `employers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i32,
    pub employer_title: String,
    pub vacancies_title: String,
    pub area: String,
    pub salary_from: i32,
    pub salary_to: i32,
    pub currency: String,
    pub url: String,
}

/// Vacancy row before the store assigns its `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVacancy {
    pub employer_title: String,
    pub vacancies_title: String,
    pub area: String,
    pub salary_from: i32,
    pub salary_to: i32,
    pub currency: String,
    pub url: String,
}
