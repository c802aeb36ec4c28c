use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::models::vacancy::NewVacancy;

/// Salary bounds arrive as `0` when unspecified; some fetchers send `null`
/// instead, which is folded into the same sentinel.
fn deserialize_salary_bound<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Vacancy as handed over by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub employer_name: String,
    pub name: String,
    pub area: String,
    #[serde(deserialize_with = "deserialize_salary_bound")]
    pub salary_from: i32,
    #[serde(deserialize_with = "deserialize_salary_bound")]
    pub salary_to: i32,
    pub currency: String,
    pub url: String,
}

/// Projection of a stored vacancy handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VacancyView {
    pub company_name: String,
    pub vacancy_name: String,
    pub salary_from: i32,
    pub salary_to: i32,
    pub currency: String,
    pub vacancy_url: String,
}

impl VacancyRecord {
    pub fn label(&self, index: usize) -> String {
        format!("vacancy #{} '{}'", index, self.name)
    }
}

impl VacancyView {
    pub fn title_contains(&self, keyword: &str) -> bool {
        self.vacancy_name.contains(keyword)
    }
}

impl From<VacancyRecord> for NewVacancy {
    fn from(value: VacancyRecord) -> Self {
        Self {
            employer_title: value.employer_name,
            vacancies_title: value.name,
            area: value.area,
            salary_from: value.salary_from,
            salary_to: value.salary_to,
            currency: value.currency,
            url: value.url,
        }
    }
}
