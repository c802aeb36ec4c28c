use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::employer::Employer;

/// Employer as handed over by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmployerRecord {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 0))]
    pub open_vacancies: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CompanySummary {
    pub name: String,
    pub open_vacancies: i32,
}

impl EmployerRecord {
    pub fn label(&self) -> String {
        format!("employer #{}", self.id)
    }
}

impl From<EmployerRecord> for Employer {
    fn from(value: EmployerRecord) -> Self {
        Self {
            employer_id: value.id,
            employer_title: value.name,
            employer_url: value.url,
            open_vacancies: value.open_vacancies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_fetcher_fields() {
        let record: EmployerRecord = serde_json::from_value(json!({
            "id": 1740,
            "name": "Яндекс",
            "url": "https://hh.ru/employer/1740",
            "open_vacancies": 1023
        }))
        .unwrap();

        let employer = Employer::from(record);
        assert_eq!(employer.employer_id, 1740);
        assert_eq!(employer.employer_title, "Яндекс");
        assert_eq!(employer.employer_url, "https://hh.ru/employer/1740");
        assert_eq!(employer.open_vacancies, 1023);
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = serde_json::from_value::<EmployerRecord>(json!({
            "id": 1,
            "name": "Acme",
            "open_vacancies": 3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_blank_name_and_negative_count() {
        let record = EmployerRecord {
            id: 7,
            name: String::new(),
            url: "https://hh.ru/employer/7".into(),
            open_vacancies: -1,
        };
        let errors = record.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("open_vacancies"));
        assert!(!fields.contains_key("url"));
    }
}
