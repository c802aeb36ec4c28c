use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::database::Session;
use crate::dto::employer_dto::EmployerRecord;
use crate::dto::vacancy_dto::VacancyRecord;
use crate::error::{Error, Result};
use crate::models::employer::Employer;
use crate::models::vacancy::{NewVacancy, Vacancy};

const INSERT_EMPLOYER: &str = r#"
    INSERT INTO employers (employer_id, employer_title, employer_url, open_vacancies)
    VALUES ($1, $2, $3, $4)
    RETURNING employer_id, employer_title, employer_url, open_vacancies
"#;

const INSERT_VACANCY: &str = r#"
    INSERT INTO vacancies (employer_title, vacancies_title, area,
                           salary_from, salary_to, currency, url)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, employer_title, vacancies_title, area, salary_from, salary_to, currency, url
"#;

/// Rows as stored by one `insert_batch` call, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub employers: Vec<Employer>,
    pub vacancies: Vec<Vacancy>,
}

#[derive(Clone, Default)]
pub struct IngestService;

impl IngestService {
    pub fn new() -> Self {
        Self
    }

    /// Appends every employer, then every vacancy, one statement per row.
    ///
    /// Employer records are validated before anything is written. A failing
    /// row aborts the call; rows written before it are kept.
    #[instrument(
        skip_all,
        fields(
            database = %session.database(),
            employers = employers.len(),
            vacancies = vacancies.len()
        )
    )]
    pub async fn insert_batch(
        &self,
        session: &mut Session,
        employers: &[EmployerRecord],
        vacancies: &[VacancyRecord],
    ) -> Result<IngestReport> {
        for record in employers {
            record
                .validate()
                .map_err(|e| Error::insert(record.label(), e))?;
        }

        let mut report = IngestReport {
            employers: Vec::with_capacity(employers.len()),
            vacancies: Vec::with_capacity(vacancies.len()),
        };

        for record in employers {
            let row = Employer::from(record.clone());
            let stored = sqlx::query_as::<_, Employer>(INSERT_EMPLOYER)
                .bind(row.employer_id)
                .bind(&row.employer_title)
                .bind(&row.employer_url)
                .bind(row.open_vacancies)
                .fetch_one(session.conn())
                .await
                .map_err(|e| Error::insert(record.label(), e))?;
            debug!(employer_id = stored.employer_id, "Employer inserted");
            report.employers.push(stored);
        }

        for (index, record) in vacancies.iter().enumerate() {
            let row = NewVacancy::from(record.clone());
            let stored = sqlx::query_as::<_, Vacancy>(INSERT_VACANCY)
                .bind(&row.employer_title)
                .bind(&row.vacancies_title)
                .bind(&row.area)
                .bind(row.salary_from)
                .bind(row.salary_to)
                .bind(&row.currency)
                .bind(&row.url)
                .fetch_one(session.conn())
                .await
                .map_err(|e| Error::insert(record.label(index), e))?;
            debug!(id = stored.id, "Vacancy inserted");
            report.vacancies.push(stored);
        }

        info!(
            employers = report.employers.len(),
            vacancies = report.vacancies.len(),
            "Batch inserted"
        );
        Ok(report)
    }
}

pub async fn load_employers(path: impl AsRef<Path>) -> Result<Vec<EmployerRecord>> {
    load_records(path.as_ref()).await
}

pub async fn load_vacancies(path: impl AsRef<Path>) -> Result<Vec<VacancyRecord>> {
    load_records(path.as_ref()).await
}

async fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = tokio::fs::read(path).await?;
    let records: Vec<T> = serde_json::from_slice(&raw)?;
    debug!(path = %path.display(), count = records.len(), "Records loaded");
    Ok(records)
}
