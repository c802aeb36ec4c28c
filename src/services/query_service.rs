use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::database::Session;
use crate::dto::employer_dto::CompanySummary;
use crate::dto::vacancy_dto::VacancyView;
use crate::error::{Error, Result};
use crate::utils::salary::{meets_average, SalaryPolicy};

const LIST_COMPANIES: &str = r#"
    SELECT employer_title AS name, open_vacancies
    FROM employers
"#;

const LIST_VACANCIES: &str = r#"
    SELECT employer_title AS company_name,
           vacancies_title AS vacancy_name,
           salary_from,
           salary_to,
           currency,
           url AS vacancy_url
    FROM vacancies
    ORDER BY id
"#;

/// Read side of the store. Derived figures are computed in Rust over
/// [`VacancyQueryService::list_vacancies`], not in SQL.
#[derive(Clone, Default)]
pub struct VacancyQueryService {
    policy: SalaryPolicy,
}

impl VacancyQueryService {
    pub fn new(policy: SalaryPolicy) -> Self {
        Self { policy }
    }

    #[instrument(skip_all)]
    pub async fn list_companies(&self, session: &mut Session) -> Result<Vec<CompanySummary>> {
        let items = sqlx::query_as::<_, CompanySummary>(LIST_COMPANIES)
            .fetch_all(session.conn())
            .await?;
        debug!(count = items.len(), "Companies listed");
        Ok(items)
    }

    #[instrument(skip_all)]
    pub async fn list_vacancies(&self, session: &mut Session) -> Result<Vec<VacancyView>> {
        let items = sqlx::query_as::<_, VacancyView>(LIST_VACANCIES)
            .fetch_all(session.conn())
            .await?;
        debug!(count = items.len(), "Vacancies listed");
        Ok(items)
    }

    #[instrument(skip_all)]
    pub async fn average_salary(&self, session: &mut Session) -> Result<Decimal> {
        let vacancies = self.list_vacancies(session).await?;
        self.policy
            .average(&vacancies)
            .ok_or_else(|| Error::NoData("average salary requested on an empty vacancies table".to_string()))
    }

    /// Vacancies whose stored bounds reach the average salary. Returns an
    /// empty list for an empty table.
    #[instrument(skip_all)]
    pub async fn vacancies_above_average(&self, session: &mut Session) -> Result<Vec<VacancyView>> {
        let vacancies = self.list_vacancies(session).await?;
        let Some(average) = self.policy.average(&vacancies) else {
            return Ok(Vec::new());
        };

        debug!(%average, "Filtering by average salary");
        Ok(vacancies
            .into_iter()
            .filter(|v| meets_average(v.salary_from, v.salary_to, average))
            .collect())
    }

    #[instrument(skip(self, session))]
    pub async fn vacancies_matching_keyword(
        &self,
        session: &mut Session,
        keyword: &str,
    ) -> Result<Vec<VacancyView>> {
        let vacancies = self.list_vacancies(session).await?;
        Ok(vacancies
            .into_iter()
            .filter(|v| v.title_contains(keyword))
            .collect())
    }
}
