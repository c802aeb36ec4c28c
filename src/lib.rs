pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::{Config, Credentials, DEFAULT_MAINTENANCE_DATABASE};
use crate::database::Session;
use crate::dto::{employer_dto::EmployerRecord, vacancy_dto::VacancyRecord};
use crate::error::Result;
use crate::services::{
    ingest_service::{IngestReport, IngestService},
    query_service::VacancyQueryService,
    schema_service::SchemaService,
};
use crate::utils::salary::SalaryPolicy;
use tracing::{info, warn};

/// Credentials plus the services that act on a [`Session`].
#[derive(Clone)]
pub struct DataStoreManager {
    pub credentials: Credentials,
    pub maintenance_database: String,
    pub schema_service: SchemaService,
    pub ingest_service: IngestService,
    pub query_service: VacancyQueryService,
}

impl DataStoreManager {
    pub fn new(credentials: Credentials, policy: SalaryPolicy) -> Self {
        Self {
            credentials,
            maintenance_database: DEFAULT_MAINTENANCE_DATABASE.to_string(),
            schema_service: SchemaService::new(),
            ingest_service: IngestService::new(),
            query_service: VacancyQueryService::new(policy),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            maintenance_database: config.maintenance_database.clone(),
            ..Self::new(config.credentials.clone(), SalaryPolicy::new(config.usd_rate))
        }
    }

    pub async fn connect(&self, database: &str) -> Result<Session> {
        Session::connect(&self.credentials, database).await
    }

    pub async fn connect_maintenance(&self) -> Result<Session> {
        self.connect(&self.maintenance_database).await
    }

    /// Rebuilds `database` and fills it with one batch.
    ///
    /// Each session opened here is disconnected before returning, whether or
    /// not the step it served succeeded.
    pub async fn run_ingestion(
        &self,
        database: &str,
        employers: &[EmployerRecord],
        vacancies: &[VacancyRecord],
    ) -> Result<IngestReport> {
        let mut admin = self.connect_maintenance().await?;
        let provisioned = self
            .schema_service
            .provision_database(&mut admin, database)
            .await;
        let outcome = finish(admin, provisioned).await?;
        info!(database, ?outcome, "Database provisioned");

        let mut session = self.connect(database).await?;
        let loaded = async {
            self.schema_service.create_schema(&mut session).await?;
            self.ingest_service
                .insert_batch(&mut session, employers, vacancies)
                .await
        }
        .await;
        finish(session, loaded).await
    }
}

/// Disconnects `session` and returns `result`. An error from the step itself
/// takes precedence over one from closing the connection.
async fn finish<T>(session: Session, result: Result<T>) -> Result<T> {
    let closed = session.disconnect().await;
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "Failed to close session after error");
            Err(err)
        }
    }
}
