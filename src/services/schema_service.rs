use serde::Serialize;
use sqlx::Executor;
use tracing::{info, instrument, warn};

use crate::database::session::{quote_identifier, Session};
use crate::error::{sqlstate, Error, Result};

const DUPLICATE_DATABASE: &str = "42P04";
const DUPLICATE_TABLE: &str = "42P07";

const CREATE_EMPLOYERS: &str = r#"
    CREATE TABLE employers (
        employer_id INTEGER PRIMARY KEY,
        employer_title VARCHAR(255) NOT NULL,
        employer_url TEXT NOT NULL,
        open_vacancies INTEGER NOT NULL
    )
"#;

const CREATE_VACANCIES: &str = r#"
    CREATE TABLE vacancies (
        id SERIAL PRIMARY KEY,
        employer_title VARCHAR(255) NOT NULL,
        vacancies_title TEXT NOT NULL,
        area VARCHAR(255) NOT NULL,
        salary_from INTEGER NOT NULL,
        salary_to INTEGER NOT NULL,
        currency VARCHAR(255) NOT NULL,
        url TEXT NOT NULL
    )
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionOutcome {
    Created,
    AlreadyExistsAndReplaced,
}

#[derive(Clone, Default)]
pub struct SchemaService;

impl SchemaService {
    pub fn new() -> Self {
        Self
    }

    /// Creates `name` from scratch, dropping an existing database of that name.
    ///
    /// The session must be bound to some other database (usually `postgres`).
    #[instrument(skip(self, session), fields(via = %session.database()))]
    pub async fn provision_database(
        &self,
        session: &mut Session,
        name: &str,
    ) -> Result<ProvisionOutcome> {
        if session.database() == name {
            return Err(Error::Provision(format!(
                "cannot provision '{}' through a session connected to it",
                name
            )));
        }

        let ident = quote_identifier(name)?;
        let create = format!("CREATE DATABASE {}", ident);

        match session.conn().execute(create.as_str()).await {
            Ok(_) => {
                info!(database = name, "Database created");
                Ok(ProvisionOutcome::Created)
            }
            Err(err) if sqlstate(&err).as_deref() == Some(DUPLICATE_DATABASE) => {
                warn!(database = name, "Database already exists, dropping and recreating");

                let drop = format!("DROP DATABASE {}", ident);
                session
                    .conn()
                    .execute(drop.as_str())
                    .await
                    .map_err(|e| provision_failure(name, "drop", e))?;
                session
                    .conn()
                    .execute(create.as_str())
                    .await
                    .map_err(|e| provision_failure(name, "create", e))?;

                info!(database = name, "Database replaced");
                Ok(ProvisionOutcome::AlreadyExistsAndReplaced)
            }
            Err(err) => Err(provision_failure(name, "create", err)),
        }
    }

    /// Creates `employers` and `vacancies`. Fails if either already exists.
    #[instrument(skip(self, session), fields(database = %session.database()))]
    pub async fn create_schema(&self, session: &mut Session) -> Result<()> {
        for (table, ddl) in [("employers", CREATE_EMPLOYERS), ("vacancies", CREATE_VACANCIES)] {
            session
                .conn()
                .execute(ddl)
                .await
                .map_err(|e| schema_failure(table, e))?;
        }

        info!("Tables employers and vacancies created");
        Ok(())
    }
}

fn provision_failure(database: &str, step: &str, err: sqlx::Error) -> Error {
    Error::Provision(format!("failed to {} database '{}': {}", step, database, err))
}

fn schema_failure(table: &str, err: sqlx::Error) -> Error {
    if sqlstate(&err).as_deref() == Some(DUPLICATE_TABLE) {
        Error::Schema(format!("table '{}' already exists", table))
    } else {
        Error::Schema(format!("failed to create table '{}': {}", table, err))
    }
}
