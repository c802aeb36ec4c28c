use crate::config::Credentials;
use crate::error::{Error, Result};
use sqlx::{postgres::PgConnectOptions, Connection, PgConnection};
use tracing::{debug, info};

/// One open connection to one database.
///
/// Every operation of the store takes the session explicitly. Statements run
/// outside any transaction, so each one commits as soon as it completes.
pub struct Session {
    conn: PgConnection,
    database: String,
}

impl Session {
    pub async fn connect(credentials: &Credentials, database: &str) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&credentials.host)
            .port(credentials.port)
            .username(&credentials.user)
            .password(&credentials.password)
            .database(database);

        let conn = PgConnection::connect_with(&options).await.map_err(|e| {
            Error::Connection(format!(
                "cannot connect to database '{}' at {}:{}: {}",
                database, credentials.host, credentials.port, e
            ))
        })?;

        info!(database, host = %credentials.host, port = credentials.port, "Connected");
        Ok(Self {
            conn,
            database: database.to_string(),
        })
    }

    pub async fn disconnect(self) -> Result<()> {
        let database = self.database;
        self.conn.close().await.map_err(|e| {
            Error::Connection(format!("failed to close connection to '{}': {}", database, e))
        })?;
        debug!(database = %database, "Disconnected");
        Ok(())
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

/// Quotes a database identifier for interpolation into DDL.
pub(crate) fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::Provision("database name must not be empty".to_string()));
    }
    if name.contains('\0') {
        return Err(Error::Provision(format!(
            "database name {:?} contains a NUL byte",
            name
        )));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_names() {
        assert_eq!(quote_identifier("hh_vacancies").unwrap(), "\"hh_vacancies\"");
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(
            quote_identifier("odd\"name").unwrap(),
            "\"odd\"\"name\""
        );
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(quote_identifier(""), Err(Error::Provision(_))));
    }
}
