pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provision error: {0}")]
    Provision(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Insert error on {record}: {reason}")]
    Insert { record: String, reason: String },

    #[error("No data: {0}")]
    NoData(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn insert(record: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Insert {
            record: record.into(),
            reason: reason.to_string(),
        }
    }
}

/// SQLSTATE of a server-side error, if the error came from Postgres.
pub(crate) fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_error_names_the_record() {
        let err = Error::insert("employer #42", "duplicate key value");
        assert_eq!(
            err.to_string(),
            "Insert error on employer #42: duplicate key value"
        );
    }

    #[test]
    fn sqlstate_is_none_for_client_side_errors() {
        assert_eq!(sqlstate(&sqlx::Error::RowNotFound), None);
    }
}
