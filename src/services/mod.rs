pub mod ingest_service;
pub mod query_service;
pub mod schema_service;
