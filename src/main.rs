use tracing::info;
use tracing_subscriber::EnvFilter;
use vacancy_store::{
    config::{get_config, init_config},
    services::ingest_service::{load_employers, load_vacancies},
    DataStoreManager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    init_config()?;
    let config = get_config()?;

    let employers = load_employers(&config.employers_file).await?;
    let vacancies = load_vacancies(&config.vacancies_file).await?;
    info!(
        employers = employers.len(),
        vacancies = vacancies.len(),
        "Loaded fetcher output"
    );

    let manager = DataStoreManager::from_config(config);
    let report = manager
        .run_ingestion(&config.database_name, &employers, &vacancies)
        .await?;
    info!(
        employers = report.employers.len(),
        vacancies = report.vacancies.len(),
        database = %config.database_name,
        "Ingestion finished"
    );

    let mut session = manager.connect(&config.database_name).await?;
    let summary = async {
        let companies = manager.query_service.list_companies(&mut session).await?;
        let above = manager
            .query_service
            .vacancies_above_average(&mut session)
            .await?;
        let average = if report.vacancies.is_empty() {
            None
        } else {
            Some(manager.query_service.average_salary(&mut session).await?)
        };
        Ok::<_, vacancy_store::error::Error>((companies.len(), above.len(), average))
    }
    .await;
    session.disconnect().await?;

    let (companies, above, average) = summary?;
    match average {
        Some(average) => info!(companies, above_average = above, %average, "Store summary"),
        None => info!(companies, "Store summary: no vacancies stored"),
    }

    Ok(())
}
