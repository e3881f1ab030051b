use agrilink::utils::{logger, validation::Validate};
use agrilink::{
    AppConfig, CliConfig, CropStatus, MarketStore, VerificationDecision,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose);

    tracing::info!("Starting agrilink store demo");

    let app_config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Err(e) = app_config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let mut store = MarketStore::new(app_config.store_config());

    if app_config.seed_enabled() && !cli.no_seed {
        agrilink::seed_sample_data(&mut store)?;
    }

    // Scripted agent flow: approve the first crop still awaiting verification.
    let pending = store
        .crops()
        .iter()
        .find(|c| c.status == CropStatus::Pending)
        .map(|c| c.id.clone());
    match pending {
        Some(crop_id) => {
            let outcome =
                store.complete_verification(&crop_id, VerificationDecision::Approve, None)?;
            tracing::info!(
                "verified crop {} ({}), task completed: {}",
                outcome.crop.id,
                outcome.crop.crop_name,
                outcome.task.is_some()
            );
        }
        None => tracing::info!("no crops awaiting verification"),
    }

    tracing::info!(
        "store holds {} users, {} crops, {} contracts, {} verification tasks",
        store.users().len(),
        store.crops().len(),
        store.contracts().len(),
        store.verification_tasks().len()
    );

    if let Some(path) = &cli.export {
        let json = store.export_json()?;
        std::fs::write(path, json)?;
        println!("Snapshot written to: {}", path);
    }

    Ok(())
}
