use anyhow::Context;

use crate::cli::CheckArgs;
use crate::source::Snapshot;
use crate::storage::StoragePaths;

pub fn run(opts: CheckArgs) -> anyhow::Result<()> {
    tracing::info!("data_dir={}", opts.data_dir);
    let paths = StoragePaths::new(&opts.data_dir);
    let snapshot = Snapshot::load(&paths).context("load data snapshot")?;

    let summary = snapshot.summary();
    if summary.county_claims == 0 {
        tracing::warn!("No county claims rows; county endpoints will return nothing");
    }
    if summary.specialty_standards == 0 {
        tracing::warn!("No specialty standards; specialty density reports will be empty");
    }
    tracing::info!("Snapshot OK");
    Ok(())
}
