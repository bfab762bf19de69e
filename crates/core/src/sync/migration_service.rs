use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::Result;
use crate::store::{LocalSnapshotStoreTrait, RemoteStoreTrait};
use crate::sync::{
    reconcile_categories, remap_transactions, CloudData, LocalBackup, LocalDataSummary,
    MigrationError, MigrationPhase, MigrationResult, MigrationWarning,
};

/// Tracks one attempt's phase and what it has committed so far.
struct MigrationAttempt {
    id: String,
    phase: MigrationPhase,
    categories_migrated: usize,
    warnings: Vec<MigrationWarning>,
}

impl MigrationAttempt {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phase: MigrationPhase::NotStarted,
            categories_migrated: 0,
            warnings: Vec::new(),
        }
    }

    fn enter(&mut self, phase: MigrationPhase) {
        debug!("[Migration {}] {} -> {}", self.id, self.phase, phase);
        self.phase = phase;
    }
}

/// Moves the local snapshot into the hosted store and reads it back.
pub struct MigrationService {
    remote: Arc<dyn RemoteStoreTrait>,
    local: Arc<dyn LocalSnapshotStoreTrait>,
}

impl MigrationService {
    pub fn new(remote: Arc<dyn RemoteStoreTrait>, local: Arc<dyn LocalSnapshotStoreTrait>) -> Self {
        Self { remote, local }
    }

    /// Counts local records without touching them. Unreadable storage counts
    /// as empty.
    pub fn check_for_local_data(&self) -> LocalDataSummary {
        let transaction_count = self.local.read_raw_transactions().map_or_else(
            |e| {
                warn!("Could not read local transactions: {}", e);
                0
            },
            |records| records.len(),
        );
        let category_count = self.local.read_raw_categories().map_or_else(
            |e| {
                warn!("Could not read local categories: {}", e);
                0
            },
            |records| records.len(),
        );
        LocalDataSummary::new(transaction_count, category_count)
    }

    /// Runs one migration attempt and reports its outcome.
    ///
    /// Never retries. On failure the caller must keep the local snapshot and
    /// may start a new attempt from the top.
    pub async fn migrate_local_data_to_cloud(&self) -> MigrationResult {
        let mut attempt = MigrationAttempt::new();
        info!("[Migration {}] Starting local data migration", attempt.id);

        match self.run_migration(&mut attempt).await {
            Ok(transactions_migrated) => {
                attempt.enter(MigrationPhase::Succeeded);
                info!(
                    "[Migration {}] Migrated {} categories and {} transactions ({} skipped)",
                    attempt.id,
                    attempt.categories_migrated,
                    transactions_migrated,
                    attempt.warnings.len()
                );
                MigrationResult::succeeded(
                    attempt.id,
                    attempt.categories_migrated,
                    transactions_migrated,
                    attempt.warnings,
                )
            }
            Err(err) => {
                let failed_phase = attempt.phase;
                attempt.enter(MigrationPhase::Failed);
                error!(
                    "[Migration {}] Error migrating data during {}: {}",
                    attempt.id, failed_phase, err
                );
                MigrationResult::failed(
                    attempt.id,
                    failed_phase,
                    attempt.categories_migrated,
                    attempt.warnings,
                    &err,
                )
            }
        }
    }

    async fn run_migration(
        &self,
        attempt: &mut MigrationAttempt,
    ) -> std::result::Result<usize, MigrationError> {
        attempt.enter(MigrationPhase::ReadingSnapshot);
        let local_transactions = self
            .local
            .read_local_transactions()
            .map_err(|e| MigrationError::LocalSnapshot(e.to_string()))?;
        let local_categories = self
            .local
            .read_local_categories()
            .map_err(|e| MigrationError::LocalSnapshot(e.to_string()))?;
        debug!(
            "[Migration {}] Local snapshot: {} categories, {} transactions",
            attempt.id,
            local_categories.len(),
            local_transactions.len()
        );

        attempt.enter(MigrationPhase::ReconcilingCategories);
        let reconciliation = reconcile_categories(self.remote.as_ref(), &local_categories).await?;
        attempt.categories_migrated = reconciliation.created.len();

        attempt.enter(MigrationPhase::RemappingTransactions);
        let remapped = remap_transactions(&local_transactions, &reconciliation.mapping);
        attempt.warnings = remapped.warnings;

        attempt.enter(MigrationPhase::Importing);
        if remapped.staged.is_empty() {
            return Ok(0);
        }
        let imported = self
            .remote
            .bulk_insert_transactions(remapped.staged)
            .await
            .map_err(|e| MigrationError::TransactionCreateFailure(e.to_string()))?;

        Ok(imported.len())
    }

    /// Fetches both remote collections concurrently.
    pub async fn sync_from_cloud(&self) -> Result<CloudData> {
        let (categories, transactions) = futures::try_join!(
            self.remote.list_categories(),
            self.remote.list_transactions()
        )
        .map_err(|e| {
            error!("Error syncing from cloud: {}", e);
            e
        })?;

        debug!(
            "Synced {} categories and {} transactions from cloud",
            categories.len(),
            transactions.len()
        );
        Ok(CloudData {
            categories,
            transactions,
        })
    }

    /// Copies the raw local records, e.g. to offer a download before migrating.
    pub fn backup_local_data(&self) -> Result<LocalBackup> {
        Ok(LocalBackup {
            transactions: self.local.read_raw_transactions()?,
            categories: self.local.read_raw_categories()?,
            timestamp: Utc::now(),
        })
    }

    /// Drops the local snapshot. Only call after a successful migration.
    pub fn clear_local_data(&self) -> Result<()> {
        self.local.clear_local_snapshot()
    }

    pub fn is_migration_completed(&self) -> Result<bool> {
        self.local.is_migration_completed()
    }

    pub fn mark_migration_completed(&self) -> Result<()> {
        self.local.set_migration_completed(true)
    }

    pub fn reset_migration_status(&self) -> Result<()> {
        self.local.set_migration_completed(false)
    }
}
