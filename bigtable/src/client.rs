//! The top-level public entry point: `BigtableClient`, constructed from a
//! `ClientConfig`, exposing row reads, single-row mutations, and bulk
//! mutations over one pooled connection to a single instance.
//!
//! Shaped after the teacher's `spanner::client::Client`/`ClientConfig` pair:
//! a thin façade that owns the connection pool and hands out pre-wired
//! policies to each operation.

use std::time::Duration;

use gcloud_bigtable_gax::conn::{ConnectionOptions, Environment};
use gcloud_bigtable_proto::bigtable::v2 as pb;

use crate::apiv1::bigtable_client::Client as ApiClient;
use crate::apiv1::conn_pool::ConnectionManager;
use crate::bulk_mutator::{fragment_by_mutation_count, BulkMutator, FailedMutation, MAX_MUTATIONS_PER_CALL};
use crate::error::Error;
use crate::mutation::SingleRowMutation;
use crate::reader::{read_row, RowReader, RowSet};
use crate::retry::{retryable, ExponentialBackoff, IdempotencyPolicy, LimitedCount, TableMetadataPolicy};
use crate::row::Row;

/// Channel-pool shaped configuration, separated from the rest of
/// `ClientConfig` the same way the teacher splits `ChannelConfig` out of
/// `spanner::client::ClientConfig`.
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub pool_size: usize,
    pub connection_options: ConnectionOptions,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            pool_size: 4,
            connection_options: ConnectionOptions {
                timeout: None,
                connect_timeout: Some(Duration::from_secs(20)),
                keep_alive_interval: Some(Duration::from_secs(30)),
            },
        }
    }
}

/// Bundles everything needed to construct a [`BigtableClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub project_id: String,
    pub instance_id: String,
    pub app_profile_id: String,
    pub channel_config: ChannelConfig,
    pub environment: Environment,
    pub max_retry_attempts: usize,
}

impl ClientConfig {
    /// `pool-size` below 1 is nonsensical (§6's floor); clamp defensively
    /// rather than let a malformed config silently build a pool of zero
    /// channels that can never hand out a connection.
    fn effective_pool_size(&self) -> usize {
        self.channel_config.pool_size.max(1)
    }

    fn instance_name(&self) -> String {
        format!(
            "projects/{}/instances/{}",
            self.project_id, self.instance_id
        )
    }

    fn table_name(&self, table_id: &str) -> String {
        format!("{}/tables/{}", self.instance_name(), table_id)
    }
}

/// A client for reading and writing rows in one Bigtable instance.
///
/// Safe to use concurrently from multiple tasks; the underlying channel
/// pool is shared, but every operation clones its own policy state.
pub struct BigtableClient {
    conn_pool: ConnectionManager,
    config: ClientConfig,
}

impl BigtableClient {
    pub async fn new(config: ClientConfig) -> Result<Self, Error> {
        let conn_pool = ConnectionManager::new(
            config.effective_pool_size(),
            config.environment.clone(),
            config.channel_config.connection_options.clone(),
        );
        // Exercise the pool once at construction so configuration errors
        // (a bad endpoint, an unreachable emulator) surface immediately
        // rather than on the caller's first operation.
        conn_pool.client().await?;
        Ok(BigtableClient { conn_pool, config })
    }

    async fn api_client(&self) -> Result<ApiClient, Error> {
        Ok(ApiClient::new(self.conn_pool.client().await?))
    }

    fn retry_policy(&self) -> impl crate::retry::RetryPolicy<Error> + Clone {
        retryable(LimitedCount::new(self.config.max_retry_attempts))
    }

    fn backoff_policy(&self) -> ExponentialBackoff {
        ExponentialBackoff::default()
    }

    /// Reads one row by key, or `None` if it does not exist.
    pub async fn read_row(
        &self,
        table_id: &str,
        row_key: impl Into<Vec<u8>>,
        filter: Option<pb::RowFilter>,
    ) -> Result<Option<Row>, Error> {
        let client = self.api_client().await?;
        read_row(
            client,
            self.config.table_name(table_id),
            self.config.app_profile_id.clone(),
            row_key,
            filter,
        )
        .await
    }

    /// Opens a streaming read over `row_set`, returning a reader that
    /// restarts transparently on a retryable mid-stream failure.
    pub async fn read_rows(
        &self,
        table_id: &str,
        row_set: RowSet,
        filter: Option<pb::RowFilter>,
        row_limit: Option<i64>,
    ) -> Result<RowReader<impl crate::retry::RetryPolicy<Error>, ExponentialBackoff>, Error> {
        let client = self.api_client().await?;
        Ok(RowReader::new(
            client,
            self.config.table_name(table_id),
            self.config.app_profile_id.clone(),
            row_set,
            filter,
            row_limit,
            self.retry_policy(),
            self.backoff_policy(),
        ))
    }

    /// Applies a single row's mutations with full retry, succeeding or
    /// failing as one unit.
    pub async fn mutate_row(
        &self,
        table_id: &str,
        mutation: SingleRowMutation,
    ) -> Result<(), Error> {
        let mut client = self.api_client().await?;
        let metadata = TableMetadataPolicy::new(self.config.table_name(table_id));
        let request = pb::MutateRowRequest {
            table_name: self.config.table_name(table_id),
            app_profile_id: self.config.app_profile_id.clone(),
            row_key: mutation.row_key.into(),
            mutations: mutation.mutations.into_iter().map(Into::into).collect(),
        };
        client
            .mutate_row(request, &metadata, self.retry_policy(), self.backoff_policy())
            .await?;
        Ok(())
    }

    /// Applies a batch of per-row mutations, fragmenting ahead of the
    /// service's per-call mutation-count limit (§4.7) — the sum of each
    /// entry's `Mutation`s, not the entry count — so a single `BulkMutator`
    /// attempt always stays within it. Fragments run sequentially so a
    /// failure's `original_index` reflects the caller's full, unfragmented
    /// ordering.
    pub async fn mutate_rows(
        &self,
        table_id: &str,
        bulk: Vec<SingleRowMutation>,
        idempotency_policy: &impl IdempotencyPolicy,
    ) -> Result<Vec<FailedMutation>, Error> {
        let mut client = self.api_client().await?;
        let table_name = self.config.table_name(table_id);
        let mut failures = Vec::new();
        let mut base_index = 0usize;
        for fragment in fragment_by_mutation_count(&bulk, MAX_MUTATIONS_PER_CALL) {
            let fragment_len = fragment.len();
            let mutator = BulkMutator::new(
                table_name.clone(),
                self.config.app_profile_id.clone(),
                fragment,
                idempotency_policy,
            )?;
            let fragment_failures = mutator
                .run(&mut client, self.retry_policy(), self.backoff_policy())
                .await;
            failures.extend(fragment_failures.into_iter().map(|mut f| {
                f.original_index += base_index;
                f
            }));
            base_index += fragment_len;
        }
        Ok(failures)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            project_id: String::new(),
            instance_id: String::new(),
            app_profile_id: String::new(),
            channel_config: ChannelConfig::default(),
            environment: Environment::Emulator("localhost:8086".to_string()),
            max_retry_attempts: 5,
        }
    }
}
