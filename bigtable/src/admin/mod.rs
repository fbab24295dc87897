//! CRUD surface over the Table Admin API.
//!
//! Schema mutation (`create_table`/`delete_table`) is a single pass with no
//! retry, since a partially-applied schema change must not be silently
//! repeated; `get_table`/`list_tables` go through the same retry/backoff and
//! metadata substrate as the data client, per §4.3.1. Grounded on the
//! teacher's `spanner::admin::database::DatabaseAdminClient`, whose
//! `default_setting`/`invoke_reuse`/`create_request` trio this mirrors.

use gcloud_bigtable_gax::conn::{Channel, ConnectionOptions, Environment};
use gcloud_bigtable_gax::retry::{
    default_retryable_codes, CodeFiltered, ExponentialBackoff, LimitedCount, RetryPolicy, TryAs,
};
use gcloud_bigtable_gax::status::Status;
use gcloud_bigtable_proto::bigtable::admin::v2 as pb;
use gcloud_bigtable_proto::bigtable::admin::v2::bigtable_table_admin_client::BigtableTableAdminClient;

const ADMIN_ENDPOINT: &str = "https://bigtableadmin.googleapis.com";
const DOMAIN_NAME: &str = "bigtableadmin.googleapis.com";

/// One column family's definition, as accepted by `create_table`.
#[derive(Clone, Debug, Default)]
pub struct ColumnFamily {
    pub gc_max_num_versions: Option<i32>,
    pub gc_max_age_seconds: Option<i64>,
}

impl From<ColumnFamily> for pb::ColumnFamily {
    fn from(value: ColumnFamily) -> Self {
        let rule = match (value.gc_max_num_versions, value.gc_max_age_seconds) {
            (Some(n), _) => Some(pb::gc_rule::Rule::MaxNumVersions(n)),
            (None, Some(seconds)) => Some(pb::gc_rule::Rule::MaxAge(prost_types::Duration {
                seconds,
                nanos: 0,
            })),
            (None, None) => None,
        };
        pb::ColumnFamily {
            gc_rule: rule.map(|rule| pb::GcRule { rule: Some(rule) }),
        }
    }
}

/// A table's metadata as reported by `get_table`/`list_tables`.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub column_families: std::collections::HashMap<String, ColumnFamily>,
}

impl From<pb::Table> for Table {
    fn from(value: pb::Table) -> Self {
        Table {
            name: value.name,
            column_families: value
                .column_families
                .into_iter()
                .map(|(name, family)| {
                    let (max_num_versions, max_age_seconds) = match family.gc_rule.and_then(|r| r.rule) {
                        Some(pb::gc_rule::Rule::MaxNumVersions(n)) => (Some(n), None),
                        Some(pb::gc_rule::Rule::MaxAge(d)) => (None, Some(d.seconds)),
                        None => (None, None),
                    };
                    (
                        name,
                        ColumnFamily {
                            gc_max_num_versions: max_num_versions,
                            gc_max_age_seconds: max_age_seconds,
                        },
                    )
                })
                .collect(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Status(#[from] Status),
    #[error(transparent)]
    Connection(#[from] gcloud_bigtable_gax::conn::Error),
    #[error(transparent)]
    Transport(#[from] tonic::transport::Error),
}

impl From<tonic::Status> for Error {
    fn from(value: tonic::Status) -> Self {
        Error::Status(Status::from(value))
    }
}

impl TryAs<Status> for Error {
    fn try_as(&self) -> Result<&Status, ()> {
        match self {
            Error::Status(s) => Ok(s),
            _ => Err(()),
        }
    }
}

/// A connection to the Table Admin service. Unlike the data-plane client,
/// this holds a single channel rather than a pool: admin operations are
/// low-frequency and do not need load spreading.
pub struct TableAdminClient {
    inner: BigtableTableAdminClient<Channel>,
    max_retry_attempts: usize,
}

impl TableAdminClient {
    pub async fn new(
        environment: Environment,
        conn_options: ConnectionOptions,
    ) -> Result<Self, Error> {
        let endpoint_uri = match &environment {
            Environment::Emulator(host) => format!("http://{host}"),
            Environment::Backend(_) => ADMIN_ENDPOINT.to_string(),
        };
        let manager = gcloud_bigtable_gax::conn::ConnectionManager::new(
            1,
            endpoint_uri,
            DOMAIN_NAME,
            environment,
            conn_options,
        );
        let channel = manager.conn().await?;
        Ok(TableAdminClient {
            inner: BigtableTableAdminClient::new(channel),
            max_retry_attempts: 5,
        })
    }

    fn retry_policy(&self) -> impl RetryPolicy<Error> + Clone {
        CodeFiltered::new(default_retryable_codes(), LimitedCount::new(self.max_retry_attempts))
    }

    fn backoff_policy(&self) -> ExponentialBackoff {
        ExponentialBackoff::default()
    }

    /// Schema mutation: applied at most once, since retrying a create that
    /// may have already succeeded server-side risks a spurious
    /// already-exists failure masking the original success.
    pub async fn create_table(
        &mut self,
        instance_name: &str,
        table_id: &str,
        column_families: std::collections::HashMap<String, ColumnFamily>,
    ) -> Result<Table, Error> {
        let table = pb::Table {
            name: String::new(),
            column_families: column_families.into_iter().map(|(k, v)| (k, v.into())).collect(),
            granularity: pb::table::Granularity::Millis as i32,
        };
        let request = gcloud_bigtable_gax::create_request(
            format!("parent={instance_name}"),
            pb::CreateTableRequest {
                parent: instance_name.to_string(),
                table_id: table_id.to_string(),
                table: Some(table),
            },
        );
        let response = self.inner.create_table(request).await?;
        Ok(response.into_inner().into())
    }

    pub async fn get_table(&mut self, table_name: &str) -> Result<Table, Error> {
        let retry = self.retry_policy();
        let backoff = self.backoff_policy();
        let response = gcloud_bigtable_gax::retry::invoke(None, retry, backoff, || {
            let request = gcloud_bigtable_gax::create_request(
                format!("name={table_name}"),
                pb::GetTableRequest {
                    name: table_name.to_string(),
                },
            );
            async {
                self.inner
                    .get_table(request)
                    .await
                    .map(|r| r.into_inner())
                    .map_err(Error::from)
            }
        })
        .await?;
        Ok(response.into())
    }

    /// Schema mutation: applied at most once (see [`Self::create_table`]).
    pub async fn delete_table(&mut self, table_name: &str) -> Result<(), Error> {
        let request = gcloud_bigtable_gax::create_request(
            format!("name={table_name}"),
            pb::DeleteTableRequest {
                name: table_name.to_string(),
            },
        );
        self.inner.delete_table(request).await?;
        Ok(())
    }

    /// Lists every table under `instance_name`, following `next_page_token`
    /// until the server stops returning one. Each page fetch is retried
    /// independently; a failure partway through preserves the pages already
    /// accumulated and only retries the page that failed.
    pub async fn list_tables(&mut self, instance_name: &str) -> Result<Vec<Table>, Error> {
        let mut tables = Vec::new();
        let mut page_token = String::new();
        loop {
            let retry = self.retry_policy();
            let backoff = self.backoff_policy();
            let page_token_for_call = page_token.clone();
            let response = gcloud_bigtable_gax::retry::invoke(None, retry, backoff, || {
                let request = gcloud_bigtable_gax::create_request(
                    format!("parent={instance_name}"),
                    pb::ListTablesRequest {
                        parent: instance_name.to_string(),
                        page_token: page_token_for_call.clone(),
                    },
                );
                async {
                    self.inner
                        .list_tables(request)
                        .await
                        .map(|r| r.into_inner())
                        .map_err(Error::from)
                }
            })
            .await?;
            let next_page_token = ingest_list_tables_page(&mut tables, response);
            match next_page_token {
                Some(token) => page_token = token,
                None => break,
            }
        }
        Ok(tables)
    }
}

/// Appends one `ListTablesResponse` page's tables to `tables`, returning the
/// next page's token, or `None` once the server reports no further pages.
/// Pulled out of `list_tables`'s loop so the accumulation/termination logic
/// is testable without a live server.
fn ingest_list_tables_page(tables: &mut Vec<Table>, response: pb::ListTablesResponse) -> Option<String> {
    tables.extend(response.tables.into_iter().map(Table::from));
    if response.next_page_token.is_empty() {
        None
    } else {
        Some(response.next_page_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> pb::Table {
        pb::Table {
            name: name.to_string(),
            column_families: std::collections::HashMap::new(),
            granularity: pb::table::Granularity::Millis as i32,
        }
    }

    /// A two-page `list_tables` response accumulates across both pages and
    /// stops once the server returns an empty `next_page_token`.
    #[test]
    fn list_tables_pagination_accumulates_across_pages_and_terminates() {
        let mut tables = Vec::new();

        let page_one = pb::ListTablesResponse {
            tables: vec![table("a"), table("b")],
            next_page_token: "page-2".to_string(),
        };
        let next = ingest_list_tables_page(&mut tables, page_one);
        assert_eq!(next, Some("page-2".to_string()));
        assert_eq!(tables.len(), 2);

        let page_two = pb::ListTablesResponse {
            tables: vec![table("c")],
            next_page_token: String::new(),
        };
        let next = ingest_list_tables_page(&mut tables, page_two);
        assert_eq!(next, None);

        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
