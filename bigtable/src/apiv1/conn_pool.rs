//! Builds the channel pool used by the data-plane client, pointed at either
//! the real Bigtable data endpoint or a local emulator.

use gcloud_bigtable_gax::conn::{ConnectionOptions, Environment};
use gcloud_bigtable_proto::bigtable::v2::bigtable_client::BigtableClient;

pub const DATA_ENDPOINT: &str = "https://bigtable.googleapis.com";
const DOMAIN_NAME: &str = "bigtable.googleapis.com";

pub struct ConnectionManager {
    inner: gcloud_bigtable_gax::conn::ConnectionManager,
}

impl ConnectionManager {
    pub fn new(
        pool_size: usize,
        environment: Environment,
        conn_options: ConnectionOptions,
    ) -> Self {
        let endpoint_uri = match &environment {
            Environment::Emulator(host) => format!("http://{host}"),
            Environment::Backend(_) => DATA_ENDPOINT.to_string(),
        };
        ConnectionManager {
            inner: gcloud_bigtable_gax::conn::ConnectionManager::new(
                pool_size,
                endpoint_uri,
                DOMAIN_NAME,
                environment,
                conn_options,
            ),
        }
    }

    pub async fn client(
        &self,
    ) -> Result<BigtableClient<gcloud_bigtable_gax::conn::Channel>, gcloud_bigtable_gax::conn::Error>
    {
        Ok(BigtableClient::new(self.inner.conn().await?))
    }

    pub async fn reset(&self) {
        self.inner.reset().await;
    }

    pub async fn num(&self) -> usize {
        self.inner.num().await
    }
}
