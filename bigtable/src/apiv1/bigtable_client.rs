//! Thin wrapper over the generated [`BigtableClient`] stub that threads the
//! retry/backoff/metadata policies through the three unary data-plane RPCs.
//! The three streaming RPCs (`read_rows`, `mutate_rows`, `sample_row_keys`)
//! are exposed unwrapped: [`crate::reader::RowReader`] and
//! [`crate::bulk_mutator::BulkMutator`] own their own restart/retry loops
//! around the raw stream, since a single `invoke` wrapping an entire stream
//! would retry the whole thing on a partial failure instead of resuming it.

use gcloud_bigtable_gax::conn::Channel;
use gcloud_bigtable_gax::retry::{invoke, BackoffPolicy, MetadataPolicy, RetryPolicy};
use gcloud_bigtable_proto::bigtable::v2 as pb;
use gcloud_bigtable_proto::bigtable::v2::bigtable_client::BigtableClient;

use crate::error::Error;
use crate::retry::TableMetadataPolicy;

#[derive(Debug)]
pub struct Client {
    inner: BigtableClient<Channel>,
}

impl Client {
    pub fn new(inner: BigtableClient<Channel>) -> Self {
        Client { inner }
    }

    pub async fn mutate_row(
        &mut self,
        req: pb::MutateRowRequest,
        metadata: &TableMetadataPolicy,
        retry: impl RetryPolicy<Error>,
        backoff: impl BackoffPolicy<Error>,
    ) -> Result<pb::MutateRowResponse, Error> {
        invoke(None, retry, backoff, || {
            let req = req.clone();
            async {
                let mut request = tonic::Request::new(req);
                metadata.setup(&mut request);
                self.inner
                    .mutate_row(request)
                    .await
                    .map(|r| r.into_inner())
                    .map_err(Error::from)
            }
        })
        .await
    }

    pub async fn check_and_mutate_row(
        &mut self,
        req: pb::CheckAndMutateRowRequest,
        metadata: &TableMetadataPolicy,
        retry: impl RetryPolicy<Error>,
        backoff: impl BackoffPolicy<Error>,
    ) -> Result<pb::CheckAndMutateRowResponse, Error> {
        invoke(None, retry, backoff, || {
            let req = req.clone();
            async {
                let mut request = tonic::Request::new(req);
                metadata.setup(&mut request);
                self.inner
                    .check_and_mutate_row(request)
                    .await
                    .map(|r| r.into_inner())
                    .map_err(Error::from)
            }
        })
        .await
    }

    pub async fn read_modify_write_row(
        &mut self,
        req: pb::ReadModifyWriteRowRequest,
        metadata: &TableMetadataPolicy,
        retry: impl RetryPolicy<Error>,
        backoff: impl BackoffPolicy<Error>,
    ) -> Result<pb::ReadModifyWriteRowResponse, Error> {
        invoke(None, retry, backoff, || {
            let req = req.clone();
            async {
                let mut request = tonic::Request::new(req);
                metadata.setup(&mut request);
                self.inner
                    .read_modify_write_row(request)
                    .await
                    .map(|r| r.into_inner())
                    .map_err(Error::from)
            }
        })
        .await
    }

    pub async fn read_rows(
        &mut self,
        req: pb::ReadRowsRequest,
    ) -> Result<tonic::Response<tonic::Streaming<pb::ReadRowsResponse>>, tonic::Status> {
        self.inner.read_rows(req).await
    }

    pub async fn mutate_rows(
        &mut self,
        req: pb::MutateRowsRequest,
    ) -> Result<tonic::Response<tonic::Streaming<pb::MutateRowsResponse>>, tonic::Status> {
        self.inner.mutate_rows(req).await
    }

    pub async fn sample_row_keys(
        &mut self,
        req: pb::SampleRowKeysRequest,
    ) -> Result<tonic::Response<tonic::Streaming<pb::SampleRowKeysResponse>>, tonic::Status> {
        self.inner.sample_row_keys(req).await
    }
}
