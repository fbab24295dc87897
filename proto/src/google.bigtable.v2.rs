/// Specifies a contiguous range of rows.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RowRange {
    #[prost(oneof = "row_range::StartKey", tags = "1, 2")]
    pub start_key: ::core::option::Option<row_range::StartKey>,
    #[prost(oneof = "row_range::EndKey", tags = "3, 4")]
    pub end_key: ::core::option::Option<row_range::EndKey>,
}
/// Nested message and enum types in `RowRange`.
pub mod row_range {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum StartKey {
        #[prost(bytes, tag = "1")]
        StartKeyClosed(::prost::bytes::Bytes),
        #[prost(bytes, tag = "2")]
        StartKeyOpen(::prost::bytes::Bytes),
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum EndKey {
        #[prost(bytes, tag = "3")]
        EndKeyClosed(::prost::bytes::Bytes),
        #[prost(bytes, tag = "4")]
        EndKeyOpen(::prost::bytes::Bytes),
    }
}
/// Specifies a non-contiguous set of rows.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RowSet {
    #[prost(bytes = "bytes", repeated, tag = "1")]
    pub row_keys: ::prost::alloc::vec::Vec<::prost::bytes::Bytes>,
    #[prost(message, repeated, tag = "2")]
    pub row_ranges: ::prost::alloc::vec::Vec<RowRange>,
}
/// An inclusive-exclusive range of `timestamp_micros` values, for
/// `DeleteFromColumn` mutations and time-bounded reads.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimestampRange {
    #[prost(int64, tag = "1")]
    pub start_timestamp_micros: i64,
    #[prost(int64, tag = "2")]
    pub end_timestamp_micros: i64,
}
/// A predicate pushed down to the server to filter and transform the cells
/// returned by a read. The library treats the set of variants as opaque;
/// only enough are modeled here to exercise the request/response plumbing.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RowFilter {
    #[prost(oneof = "row_filter::Filter", tags = "1, 2, 3, 4, 5")]
    pub filter: ::core::option::Option<row_filter::Filter>,
}
/// Nested message and enum types in `RowFilter`.
pub mod row_filter {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Chain {
        #[prost(message, repeated, tag = "1")]
        pub filters: ::prost::alloc::vec::Vec<super::RowFilter>,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Interleave {
        #[prost(message, repeated, tag = "1")]
        pub filters: ::prost::alloc::vec::Vec<super::RowFilter>,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Filter {
        #[prost(message, tag = "1")]
        Chain(Chain),
        #[prost(message, tag = "2")]
        Interleave(Interleave),
        #[prost(bytes, tag = "3")]
        RowKeyRegexFilter(::prost::bytes::Bytes),
        #[prost(int32, tag = "4")]
        CellsPerRowLimitFilter(i32),
        #[prost(bool, tag = "5")]
        PassAllFilter(bool),
    }
}
/// One cell's worth of data, possibly split across several `ReadRowsResponse`
/// chunks so that no single response frame has to hold an entire large value.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CellChunk {
    /// The row key, present only on the first chunk of a new row.
    #[prost(bytes = "bytes", tag = "1")]
    pub row_key: ::prost::bytes::Bytes,
    #[prost(string, optional, tag = "2")]
    pub family_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "bytes", optional, tag = "3")]
    pub qualifier: ::core::option::Option<::prost::bytes::Bytes>,
    /// Significant only on the first chunk of a cell; ignored afterward.
    #[prost(int64, tag = "4")]
    pub timestamp_micros: i64,
    #[prost(string, repeated, tag = "5")]
    pub labels: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bytes = "bytes", tag = "6")]
    pub value: ::prost::bytes::Bytes,
    /// Positive: more chunks follow for this cell and this is a hint of the
    /// eventual total value length. Zero: this chunk completes the cell.
    #[prost(int32, tag = "7")]
    pub value_size: i32,
    #[prost(oneof = "cell_chunk::RowStatus", tags = "8, 9")]
    pub row_status: ::core::option::Option<cell_chunk::RowStatus>,
}
/// Nested message and enum types in `CellChunk`.
pub mod cell_chunk {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum RowStatus {
        /// Discard all buffered state for the row in progress.
        #[prost(bool, tag = "8")]
        ResetRow(bool),
        /// The row is complete; all of its chunks have been sent.
        #[prost(bool, tag = "9")]
        CommitRow(bool),
    }
}
/// Request message for `Bigtable.ReadRows`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadRowsRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub app_profile_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub rows: ::core::option::Option<RowSet>,
    #[prost(message, optional, tag = "3")]
    pub filter: ::core::option::Option<RowFilter>,
    #[prost(int64, tag = "4")]
    pub rows_limit: i64,
}
/// Response message for `Bigtable.ReadRows`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadRowsResponse {
    #[prost(message, repeated, tag = "1")]
    pub chunks: ::prost::alloc::vec::Vec<CellChunk>,
    #[prost(bytes = "bytes", tag = "2")]
    pub last_scanned_row_key: ::prost::bytes::Bytes,
}
/// Request message for `Bigtable.SampleRowKeys`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SampleRowKeysRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub app_profile_id: ::prost::alloc::string::String,
}
/// Response message for `Bigtable.SampleRowKeys`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SampleRowKeysResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub row_key: ::prost::bytes::Bytes,
    #[prost(int64, tag = "2")]
    pub offset_bytes: i64,
}
/// Specifies an atomic change to one of a row's cells.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Mutation {
    #[prost(oneof = "mutation::Mutation", tags = "1, 2, 3, 4")]
    pub mutation: ::core::option::Option<mutation::Mutation>,
}
/// Nested message and enum types in `Mutation`.
pub mod mutation {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SetCell {
        #[prost(string, tag = "1")]
        pub family_name: ::prost::alloc::string::String,
        #[prost(bytes = "bytes", tag = "2")]
        pub column_qualifier: ::prost::bytes::Bytes,
        /// Server-assigned if left as the sentinel `-1`; an explicit
        /// non-negative value here is what makes a `SetCell` idempotent.
        #[prost(int64, tag = "3")]
        pub timestamp_micros: i64,
        #[prost(bytes = "bytes", tag = "4")]
        pub value: ::prost::bytes::Bytes,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteFromColumn {
        #[prost(string, tag = "1")]
        pub family_name: ::prost::alloc::string::String,
        #[prost(bytes = "bytes", tag = "2")]
        pub column_qualifier: ::prost::bytes::Bytes,
        #[prost(message, optional, tag = "3")]
        pub time_range: ::core::option::Option<super::TimestampRange>,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteFromFamily {
        #[prost(string, tag = "1")]
        pub family_name: ::prost::alloc::string::String,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteFromRow {}
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Mutation {
        #[prost(message, tag = "1")]
        SetCell(SetCell),
        #[prost(message, tag = "2")]
        DeleteFromColumn(DeleteFromColumn),
        #[prost(message, tag = "3")]
        DeleteFromFamily(DeleteFromFamily),
        #[prost(message, tag = "4")]
        DeleteFromRow(DeleteFromRow),
    }
}
/// Request message for `Bigtable.MutateRow`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutateRowRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub app_profile_id: ::prost::alloc::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub row_key: ::prost::bytes::Bytes,
    #[prost(message, repeated, tag = "3")]
    pub mutations: ::prost::alloc::vec::Vec<Mutation>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutateRowResponse {}
/// Request message for `Bigtable.MutateRows`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutateRowsRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub app_profile_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub entries: ::prost::alloc::vec::Vec<mutate_rows_request::Entry>,
}
/// Nested message and enum types in `MutateRowsRequest`.
pub mod mutate_rows_request {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        #[prost(bytes = "bytes", tag = "1")]
        pub row_key: ::prost::bytes::Bytes,
        #[prost(message, repeated, tag = "2")]
        pub mutations: ::prost::alloc::vec::Vec<super::Mutation>,
    }
}
/// Response message for `Bigtable.MutateRows`. A stream of these carries
/// per-entry outcomes identified by the entry's index into the request.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutateRowsResponse {
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<mutate_rows_response::Entry>,
}
/// Nested message and enum types in `MutateRowsResponse`.
pub mod mutate_rows_response {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        #[prost(int64, tag = "1")]
        pub index: i64,
        #[prost(message, optional, tag = "2")]
        pub status: ::core::option::Option<crate::rpc::Status>,
    }
}
/// Request message for `Bigtable.CheckAndMutateRow`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckAndMutateRowRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub app_profile_id: ::prost::alloc::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub row_key: ::prost::bytes::Bytes,
    #[prost(message, optional, tag = "3")]
    pub predicate_filter: ::core::option::Option<RowFilter>,
    #[prost(message, repeated, tag = "4")]
    pub true_mutations: ::prost::alloc::vec::Vec<Mutation>,
    #[prost(message, repeated, tag = "5")]
    pub false_mutations: ::prost::alloc::vec::Vec<Mutation>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckAndMutateRowResponse {
    #[prost(bool, tag = "1")]
    pub predicate_matched: bool,
}
/// Request message for `Bigtable.ReadModifyWriteRow`.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadModifyWriteRowRequest {
    #[prost(string, tag = "1")]
    pub table_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub app_profile_id: ::prost::alloc::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub row_key: ::prost::bytes::Bytes,
    #[prost(message, repeated, tag = "3")]
    pub rules: ::prost::alloc::vec::Vec<read_modify_write_rule::Rule>,
}
/// Nested message and enum types shared by `ReadModifyWriteRowRequest`.
pub mod read_modify_write_rule {
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Rule {
        #[prost(string, tag = "1")]
        pub family_name: ::prost::alloc::string::String,
        #[prost(bytes = "bytes", tag = "2")]
        pub column_qualifier: ::prost::bytes::Bytes,
        #[prost(oneof = "Op", tags = "3, 4")]
        pub op: ::core::option::Option<Op>,
    }
    #[allow(clippy::derive_partial_eq_without_eq)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Op {
        #[prost(bytes, tag = "3")]
        AppendValue(::prost::bytes::Bytes),
        #[prost(int64, tag = "4")]
        IncrementAmount(i64),
    }
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadModifyWriteRowResponse {
    #[prost(message, optional, tag = "1")]
    pub row: ::core::option::Option<ReadModifyWriteRowResult>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadModifyWriteRowResult {
    #[prost(bytes = "bytes", tag = "1")]
    pub key: ::prost::bytes::Bytes,
}

/// Generated client module for the Cloud Bigtable Data API.
pub mod bigtable_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;

    /// Service for reading from and writing to existing Bigtable tables.
    #[derive(Debug, Clone)]
    pub struct BigtableClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl BigtableClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> BigtableClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }

        /// Streams back the contents of all requested rows in key order, each
        /// cell potentially arriving as several chunks.
        pub async fn read_rows(
            &mut self,
            request: impl tonic::IntoRequest<super::ReadRowsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::ReadRowsResponse>>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/google.bigtable.v2.Bigtable/ReadRows");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        /// Returns a sample of row keys in the table, approximately evenly
        /// spaced, used to prepare a range split for parallel reads.
        pub async fn sample_row_keys(
            &mut self,
            request: impl tonic::IntoRequest<super::SampleRowKeysRequest>,
        ) -> Result<
            tonic::Response<tonic::codec::Streaming<super::SampleRowKeysResponse>>,
            tonic::Status,
        > {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/google.bigtable.v2.Bigtable/SampleRowKeys");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        /// Mutates a single row atomically.
        pub async fn mutate_row(
            &mut self,
            request: impl tonic::IntoRequest<super::MutateRowRequest>,
        ) -> Result<tonic::Response<super::MutateRowResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/google.bigtable.v2.Bigtable/MutateRow");
            self.inner.unary(request.into_request(), path, codec).await
        }

        /// Mutates multiple rows in a batch, streaming back one status per
        /// entry as the server finishes processing it.
        pub async fn mutate_rows(
            &mut self,
            request: impl tonic::IntoRequest<super::MutateRowsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::MutateRowsResponse>>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/google.bigtable.v2.Bigtable/MutateRows");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        /// Mutates a row atomically based on the output of a predicate filter.
        pub async fn check_and_mutate_row(
            &mut self,
            request: impl tonic::IntoRequest<super::CheckAndMutateRowRequest>,
        ) -> Result<tonic::Response<super::CheckAndMutateRowResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/google.bigtable.v2.Bigtable/CheckAndMutateRow",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }

        /// Modifies a row atomically, reading the latest existing timestamp or
        /// value for each rule and writing back the result.
        pub async fn read_modify_write_row(
            &mut self,
            request: impl tonic::IntoRequest<super::ReadModifyWriteRowRequest>,
        ) -> Result<tonic::Response<super::ReadModifyWriteRowResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/google.bigtable.v2.Bigtable/ReadModifyWriteRow",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
