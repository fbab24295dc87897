//! # gcloud-bigtable
//!
//! A client library for Google Cloud Bigtable: row reads over a restartable
//! streaming reader, bulk writes over a retrying per-entry mutator, and a
//! thin passthrough for table administration.
//!
//! ## Quickstart
//!
//! ```no_run
//! use gcloud_bigtable::client::{BigtableClient, ClientConfig};
//! use gcloud_bigtable::mutation::{Mutation, SingleRowMutation};
//! use gcloud_bigtable::retry::DefaultIdempotencyPolicy;
//!
//! # async fn run() -> Result<(), gcloud_bigtable::error::Error> {
//! let config = ClientConfig {
//!     project_id: "my-project".into(),
//!     instance_id: "my-instance".into(),
//!     ..Default::default()
//! };
//! let client = BigtableClient::new(config).await?;
//!
//! let mutation = SingleRowMutation::new(b"row-1".to_vec()).add(Mutation::SetCell {
//!     family_name: "cf1".into(),
//!     column_qualifier: b"col".to_vec(),
//!     timestamp_micros: 0,
//!     value: b"value".to_vec(),
//! });
//! client
//!     .mutate_rows("my-table", vec![mutation], &DefaultIdempotencyPolicy)
//!     .await?;
//! # Ok(())
//! # }
//! ```
pub mod admin;
pub mod apiv1;
pub mod bulk_mutator;
pub mod client;
pub mod error;
pub mod key;
pub mod mutation;
pub mod parser;
pub mod reader;
pub mod retry;
pub mod row;
