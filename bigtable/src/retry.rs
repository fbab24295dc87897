//! Bigtable-specific compositions of the generic [`gcloud_bigtable_gax`]
//! policy traits: a retryable-code filter matched to this service, and the
//! idempotency and metadata policies §4.1 calls for that have no generic
//! equivalent.

use crate::mutation::Mutation;
use gcloud_bigtable_gax::status::Code;

pub use gcloud_bigtable_gax::retry::{
    default_retryable_codes, BackoffPolicy, CodeFiltered, ExponentialBackoff, LimitedCount,
    LimitedTime, RetryPolicy, TryAs,
};

/// The codes this client treats as transient: unavailable, deadline
/// exceeded, aborted, and internal, matching §4.1's authoritative
/// classification. `Internal` is included because a parser protocol
/// violation is surfaced as an internal-error status and is explicitly
/// retryable per §4.6/§4.7 (the data was bad, but a fresh stream may
/// succeed). `Unknown` is excluded here even though `default_retryable_codes`
/// includes it, since Bigtable uses `Unknown` for the indeterminate-entry
/// marker (§7) and that must never be silently retried as if it were
/// transient.
pub fn data_plane_retryable_codes() -> Vec<Code> {
    vec![
        Code::Unavailable,
        Code::DeadlineExceeded,
        Code::Aborted,
        Code::Internal,
    ]
}

/// Wraps any `RetryPolicy` so it only honors the data-plane retryable codes.
pub fn retryable<P>(inner: P) -> CodeFiltered<P> {
    CodeFiltered::new(data_plane_retryable_codes(), inner)
}

/// Classifies a single [`Mutation`] as safe to retry without changing the
/// final state of the row.
pub trait IdempotencyPolicy {
    fn is_idempotent(&self, mutation: &Mutation) -> bool;
}

/// The default classifier: a mutation is idempotent iff it carries an
/// explicit timestamp (§3, §4.1).
#[derive(Clone, Copy, Default)]
pub struct DefaultIdempotencyPolicy;

impl IdempotencyPolicy for DefaultIdempotencyPolicy {
    fn is_idempotent(&self, mutation: &Mutation) -> bool {
        mutation.is_idempotent()
    }
}

/// Treats every mutation as idempotent regardless of timestamp. An explicit
/// caller opt-in for workloads that tolerate duplicate application (e.g. a
/// counter-style increment guarded by an idempotency key upstream).
#[derive(Clone, Copy, Default)]
pub struct AlwaysIdempotentPolicy;

impl IdempotencyPolicy for AlwaysIdempotentPolicy {
    fn is_idempotent(&self, _mutation: &Mutation) -> bool {
        true
    }
}

/// Attaches the `x-goog-request-params` routing header identifying the
/// target table to every attempt, mirroring `gax::create_request`'s
/// metadata-setup pattern but as a reusable, clonable policy object rather
/// than a one-shot helper function.
#[derive(Clone, Debug)]
pub struct TableMetadataPolicy {
    param_string: String,
}

impl TableMetadataPolicy {
    pub fn new(table_name: impl AsRef<str>) -> Self {
        TableMetadataPolicy {
            param_string: format!("table_name={}", table_name.as_ref()),
        }
    }
}

impl<T> gcloud_bigtable_gax::retry::MetadataPolicy<tonic::Request<T>> for TableMetadataPolicy {
    fn setup(&self, request: &mut tonic::Request<T>) {
        if let Ok(value) = self.param_string.parse() {
            request
                .metadata_mut()
                .insert("x-goog-request-params", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::SERVER_ASSIGNED_TIMESTAMP;

    #[test]
    fn default_policy_matches_mutation_classifier() {
        let idempotent = Mutation::DeleteFromRow;
        let not_idempotent = Mutation::SetCell {
            family_name: "fam".into(),
            column_qualifier: b"col".to_vec(),
            timestamp_micros: SERVER_ASSIGNED_TIMESTAMP,
            value: b"v".to_vec(),
        };
        let policy = DefaultIdempotencyPolicy;
        assert!(policy.is_idempotent(&idempotent));
        assert!(!policy.is_idempotent(&not_idempotent));
    }

    #[test]
    fn always_idempotent_policy_ignores_classification() {
        let not_idempotent = Mutation::SetCell {
            family_name: "fam".into(),
            column_qualifier: b"col".to_vec(),
            timestamp_micros: SERVER_ASSIGNED_TIMESTAMP,
            value: b"v".to_vec(),
        };
        assert!(AlwaysIdempotentPolicy.is_idempotent(&not_idempotent));
    }
}
