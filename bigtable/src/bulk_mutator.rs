//! Multiplexes a batch of per-row mutations onto the `MutateRows` streaming
//! RPC, tracking per-entry outcomes so idempotent failures are retried
//! transparently while the caller's original ordering is preserved for
//! whatever ultimately fails.

use gcloud_bigtable_gax::status::{Code, Status};
use gcloud_bigtable_proto::bigtable::v2 as pb;

use crate::apiv1::bigtable_client::Client;
use crate::error::{indeterminate_status, Error};
use crate::mutation::SingleRowMutation;
use crate::retry::{data_plane_retryable_codes, BackoffPolicy, IdempotencyPolicy, RetryPolicy};

/// The largest legal number of per-cell `Mutation` operations in a single
/// `MutateRows` call is roughly 100,000 (§4.7) — the sum of every entry's
/// `mutations.len()`, not the number of entries. The public batch API
/// fragments ahead of this via [`fragment_by_mutation_count`] so a single
/// `BulkMutator` attempt never exceeds it.
pub const MAX_MUTATIONS_PER_CALL: usize = 100_000;

/// Splits `bulk` into consecutive runs whose total `Mutation` count never
/// exceeds `max_mutations`. A `SingleRowMutation` is never split across two
/// fragments — an entry whose own mutation count exceeds the cap still gets
/// a fragment to itself, since there is no other way to represent it.
pub fn fragment_by_mutation_count(
    bulk: &[SingleRowMutation],
    max_mutations: usize,
) -> Vec<Vec<SingleRowMutation>> {
    let mut fragments = Vec::new();
    let mut current = Vec::new();
    let mut current_count = 0usize;
    for entry in bulk {
        let entry_count = entry.mutations.len();
        if !current.is_empty() && current_count + entry_count > max_mutations {
            fragments.push(std::mem::take(&mut current));
            current_count = 0;
        }
        current_count += entry_count;
        current.push(entry.clone());
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

/// One outstanding Single-Row Mutation's bookkeeping, carried alongside it
/// through every prepare/process step so failures can still report the
/// caller's original index after arbitrary internal reshuffling.
#[derive(Clone, Copy, Debug)]
struct EntryAnnotation {
    original_index: usize,
    is_idempotent: bool,
    has_result: bool,
}

/// A mutation that did not end up successfully applied.
#[derive(Clone, Debug)]
pub struct FailedMutation {
    pub original_index: usize,
    pub mutation: SingleRowMutation,
    pub status: Status,
}

impl FailedMutation {
    /// True if `status` is the marker for "the server never told us what
    /// happened to this non-idempotent mutation" rather than a real failure.
    pub fn is_indeterminate(&self) -> bool {
        crate::error::is_indeterminate(&self.status)
    }
}

fn retryable_entries_remain() -> Status {
    Status::new(tonic::Status::new(
        tonic::Code::Unavailable,
        "retryable bulk-mutation entries remain pending",
    ))
}

pub struct BulkMutator {
    table_name: String,
    app_profile_id: String,
    current: Vec<(SingleRowMutation, EntryAnnotation)>,
    pending: Vec<(SingleRowMutation, EntryAnnotation)>,
    failures: Vec<FailedMutation>,
}

impl BulkMutator {
    /// Fails with [`Error::Usage`] if `bulk`'s total `Mutation` count
    /// exceeds [`MAX_MUTATIONS_PER_CALL`] — a caller bypassing
    /// [`crate::client::BigtableClient::mutate_rows`] and constructing a
    /// `BulkMutator` directly with an oversized batch gets an error rather
    /// than a panic on otherwise-valid input.
    pub fn new(
        table_name: impl Into<String>,
        app_profile_id: impl Into<String>,
        bulk: Vec<SingleRowMutation>,
        idempotency_policy: &impl IdempotencyPolicy,
    ) -> Result<Self, Error> {
        let total_mutations: usize = bulk.iter().map(|entry| entry.mutations.len()).sum();
        if total_mutations > MAX_MUTATIONS_PER_CALL {
            return Err(Error::Usage(
                "bulk mutation exceeds the per-call fragment size; the caller-facing \
                 batch API is responsible for fragmenting ahead of BulkMutator",
            ));
        }
        let pending = bulk
            .into_iter()
            .enumerate()
            .map(|(original_index, entry)| {
                let is_idempotent = entry
                    .mutations
                    .iter()
                    .all(|m| idempotency_policy.is_idempotent(m));
                (
                    entry,
                    EntryAnnotation {
                        original_index,
                        is_idempotent,
                        has_result: false,
                    },
                )
            })
            .collect();
        Ok(BulkMutator {
            table_name: table_name.into(),
            app_profile_id: app_profile_id.into(),
            current: Vec::new(),
            pending,
            failures: Vec::new(),
        })
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Runs attempts until no pending entries remain or the retry policy
    /// gives up, then returns the accumulated failures (including any
    /// entries still pending at that point, recorded indeterminate).
    pub async fn run(
        mut self,
        client: &mut Client,
        mut retry: impl RetryPolicy<Error>,
        mut backoff: impl BackoffPolicy<Error>,
    ) -> Vec<FailedMutation> {
        loop {
            let stream_result = self.make_one_request(client).await;
            if !self.has_pending() {
                break;
            }
            let error_for_policy = match stream_result {
                Err(e) => e,
                Ok(()) => Error::Status(retryable_entries_remain()),
            };
            // Skipping backoff once retry has been refused keeps the loop's
            // final iteration deterministic instead of sleeping needlessly.
            if !retry.allow_retry(&error_for_policy) {
                self.give_up_on_pending();
                break;
            }
            let delay = backoff.next_backoff(&error_for_policy);
            tokio::time::sleep(delay).await;
        }
        self.failures
    }

    /// Sends the entries currently pending, interprets the per-entry
    /// results, and returns the stream's own terminal status. Re-queues
    /// retryable idempotent entries into `pending` as a side effect.
    async fn make_one_request(&mut self, client: &mut Client) -> Result<(), Error> {
        self.current = std::mem::take(&mut self.pending);

        let entries: Vec<pb::mutate_rows_request::Entry> = self
            .current
            .iter()
            .map(|(mutation, _)| mutation.clone().into())
            .collect();
        let request = pb::MutateRowsRequest {
            table_name: self.table_name.clone(),
            app_profile_id: self.app_profile_id.clone(),
            entries,
        };

        let mut stream = match client.mutate_rows(request).await {
            Ok(response) => response.into_inner(),
            Err(status) => {
                self.finish_attempt();
                return Err(status.into());
            }
        };

        let stream_result = loop {
            match stream.message().await {
                Ok(Some(response)) => self.process_response(response),
                Ok(None) => break Ok(()),
                Err(status) => break Err(Error::from(status)),
            }
        };

        self.finish_attempt();
        stream_result
    }

    fn process_response(&mut self, response: pb::MutateRowsResponse) {
        let retryable_codes = data_plane_retryable_codes();
        for entry_status in response.entries {
            let index = entry_status.index as usize;
            let Some((mutation, annotation)) = self.current.get_mut(index).map(|(m, a)| (m.clone(), a))
            else {
                tracing::warn!(index, "mutate_rows response referenced an out-of-range entry index");
                continue;
            };
            annotation.has_result = true;

            let status = entry_status
                .status
                .map(|s| Status::new(tonic::Status::new(code_from_i32(s.code), s.message)))
                .unwrap_or_else(|| Status::new(tonic::Status::ok("")));

            if status.code() == Code::Ok {
                continue;
            }

            let retryable = retryable_codes.contains(&status.code());
            if retryable && annotation.is_idempotent {
                self.pending.push((
                    mutation,
                    EntryAnnotation {
                        original_index: annotation.original_index,
                        is_idempotent: annotation.is_idempotent,
                        has_result: false,
                    },
                ));
            } else {
                tracing::warn!(
                    original_index = annotation.original_index,
                    code = ?status.code(),
                    "bulk mutation entry failed"
                );
                self.failures.push(FailedMutation {
                    original_index: annotation.original_index,
                    mutation,
                    status,
                });
            }
        }
    }

    /// After the stream ends, anything in `current` still without a result
    /// is indeterminate: idempotent entries are safe to retry transparently,
    /// non-idempotent ones must be reported since we genuinely don't know
    /// whether the server applied them.
    fn finish_attempt(&mut self) {
        for (mutation, annotation) in self.current.drain(..) {
            if annotation.has_result {
                continue;
            }
            if annotation.is_idempotent {
                self.pending.push((
                    mutation,
                    EntryAnnotation {
                        original_index: annotation.original_index,
                        is_idempotent: annotation.is_idempotent,
                        has_result: false,
                    },
                ));
            } else {
                self.failures.push(FailedMutation {
                    original_index: annotation.original_index,
                    mutation,
                    status: indeterminate_status(),
                });
            }
        }
    }

    /// Called once the retry budget is exhausted with entries still
    /// pending: we genuinely don't know their final state, so they are
    /// reported indeterminate rather than silently dropped.
    fn give_up_on_pending(&mut self) {
        for (mutation, annotation) in self.pending.drain(..) {
            self.failures.push(FailedMutation {
                original_index: annotation.original_index,
                mutation,
                status: indeterminate_status(),
            });
        }
    }
}

fn code_from_i32(value: i32) -> tonic::Code {
    tonic::Code::from_i32(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::Mutation;
    use crate::retry::DefaultIdempotencyPolicy;

    fn entry(row_key: &str, ts: Option<i64>) -> SingleRowMutation {
        SingleRowMutation::new(row_key.as_bytes().to_vec()).add(Mutation::SetCell {
            family_name: "fam".into(),
            column_qualifier: b"col".to_vec(),
            timestamp_micros: ts.unwrap_or(crate::mutation::SERVER_ASSIGNED_TIMESTAMP),
            value: b"v".to_vec(),
        })
    }

    #[test]
    fn construction_precomputes_idempotency_once() {
        let bulk = vec![entry("a", Some(0)), entry("b", None)];
        let mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        assert!(mutator.pending[0].1.is_idempotent);
        assert!(!mutator.pending[1].1.is_idempotent);
        assert_eq!(mutator.pending[0].1.original_index, 0);
        assert_eq!(mutator.pending[1].1.original_index, 1);
    }

    fn status(code: i32) -> gcloud_bigtable_proto::rpc::Status {
        gcloud_bigtable_proto::rpc::Status {
            code,
            message: String::new(),
        }
    }

    fn entry_status(index: i64, code: i32) -> pb::mutate_rows_response::Entry {
        pb::mutate_rows_response::Entry {
            index,
            status: Some(status(code)),
        }
    }

    const OK: i32 = 0;
    const UNAVAILABLE: i32 = 14;
    const OUT_OF_RANGE: i32 = 11;

    fn start_attempt(mutator: &mut BulkMutator) {
        mutator.current = std::mem::take(&mut mutator.pending);
    }

    #[test]
    fn fragment_by_mutation_count_splits_on_total_operations_not_entry_count() {
        let bulk = vec![entry("a", Some(0)), entry("b", Some(0)), entry("c", Some(0))];
        let fragments = fragment_by_mutation_count(&bulk, 2);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].len(), 2);
        assert_eq!(fragments[1].len(), 1);
    }

    #[test]
    fn fragment_by_mutation_count_gives_an_oversized_entry_its_own_fragment() {
        let oversized = SingleRowMutation::new(b"big".to_vec())
            .add(Mutation::SetCell {
                family_name: "fam".into(),
                column_qualifier: b"col".to_vec(),
                timestamp_micros: 0,
                value: b"v".to_vec(),
            })
            .add(Mutation::SetCell {
                family_name: "fam".into(),
                column_qualifier: b"col2".to_vec(),
                timestamp_micros: 0,
                value: b"v".to_vec(),
            });
        let bulk = vec![oversized, entry("b", Some(0))];
        let fragments = fragment_by_mutation_count(&bulk, 1);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].len(), 1);
        assert_eq!(fragments[1].len(), 1);
    }

    #[test]
    fn new_rejects_a_bulk_exceeding_the_per_call_cap() {
        let oversized = SingleRowMutation::new(b"big".to_vec())
            .add(Mutation::DeleteFromRow);
        let one_under = vec![SingleRowMutation::new(b"row".to_vec())
            .add(Mutation::DeleteFromRow); MAX_MUTATIONS_PER_CALL];
        let mut bulk = one_under;
        bulk.push(oversized);
        let result = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy);
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    /// S1 — one stream, two successes: no retries, no failures.
    #[test]
    fn s1_bulk_apply_one_stream_two_successes() {
        let bulk = vec![entry("foo", Some(0)), entry("bar", Some(0))];
        let mut mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK), entry_status(1, OK)],
        });
        mutator.finish_attempt();
        assert!(mutator.failures.is_empty());
        assert!(!mutator.has_pending());
    }

    /// S2 — partial retryable failure: the retryable half is requeued and
    /// succeeds on a second attempt, leaving no failures.
    #[test]
    fn s2_bulk_apply_partial_retryable_failure() {
        let bulk = vec![entry("foo", Some(0)), entry("bar", Some(0))];
        let mut mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, UNAVAILABLE), entry_status(1, OK)],
        });
        mutator.finish_attempt();
        assert_eq!(mutator.pending.len(), 1);
        assert_eq!(mutator.pending[0].0.row_key, b"foo");

        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK)],
        });
        mutator.finish_attempt();
        assert!(mutator.failures.is_empty());
        assert!(!mutator.has_pending());
    }

    /// S3 — a permanent (non-retryable) failure is reported with its
    /// original index even after the retryable sibling entry is requeued.
    #[test]
    fn s3_bulk_apply_permanent_failure() {
        let bulk = vec![entry("foo", Some(0)), entry("bar", Some(0))];
        let mut mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, UNAVAILABLE), entry_status(1, OUT_OF_RANGE)],
        });
        mutator.finish_attempt();
        assert_eq!(mutator.failures.len(), 1);
        assert_eq!(mutator.failures[0].original_index, 1);
        assert_eq!(mutator.failures[0].mutation.row_key, b"bar");
        assert_eq!(mutator.failures[0].status.code(), Code::OutOfRange);

        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK)],
        });
        mutator.finish_attempt();
        assert_eq!(mutator.failures.len(), 1);
        assert!(!mutator.has_pending());
    }

    /// S4 — a missing per-entry status (stream ended without reporting it)
    /// is indeterminate but safe to requeue since the entry is idempotent.
    #[test]
    fn s4_bulk_apply_indeterminate_entry_is_requeued_when_idempotent() {
        let bulk = vec![entry("foo", Some(0)), entry("bar", Some(0))];
        let mut mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK)],
        });
        mutator.finish_attempt();
        assert_eq!(mutator.pending.len(), 1);
        assert_eq!(mutator.pending[0].1.original_index, 1);

        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK)],
        });
        mutator.finish_attempt();
        assert!(mutator.failures.is_empty());
        assert!(!mutator.has_pending());
    }

    /// S5 — idempotency filtering: a non-idempotent entry with a retryable
    /// status is a terminal failure, not a retry candidate; a non-idempotent
    /// entry with no result at all is reported indeterminate.
    #[test]
    fn s5_bulk_apply_idempotency_filtering() {
        let bulk = vec![entry("a", None), entry("b", Some(0)), entry("c", None)];
        let mut mutator = BulkMutator::new("t", "", bulk, &DefaultIdempotencyPolicy).unwrap();
        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, UNAVAILABLE), entry_status(1, UNAVAILABLE)],
        });
        mutator.finish_attempt();

        assert_eq!(mutator.pending.len(), 1);
        assert_eq!(mutator.pending[0].1.original_index, 1);

        assert_eq!(mutator.failures.len(), 2);
        let by_a = mutator
            .failures
            .iter()
            .find(|f| f.original_index == 0)
            .unwrap();
        assert_eq!(by_a.status.code(), Code::Unavailable);
        let by_c = mutator
            .failures
            .iter()
            .find(|f| f.original_index == 2)
            .unwrap();
        assert!(by_c.is_indeterminate());

        start_attempt(&mut mutator);
        mutator.process_response(pb::MutateRowsResponse {
            entries: vec![entry_status(0, OK)],
        });
        mutator.finish_attempt();
        assert_eq!(mutator.failures.len(), 2);
        assert!(!mutator.has_pending());
    }
}
