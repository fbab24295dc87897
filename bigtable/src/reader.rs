//! Forward, single-pass iteration over rows from a `ReadRows` stream, with
//! transparent restart on a transient stream failure.
//!
//! Modeled on the teacher's `spanner::reader` async-iterator shape: a plain
//! `async fn next(&mut self) -> Result<Option<Row>, Error>` rather than a
//! `std::iter::Iterator`/`futures::Stream` impl, since row delivery is
//! inherently fallible and async.

use std::cmp::Ordering;

use gcloud_bigtable_proto::bigtable::v2 as pb;

use crate::apiv1::bigtable_client::Client;
use crate::error::Error;
use crate::key;
use crate::parser::ChunkReader;
use crate::retry::{BackoffPolicy, RetryPolicy};
use crate::row::Row;

/// One bound of a [`RowRange`]: whether the boundary key itself is included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Closed,
    Open,
}

/// A contiguous span of row keys. `None` on either side means unbounded in
/// that direction.
#[derive(Clone, Debug, Default)]
pub struct RowRange {
    pub start: Option<(Bound, Vec<u8>)>,
    pub end: Option<(Bound, Vec<u8>)>,
}

impl RowRange {
    /// Narrows this range to start strictly after `last_yielded`, or drops
    /// it entirely if `last_yielded` is already at or past its end. Used to
    /// resume a stream without re-delivering already-seen rows (§4.4, §4.6).
    fn clip_after(&self, last_yielded: &[u8]) -> Option<Self> {
        let already_past_end = match &self.end {
            Some((Bound::Closed, end)) => key::compare(last_yielded, end) != Ordering::Less,
            Some((Bound::Open, end)) => key::compare(last_yielded, end) == Ordering::Greater,
            None => false,
        };
        if already_past_end {
            return None;
        }
        Some(RowRange {
            start: Some((Bound::Open, last_yielded.to_vec())),
            end: self.end.clone(),
        })
    }
}

impl From<RowRange> for pb::RowRange {
    fn from(value: RowRange) -> Self {
        let start_key = value.start.map(|(bound, key)| match bound {
            Bound::Closed => pb::row_range::StartKey::StartKeyClosed(key.into()),
            Bound::Open => pb::row_range::StartKey::StartKeyOpen(key.into()),
        });
        let end_key = value.end.map(|(bound, key)| match bound {
            Bound::Closed => pb::row_range::EndKey::EndKeyClosed(key.into()),
            Bound::Open => pb::row_range::EndKey::EndKeyOpen(key.into()),
        });
        pb::RowRange { start_key, end_key }
    }
}

/// Rows to read, as a set of discrete keys and/or ranges.
#[derive(Clone, Debug, Default)]
pub struct RowSet {
    pub row_keys: Vec<Vec<u8>>,
    pub row_ranges: Vec<RowRange>,
}

impl RowSet {
    pub fn from_key(row_key: impl Into<Vec<u8>>) -> Self {
        RowSet {
            row_keys: vec![row_key.into()],
            row_ranges: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.row_keys.is_empty() && self.row_ranges.is_empty()
    }

    /// Drops discrete keys at or before `last_yielded` and narrows every
    /// range to start strictly after it, dropping ranges it has fully
    /// passed.
    fn clip_after(&self, last_yielded: &[u8]) -> Self {
        let row_keys = self
            .row_keys
            .iter()
            .filter(|k| key::compare(k, last_yielded) == Ordering::Greater)
            .cloned()
            .collect();
        let row_ranges = self
            .row_ranges
            .iter()
            .filter_map(|r| r.clip_after(last_yielded))
            .collect();
        RowSet { row_keys, row_ranges }
    }
}

impl From<RowSet> for pb::RowSet {
    fn from(value: RowSet) -> Self {
        pb::RowSet {
            row_keys: value.row_keys.into_iter().map(Into::into).collect(),
            row_ranges: value.row_ranges.into_iter().map(Into::into).collect(),
        }
    }
}

/// Terminal status recorded once the reader becomes exhausted by something
/// other than a clean, row-limit-satisfying end of stream.
#[derive(Clone, Debug, Default)]
struct FinalStatus(Option<Error>);

/// Drives a single `ReadRows` call to completion, restarting the stream
/// (clipped to resume past the last-yielded row) on a retryable failure.
///
/// Owns its `Client` rather than borrowing one: an `apiv1::Client` is a
/// cheap handle onto one pooled channel, so a reader can be constructed,
/// moved, and iterated independently of whatever built it.
pub struct RowReader<RP, BP> {
    client: Client,
    table_name: String,
    app_profile_id: String,
    row_set: RowSet,
    filter: Option<pb::RowFilter>,
    rows_remaining: Option<i64>,
    retry: RP,
    backoff: BP,
    parser: ChunkReader,
    stream: Option<tonic::Streaming<pb::ReadRowsResponse>>,
    last_yielded_key: Option<Vec<u8>>,
    rows_yielded: u64,
    exhausted: bool,
    final_status: FinalStatus,
}

impl<RP, BP> RowReader<RP, BP>
where
    RP: RetryPolicy<Error>,
    BP: BackoffPolicy<Error>,
{
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        app_profile_id: impl Into<String>,
        row_set: RowSet,
        filter: Option<pb::RowFilter>,
        row_limit: Option<i64>,
        retry: RP,
        backoff: BP,
    ) -> Self {
        RowReader {
            client,
            table_name: table_name.into(),
            app_profile_id: app_profile_id.into(),
            row_set,
            filter,
            rows_remaining: row_limit,
            retry,
            backoff,
            parser: ChunkReader::new(),
            stream: None,
            last_yielded_key: None,
            rows_yielded: 0,
            exhausted: false,
            final_status: FinalStatus::default(),
        }
    }

    /// The status that caused exhaustion, if the reader stopped for a
    /// reason other than a clean end of stream or a satisfied row limit.
    pub fn final_status(&self) -> Option<&Error> {
        self.final_status.0.as_ref()
    }

    fn build_request(&self) -> pb::ReadRowsRequest {
        let row_set = match &self.last_yielded_key {
            Some(last) => self.row_set.clip_after(last),
            None => self.row_set.clone(),
        };
        pb::ReadRowsRequest {
            table_name: self.table_name.clone(),
            app_profile_id: self.app_profile_id.clone(),
            rows: Some(row_set.into()),
            filter: self.filter.clone(),
            rows_limit: self.rows_remaining.unwrap_or(0),
        }
    }

    async fn open_stream(&mut self) -> Result<(), Error> {
        let request = self.build_request();
        let response = self.client.read_rows(request).await?;
        self.stream = Some(response.into_inner());
        Ok(())
    }

    /// Pulls the next row, restarting the underlying stream transparently
    /// on a retryable failure. Returns `Ok(None)` once exhausted.
    pub async fn next(&mut self) -> Result<Option<Row>, Error> {
        loop {
            if self.exhausted {
                return Ok(None);
            }
            if self.rows_remaining == Some(0) {
                self.exhausted = true;
                return Ok(None);
            }

            if self.parser.has_next() {
                let row = self.parser.next().expect("has_next just confirmed a row is ready");
                self.last_yielded_key = Some(row.row_key.clone());
                self.rows_yielded += 1;
                if let Some(remaining) = &mut self.rows_remaining {
                    *remaining -= 1;
                }
                return Ok(Some(row));
            }

            if self.stream.is_none() {
                if let Err(e) = self.open_stream().await {
                    if !self.restart_after(e).await? {
                        return Ok(None);
                    }
                    continue;
                }
            }

            let stream = self.stream.as_mut().expect("just opened or already open");
            match stream.message().await {
                Ok(Some(response)) => {
                    if let Err(e) = self.feed(response) {
                        self.stream = None;
                        if !self.restart_after(e.into_retryable()).await? {
                            return Ok(None);
                        }
                    }
                }
                Ok(None) => {
                    self.stream = None;
                    if let Err(e) = self.parser.handle_end_of_stream() {
                        if !self.restart_after(e.into_retryable()).await? {
                            return Ok(None);
                        }
                    } else {
                        self.exhausted = true;
                    }
                }
                Err(status) => {
                    self.stream = None;
                    if !self.restart_after(Error::from(status)).await? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn feed(&mut self, response: pb::ReadRowsResponse) -> Result<(), Error> {
        for chunk in response.chunks {
            self.parser.handle_chunk(chunk)?;
        }
        Ok(())
    }

    /// Consults the retry policy after a stream failure. Returns `Ok(true)`
    /// if the caller should loop and try again, `Ok(false)` if the reader is
    /// now permanently exhausted (final status recorded).
    async fn restart_after(&mut self, error: Error) -> Result<bool, Error> {
        if !self.retry.allow_retry(&error) {
            self.exhausted = true;
            self.final_status = FinalStatus(Some(error));
            return Ok(false);
        }
        let delay = self.backoff.next_backoff(&error);
        tokio::time::sleep(delay).await;
        self.parser = ChunkReader::new();
        Ok(true)
    }
}

/// Reads at most one row by key, reporting "not found" as `Ok(None)` and
/// more than one row as a protocol error (the server violated the
/// single-key contract).
pub async fn read_row(
    client: Client,
    table_name: impl Into<String>,
    app_profile_id: impl Into<String>,
    row_key: impl Into<Vec<u8>>,
    filter: Option<pb::RowFilter>,
) -> Result<Option<Row>, Error> {
    let retry = crate::retry::retryable(crate::retry::LimitedCount::new(1));
    let backoff = crate::retry::ExponentialBackoff::default();
    let mut reader = RowReader::new(
        client,
        table_name,
        app_profile_id,
        RowSet::from_key(row_key),
        filter,
        Some(1),
        retry,
        backoff,
    );
    let first = reader.next().await?;
    if first.is_none() {
        return Ok(None);
    }
    if reader.next().await?.is_some() {
        return Err(Error::MultipleRowsForSingleKey(2));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// S7's restart clipping: after yielding "r1", a discrete key at or
    /// before it drops out and a straddling range narrows to start just
    /// past it, matching the reader's actual restart-request construction.
    #[test]
    fn row_set_clip_after_drops_seen_keys_and_narrows_ranges() {
        let set = RowSet {
            row_keys: vec![b"r0".to_vec(), b"r1".to_vec(), b"r2".to_vec()],
            row_ranges: vec![RowRange {
                start: None,
                end: Some((Bound::Open, b"r9".to_vec())),
            }],
        };
        let clipped = set.clip_after(b"r1");
        assert_eq!(clipped.row_keys, vec![b"r2".to_vec()]);
        assert_eq!(clipped.row_ranges.len(), 1);
        assert_eq!(
            clipped.row_ranges[0].start,
            Some((Bound::Open, b"r1".to_vec()))
        );
    }

    #[test]
    fn row_range_clip_after_drops_range_already_passed() {
        let range = RowRange {
            start: None,
            end: Some((Bound::Closed, b"r1".to_vec())),
        };
        assert!(range.clip_after(b"r1").is_none());
        assert!(range.clip_after(b"r2").is_none());
        assert!(range.clip_after(b"r0").is_some());
    }

    #[test]
    fn row_set_is_empty_after_exhausting_every_bound() {
        let set = RowSet::from_key(b"r1".to_vec());
        let clipped = set.clip_after(b"r1");
        assert!(clipped.is_empty());
    }
}
