//! Reassembles a stream of server-sent cell chunks into committed rows.
//!
//! This is a pull-style state machine: the caller pushes chunks in with
//! [`ChunkReader::handle_chunk`] and pulls finished rows out with
//! [`ChunkReader::next`]. It holds at most one uncommitted row's worth of
//! accumulated cells plus at most one ready-but-unclaimed row at a time —
//! callers (the [`crate::reader::RowReader`]) are expected to drain a ready
//! row before feeding the next chunk.

use crate::error::Error;
use crate::key;
use crate::row::{Cell, PartialCell, Row};
use gcloud_bigtable_proto::bigtable::v2::{cell_chunk, CellChunk};
use std::cmp::Ordering;

#[derive(Default)]
pub struct ChunkReader {
    end_of_stream: bool,
    ready_row: Option<Row>,
    current_row_key: Option<Vec<u8>>,
    cells: Vec<Cell>,
    partial: PartialCell,
    first_chunk_of_cell: bool,
    last_committed_key: Option<Vec<u8>>,
}

impl ChunkReader {
    pub fn new() -> Self {
        ChunkReader {
            first_chunk_of_cell: true,
            ..Default::default()
        }
    }

    /// True if a committed row is ready to be taken with [`Self::next`].
    pub fn has_next(&self) -> bool {
        self.ready_row.is_some()
    }

    /// Takes the ready row, if any.
    pub fn next(&mut self) -> Option<Row> {
        self.ready_row.take()
    }

    pub fn handle_chunk(&mut self, chunk: CellChunk) -> Result<(), Error> {
        if self.end_of_stream {
            return Err(Error::Protocol("chunk received after end-of-stream"));
        }
        if self.ready_row.is_some() {
            return Err(Error::Protocol("chunk received before prior row was taken"));
        }

        if !chunk.row_key.is_empty() {
            if let Some(last) = &self.last_committed_key {
                if key::compare(&chunk.row_key, last) != Ordering::Greater {
                    return Err(Error::Protocol("row key did not increase"));
                }
            }
            self.partial.row_key = chunk.row_key.to_vec();
        }

        match &chunk.family_name {
            Some(family) => {
                let qualifier = chunk
                    .qualifier
                    .as_ref()
                    .ok_or(Error::Protocol("family_name present without qualifier"))?;
                self.partial.family_name = family.clone();
                self.partial.qualifier = qualifier.to_vec();
            }
            None => {
                if let Some(qualifier) = &chunk.qualifier {
                    self.partial.qualifier = qualifier.to_vec();
                }
            }
        }

        // A chunk only carries cell content if it starts a new cell (qualifier
        // present) or continues one already in progress from a prior chunk.
        // A reset/commit-only control chunk does neither and must not finalize
        // a spurious empty cell.
        let starts_new_cell = chunk.qualifier.is_some();
        let continues_cell = !self.first_chunk_of_cell;
        let cell_in_progress = starts_new_cell || continues_cell;

        if self.first_chunk_of_cell {
            self.partial.timestamp_micros = chunk.timestamp_micros;
        }

        self.partial.labels.extend(chunk.labels.iter().cloned());

        if cell_in_progress {
            if self.first_chunk_of_cell {
                let mut value = Vec::new();
                if chunk.value_size > 0 {
                    value.reserve(chunk.value_size as usize);
                }
                value.extend_from_slice(&chunk.value);
                self.partial.value = value;
            } else {
                self.partial.value.extend_from_slice(&chunk.value);
            }
        }

        let cell_complete = chunk.value_size == 0;
        if cell_in_progress && cell_complete {
            self.finalize_cell()?;
            self.first_chunk_of_cell = true;
        } else if cell_in_progress {
            self.first_chunk_of_cell = false;
        }
        let cell_pending = !self.first_chunk_of_cell;

        if let Some(cell_chunk::RowStatus::ResetRow(true)) = chunk.row_status {
            if cell_pending {
                return Err(Error::Protocol("reset_row while a cell was mid-assembly"));
            }
            self.reset_row();
        } else if let Some(cell_chunk::RowStatus::CommitRow(true)) = chunk.row_status {
            if cell_pending {
                return Err(Error::Protocol("commit_row while a cell was mid-assembly"));
            }
            self.commit_row()?;
        }

        Ok(())
    }

    pub fn handle_end_of_stream(&mut self) -> Result<(), Error> {
        if self.end_of_stream {
            return Err(Error::Protocol("handle_end_of_stream called twice"));
        }
        if !self.first_chunk_of_cell {
            return Err(Error::Protocol("end-of-stream with a cell mid-assembly"));
        }
        if !self.cells.is_empty() {
            return Err(Error::Protocol("end-of-stream with an uncommitted row"));
        }
        self.end_of_stream = true;
        Ok(())
    }

    fn finalize_cell(&mut self) -> Result<(), Error> {
        let cell = self.partial.finalize();
        match &self.current_row_key {
            None => {
                if cell.row_key.is_empty() {
                    return Err(Error::Protocol("first cell of a row has no row key"));
                }
                self.current_row_key = Some(cell.row_key.clone());
            }
            Some(current) => {
                if &cell.row_key != current {
                    return Err(Error::Protocol("cell row key does not match current row"));
                }
            }
        }
        self.cells.push(cell);
        Ok(())
    }

    fn reset_row(&mut self) {
        self.cells.clear();
        self.partial = PartialCell::default();
        self.current_row_key = None;
    }

    fn commit_row(&mut self) -> Result<(), Error> {
        if self.cells.is_empty() {
            return Err(Error::Protocol("commit_row with an empty cell list"));
        }
        let row_key = self
            .current_row_key
            .take()
            .expect("commit_row with a non-empty cell list always has a current row key");
        let row = Row {
            row_key: row_key.clone(),
            cells: std::mem::take(&mut self.cells),
        };
        self.last_committed_key = Some(row_key);
        self.ready_row = Some(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(row_key: &[u8], family: Option<&str>, qualifier: Option<&[u8]>, ts: i64, value: &[u8], status: Option<cell_chunk::RowStatus>) -> CellChunk {
        CellChunk {
            row_key: row_key.to_vec().into(),
            family_name: family.map(|s| s.to_string()),
            qualifier: qualifier.map(|q| q.to_vec().into()),
            timestamp_micros: ts,
            labels: vec![],
            value: value.to_vec().into(),
            value_size: 0,
            row_status: status,
        }
    }

    #[test]
    fn single_chunk_row() {
        let mut reader = ChunkReader::new();
        reader
            .handle_chunk(chunk(
                b"r1",
                Some("fam"),
                Some(b"col"),
                42000,
                b"value",
                Some(cell_chunk::RowStatus::CommitRow(true)),
            ))
            .unwrap();
        assert!(reader.has_next());
        let row = reader.next().unwrap();
        assert_eq!(row.row_key, b"r1");
        assert_eq!(row.cells.len(), 1);
        assert_eq!(row.cells[0].family_name, "fam");
        assert_eq!(row.cells[0].qualifier, b"col");
        assert_eq!(row.cells[0].timestamp_micros, 42000);
        assert_eq!(row.cells[0].value, b"value");
    }

    #[test]
    fn reset_row_discards_accumulated_state() {
        let mut reader = ChunkReader::new();
        reader
            .handle_chunk(chunk(b"r1", Some("fam"), Some(b"col"), 1, b"v1", None))
            .unwrap();
        reader
            .handle_chunk(chunk(b"", None, None, 0, b"", Some(cell_chunk::RowStatus::ResetRow(true))))
            .unwrap();
        reader
            .handle_chunk(chunk(
                b"r1",
                Some("fam"),
                Some(b"col2"),
                2,
                b"v2",
                Some(cell_chunk::RowStatus::CommitRow(true)),
            ))
            .unwrap();
        let row = reader.next().unwrap();
        assert_eq!(row.cells.len(), 1);
        assert_eq!(row.cells[0].qualifier, b"col2");
    }

    #[test]
    fn commit_row_with_no_cells_is_rejected() {
        let mut reader = ChunkReader::new();
        let err = reader
            .handle_chunk(chunk(b"r1", None, None, 0, b"", Some(cell_chunk::RowStatus::CommitRow(true))))
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn chunk_after_end_of_stream_is_rejected() {
        let mut reader = ChunkReader::new();
        reader.handle_end_of_stream().unwrap();
        let err = reader
            .handle_chunk(chunk(b"r1", Some("fam"), Some(b"col"), 1, b"v", None))
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn regressing_row_key_is_rejected() {
        let mut reader = ChunkReader::new();
        reader
            .handle_chunk(chunk(
                b"r2",
                Some("fam"),
                Some(b"col"),
                1,
                b"v",
                Some(cell_chunk::RowStatus::CommitRow(true)),
            ))
            .unwrap();
        reader.next();
        let err = reader
            .handle_chunk(chunk(b"r1", Some("fam"), Some(b"col"), 1, b"v", None))
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn chunk_before_prior_row_taken_is_rejected() {
        let mut reader = ChunkReader::new();
        reader
            .handle_chunk(chunk(
                b"r1",
                Some("fam"),
                Some(b"col"),
                1,
                b"v",
                Some(cell_chunk::RowStatus::CommitRow(true)),
            ))
            .unwrap();
        let err = reader
            .handle_chunk(chunk(
                b"r2",
                Some("fam"),
                Some(b"col"),
                1,
                b"v",
                Some(cell_chunk::RowStatus::CommitRow(true)),
            ))
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn value_split_across_chunks_is_appended() {
        let mut reader = ChunkReader::new();
        let mut first = chunk(b"r1", Some("fam"), Some(b"col"), 1, b"val", None);
        first.value_size = 6;
        reader.handle_chunk(first).unwrap();
        reader
            .handle_chunk(chunk(b"", None, None, 0, b"ue", Some(cell_chunk::RowStatus::CommitRow(true))))
            .unwrap();
        let row = reader.next().unwrap();
        assert_eq!(row.cells[0].value, b"value");
    }

    #[test]
    fn end_of_stream_with_uncommitted_row_is_rejected() {
        let mut reader = ChunkReader::new();
        reader
            .handle_chunk(chunk(b"r1", Some("fam"), Some(b"col"), 1, b"v", None))
            .unwrap();
        let err = reader.handle_end_of_stream().unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
