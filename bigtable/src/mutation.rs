//! Typed per-row mutations and their idempotency classification.
//!
//! Modeled after the free-function mutation builders in the sibling Spanner
//! client (`insert`/`update`/`delete`), adapted to Bigtable's cell-oriented
//! operations instead of Spanner's column-value rows.

use gcloud_bigtable_proto::bigtable::v2 as pb;

/// Sentinel used for `SetCell::timestamp_micros` meaning "let the server
/// assign the write timestamp." A mutation carrying this sentinel is never
/// idempotent, since retrying it produces a new timestamp each time.
pub const SERVER_ASSIGNED_TIMESTAMP: i64 = -1;

/// One typed change to a single row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    SetCell {
        family_name: String,
        column_qualifier: Vec<u8>,
        timestamp_micros: i64,
        value: Vec<u8>,
    },
    DeleteFromColumn {
        family_name: String,
        column_qualifier: Vec<u8>,
        start_timestamp_micros: Option<i64>,
        end_timestamp_micros: Option<i64>,
    },
    DeleteFromFamily {
        family_name: String,
    },
    DeleteFromRow,
}

impl Mutation {
    /// A SetCell with an explicit timestamp is idempotent (re-applying it
    /// writes the same version again); one relying on the server to assign
    /// the timestamp is not, since every retry would mint a new version.
    /// Every other mutation kind is unconditionally idempotent.
    pub(crate) fn is_idempotent(&self) -> bool {
        match self {
            Mutation::SetCell {
                timestamp_micros, ..
            } => *timestamp_micros != SERVER_ASSIGNED_TIMESTAMP,
            Mutation::DeleteFromColumn { .. }
            | Mutation::DeleteFromFamily { .. }
            | Mutation::DeleteFromRow => true,
        }
    }
}

impl From<Mutation> for pb::Mutation {
    fn from(value: Mutation) -> Self {
        let mutation = match value {
            Mutation::SetCell {
                family_name,
                column_qualifier,
                timestamp_micros,
                value,
            } => pb::mutation::Mutation::SetCell(pb::mutation::SetCell {
                family_name,
                column_qualifier: column_qualifier.into(),
                timestamp_micros,
                value: value.into(),
            }),
            Mutation::DeleteFromColumn {
                family_name,
                column_qualifier,
                start_timestamp_micros,
                end_timestamp_micros,
            } => pb::mutation::Mutation::DeleteFromColumn(pb::mutation::DeleteFromColumn {
                family_name,
                column_qualifier: column_qualifier.into(),
                time_range: if start_timestamp_micros.is_some() || end_timestamp_micros.is_some() {
                    Some(pb::TimestampRange {
                        start_timestamp_micros: start_timestamp_micros.unwrap_or(0),
                        end_timestamp_micros: end_timestamp_micros.unwrap_or(0),
                    })
                } else {
                    None
                },
            }),
            Mutation::DeleteFromFamily { family_name } => {
                pb::mutation::Mutation::DeleteFromFamily(pb::mutation::DeleteFromFamily {
                    family_name,
                })
            }
            Mutation::DeleteFromRow => {
                pb::mutation::Mutation::DeleteFromRow(pb::mutation::DeleteFromRow {})
            }
        };
        pb::Mutation {
            mutation: Some(mutation),
        }
    }
}

/// An ordered sequence of mutations against one row. Ordering is preserved
/// end to end, from caller input through wire encoding to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleRowMutation {
    pub row_key: Vec<u8>,
    pub mutations: Vec<Mutation>,
}

impl SingleRowMutation {
    pub fn new(row_key: impl Into<Vec<u8>>) -> Self {
        SingleRowMutation {
            row_key: row_key.into(),
            mutations: Vec::new(),
        }
    }

    pub fn add(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    /// An entry is idempotent iff every one of its constituent mutations is.
    /// An entry with zero mutations is vacuously idempotent.
    pub(crate) fn is_idempotent(&self) -> bool {
        self.mutations.iter().all(Mutation::is_idempotent)
    }
}

impl From<SingleRowMutation> for pb::mutate_rows_request::Entry {
    fn from(value: SingleRowMutation) -> Self {
        pb::mutate_rows_request::Entry {
            row_key: value.row_key.into(),
            mutations: value.mutations.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_with_explicit_timestamp_is_idempotent() {
        let m = Mutation::SetCell {
            family_name: "fam".into(),
            column_qualifier: b"col".to_vec(),
            timestamp_micros: 0,
            value: b"v".to_vec(),
        };
        assert!(m.is_idempotent());
    }

    #[test]
    fn set_cell_with_server_timestamp_is_not_idempotent() {
        let m = Mutation::SetCell {
            family_name: "fam".into(),
            column_qualifier: b"col".to_vec(),
            timestamp_micros: SERVER_ASSIGNED_TIMESTAMP,
            value: b"v".to_vec(),
        };
        assert!(!m.is_idempotent());
    }

    #[test]
    fn entry_idempotency_is_the_and_of_its_mutations() {
        let entry = SingleRowMutation::new("row")
            .add(Mutation::SetCell {
                family_name: "fam".into(),
                column_qualifier: b"col".to_vec(),
                timestamp_micros: 0,
                value: b"v".to_vec(),
            })
            .add(Mutation::SetCell {
                family_name: "fam".into(),
                column_qualifier: b"col2".to_vec(),
                timestamp_micros: SERVER_ASSIGNED_TIMESTAMP,
                value: b"v".to_vec(),
            });
        assert!(!entry.is_idempotent());
    }

    #[test]
    fn deletes_are_always_idempotent() {
        assert!(Mutation::DeleteFromRow.is_idempotent());
        assert!(Mutation::DeleteFromFamily {
            family_name: "fam".into()
        }
        .is_idempotent());
    }
}
