//! The logical row/cell shapes the parser assembles from a chunk stream.

/// One versioned value within a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row_key: Vec<u8>,
    pub family_name: String,
    pub qualifier: Vec<u8>,
    pub timestamp_micros: i64,
    pub labels: Vec<String>,
    pub value: Vec<u8>,
}

/// A complete, committed row: a key plus the ordered cells the server sent
/// for it. Only ever constructed by the parser once a commit marker has
/// been seen — there is no way to observe a partially-built row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub row_key: Vec<u8>,
    pub cells: Vec<Cell>,
}

/// Scratch space for the cell currently being assembled from one or more
/// chunks. Any subset of fields may be populated at a given point, mirroring
/// the wire chunk's own optionality.
#[derive(Clone, Debug, Default)]
pub(crate) struct PartialCell {
    pub row_key: Vec<u8>,
    pub family_name: String,
    pub qualifier: Vec<u8>,
    pub timestamp_micros: i64,
    pub labels: Vec<String>,
    pub value: Vec<u8>,
}

impl PartialCell {
    /// Copies the identity fields (row, family, qualifier) since the server
    /// is permitted to reuse the same chunk buffers across cells, but moves
    /// the value and labels, which are this cell's alone.
    pub(crate) fn finalize(&mut self) -> Cell {
        let cell = Cell {
            row_key: self.row_key.clone(),
            family_name: self.family_name.clone(),
            qualifier: self.qualifier.clone(),
            timestamp_micros: self.timestamp_micros,
            labels: std::mem::take(&mut self.labels),
            value: std::mem::take(&mut self.value),
        };
        cell
    }
}
