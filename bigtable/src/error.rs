use gcloud_bigtable_gax::status::{Code, Status};

/// The code used to mark a bulk-mutation entry whose outcome could not be
/// determined because the stream closed before its per-entry status arrived.
///
/// Using a dedicated code rather than `Ok` (which the original upstream
/// client does) lets callers branch on "this needs verification" without
/// confusing it with a confirmed success.
pub const INDETERMINATE_CODE: Code = Code::Unknown;
const INDETERMINATE_MESSAGE: &str =
    "mutation outcome is indeterminate: the stream closed before a per-entry status was returned";

/// Returns the `Status` used to mark an indeterminate bulk-mutation entry.
pub fn indeterminate_status() -> Status {
    Status::new(tonic::Status::new(
        tonic::Code::Unknown,
        INDETERMINATE_MESSAGE,
    ))
}

/// Returns true if `status` is the indeterminate marker produced by
/// [`indeterminate_status`].
pub fn is_indeterminate(status: &Status) -> bool {
    status.code() == INDETERMINATE_CODE && status.message() == INDETERMINATE_MESSAGE
}

/// Errors surfaced by this crate's public API.
///
/// Every variant is reachable through [`std::error::Error::source`] down to
/// the underlying `tonic::Status`, so callers that only care about the wire
/// status can match on `Error::Status` and ignore the rest.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The RPC failed and the retry policy gave up (or the error was
    /// permanent to begin with).
    #[error(transparent)]
    Status(#[from] Status),

    /// The channel pool could not be built or rebuilt.
    #[error(transparent)]
    Connection(#[from] gcloud_bigtable_gax::conn::Error),

    /// The server's chunk stream violated a wire-format invariant. The
    /// stream is closed; a fresh one may succeed, so [`crate::reader::RowReader`]
    /// runs every occurrence through [`Error::into_retryable`] before handing
    /// it to the retry policy, turning it into an internal-error `Status`
    /// rather than consulting the policy on this variant directly.
    #[error("row parser protocol error: {0}")]
    Protocol(&'static str),

    /// A caller used the public API in a way that is a programming error,
    /// not a runtime condition (calling `next()` with no partial data ready,
    /// feeding a big-endian codec a slice whose length is not 8, etc).
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// `RowReader::read_row` observed more than one row for a single-key
    /// request.
    #[error("expected at most one row, got {0}")]
    MultipleRowsForSingleKey(usize),
}

impl Error {
    /// True if this error is the "don't know" bulk-mutation marker. Only
    /// meaningful on `Error::Status`.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Error::Status(s) if is_indeterminate(s))
    }

    /// Normalizes a parser protocol violation into an internal-error
    /// `Status` so it can be classified by gRPC code like any other RPC
    /// failure; every other variant passes through unchanged. The stream is
    /// always closed by the time this is called, but a fresh one may
    /// succeed, so this is what lets `CodeFiltered` (which only ever sees
    /// `Error::Status`, via `TryAs`) consider retrying it.
    pub(crate) fn into_retryable(self) -> Error {
        match self {
            Error::Protocol(message) => {
                Error::Status(Status::new(tonic::Status::new(tonic::Code::Internal, message)))
            }
            other => other,
        }
    }
}

impl gcloud_bigtable_gax::retry::TryAs<Status> for Error {
    fn try_as(&self) -> Result<&Status, ()> {
        match self {
            Error::Status(s) => Ok(s),
            _ => Err(()),
        }
    }
}

impl From<tonic::Status> for Error {
    fn from(value: tonic::Status) -> Self {
        Error::Status(Status::from(value))
    }
}
