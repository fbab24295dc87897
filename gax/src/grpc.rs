//! Thin re-export of the tonic types the call framework builds requests
//! with, so callers don't need a direct `tonic` dependency of their own.
pub use tonic::{Code, IntoRequest, Request, Response, Status, Streaming};
