/// The `Status` type used by gRPC APIs to report a per-entry outcome that
/// is carried inside a larger response message rather than as the call's
/// own terminal status.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    /// The status code, which should be an enum value of `google.rpc.Code`.
    #[prost(int32, tag = "1")]
    pub code: i32,
    /// A developer-facing error message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
