#![allow(clippy::doc_lazy_continuation)]
#![allow(clippy::large_enum_variant)]

#[path = "google.rpc.status.rs"]
pub mod rpc;

#[path = ""]
pub mod bigtable {
    #[path = "google.bigtable.v2.rs"]
    pub mod v2;

    #[cfg(feature = "admin")]
    #[path = ""]
    pub mod admin {
        #[path = "google.bigtable.admin.v2.rs"]
        pub mod v2;
    }
}
