#[cfg(feature = "generate")]
fn main() {
    tonic_build::configure()
        .build_server(false)
        .out_dir("src") // checked-in alongside the hand-maintained `lib.rs` module tree
        .compile(
            &[
                "googleapis/google/bigtable/v2/bigtable.proto",
                "googleapis/google/bigtable/admin/v2/bigtable_table_admin.proto",
            ],
            &["googleapis"],
        )
        .unwrap();
}

#[cfg(not(feature = "generate"))]
fn main() {}
