// Entry point that makes `nist_vectors/mod.rs` a discoverable integration test binary.
#[path = "nist_vectors/mod.rs"]
mod nist_vectors;
