fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The generated bindings are checked in under src/pubsub/generated so the
    // crate builds without protoc. Set PUBSUB_PROBE_REGENERATE=1 to refresh
    // them from the vendored proto file.
    println!("cargo:rerun-if-env-changed=PUBSUB_PROBE_REGENERATE");
    if std::env::var_os("PUBSUB_PROBE_REGENERATE").is_none() {
        return Ok(());
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir("src/pubsub/generated")
        .compile_protos(&["proto/google/pubsub/v1/pubsub.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/google/pubsub/v1/pubsub.proto");

    Ok(())
}
