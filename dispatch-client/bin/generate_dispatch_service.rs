use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating Dispatch Service types...");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let out_dir = manifest_dir.join("src/proto");
    let proto_folder = manifest_dir.join("proto");

    let proto_files = [
        proto_folder.join("frequenz/api/common/v1/components.proto"),
        proto_folder.join("frequenz/api/common/v1/pagination.proto"),
        proto_folder.join("frequenz/api/dispatch/v1/dispatch.proto"),
    ];

    if !out_dir.exists() {
        fs::create_dir_all(&out_dir)?;
    }

    // The server half is generated too: `dispatch-testing` implements it
    // to provide an in-memory fake of the service.
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir(&out_dir)
        .compile_protos(&proto_files, &[proto_folder])?;

    println!("Done! Generated files are in src/proto");

    Ok(())
}
