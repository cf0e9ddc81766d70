//! Verifies the server Dockerfile builds the binary and sets its runtime config.

use std::fs;
use std::path::PathBuf;

fn read_dockerfile() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Dockerfile");
    fs::read_to_string(&path).expect("read sebit-server Dockerfile")
}

#[test]
fn dockerfile_builds_the_workspace_members() {
    let dockerfile = read_dockerfile();
    let required = [
        "COPY sebit-core",
        "COPY sebit-server",
        "cargo build --release -p sebit-server",
    ];
    for token in required {
        assert!(
            dockerfile.contains(token),
            "Dockerfile missing build step: {token}"
        );
    }
}

#[test]
fn dockerfile_configures_the_listener() {
    let dockerfile = read_dockerfile();
    let settings = [
        "SEBIT_HOST=0.0.0.0",
        "SEBIT_PORT=8080",
        "SEBIT_DETAIL_MODE=strict",
        "EXPOSE 8080",
    ];
    for setting in settings {
        assert!(
            dockerfile.contains(setting),
            "Dockerfile missing runtime setting: {setting}"
        );
    }
}
