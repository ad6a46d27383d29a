use std::process::Command;

fn cube_defence() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cube-defence"))
}

#[test]
fn demo_session_prints_a_summary() {
    let output = cube_defence()
        .args([
            "--seconds",
            "30",
            "--wave-interval",
            "5",
            "--defender",
            "FRONT:1:4",
        ])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run cube-defence");

    assert!(output.status.success(), "cube-defence exited with {}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("waves released: 2/2"), "{stdout}");
    assert!(stdout.contains("coins: $"), "{stdout}");
}

#[test]
fn unreadable_level_fails_with_context() {
    let output = cube_defence()
        .args(["--level", "/nonexistent/level.toml"])
        .output()
        .expect("failed to run cube-defence");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read level"), "{stderr}");
}

#[test]
fn malformed_defender_tile_is_rejected() {
    let output = cube_defence()
        .args(["--defender", "FRONT-1-4"])
        .output()
        .expect("failed to run cube-defence");

    assert!(!output.status.success());
}
