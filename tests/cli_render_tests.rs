//! End-to-end tests for `yearcal svg` and `yearcal pdf`.

use std::fs;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the yearcal binary
fn yearcal_bin() -> &'static str {
    env!("CARGO_BIN_EXE_yearcal")
}

#[test]
fn test_svg_to_stdout() {
    let (config_path, _temp_dir) = create_temp_config_file(&test_config(2025));

    let output = Command::new(yearcal_bin())
        .args(["svg", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"), "SVG should be written to stdout");
    assert_eq!(count(&stdout, r#"<g class="day" "#), 365);
}

#[test]
fn test_svg_to_file_with_year_override() {
    let (config_path, temp_dir) = create_temp_config_file(&test_config_full_featured(2025));
    let out = temp_dir.path().join("out/calendar.svg");

    let output = Command::new(yearcal_bin())
        .args([
            "svg",
            "--config",
            config_path.to_str().unwrap(),
            "--year",
            "2024",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let svg = fs::read_to_string(&out).expect("Output file should exist");
    assert!(svg.contains(r#"data-date="2024-02-29""#));
    assert!(String::from_utf8_lossy(&output.stdout).contains("✓"));
}

#[test]
fn test_config_formats() {
    let cases = [
        ("calendar.toml", "year = 2027\ntheme = \"ocean\"\n"),
        ("calendar.yaml", "year: 2027\ntheme: ocean\n"),
        ("calendar.json5", "{ year: 2027, theme: 'ocean', }"),
    ];

    for (name, content) in cases {
        let (path, _temp_dir) = create_temp_file(name, content);
        let output = Command::new(yearcal_bin())
            .args(["svg", "--config", path.to_str().unwrap()])
            .output()
            .expect("Failed to execute command");

        assert_eq!(
            output.status.code(),
            Some(0),
            "{name}: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(String::from_utf8_lossy(&output.stdout).contains(">2027</"));
    }
}

#[test]
fn test_invalid_year_exits_with_validation_code() {
    let (config_path, _temp_dir) = create_temp_file("calendar.json", r#"{"year": 12}"#);

    let output = Command::new(yearcal_bin())
        .args(["svg", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_malformed_config_exits_with_validation_code() {
    let (config_path, _temp_dir) = create_temp_file("calendar.json", "{ year: ");

    let output = Command::new(yearcal_bin())
        .args(["svg", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_config_exits_with_io_code() {
    let output = Command::new(yearcal_bin())
        .args(["svg", "--config", "/nonexistent/calendar.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_to_file() {
    let (config_path, temp_dir) = create_temp_config_file(&test_config(2025));
    let out = temp_dir.path().join("calendar.pdf");

    let output = Command::new(yearcal_bin())
        .args([
            "pdf",
            "--config",
            config_path.to_str().unwrap(),
            "--theme",
            "midnight",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let bytes = fs::read(&out).expect("PDF should be written");
    assert!(bytes.starts_with(b"%PDF"));
}
