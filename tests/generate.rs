use std::fs;
use std::path::Path;
use std::process::Command;

const OUTPUTS: [&str; 3] = [
    "orbital_trajectory.png",
    "signal_metrics.png",
    "frequency_search.png",
];

fn png_dimensions(path: &Path) -> (u32, u32) {
    let data = fs::read(path).unwrap();
    assert_eq!(&data[1..4], b"PNG", "{} is not a PNG", path.display());
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    (width, height)
}

#[test]
fn test_binary_writes_three_full_size_images() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_satviz"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in OUTPUTS {
        assert!(stdout.contains(&format!("✓ Generated: {} (4000x4000)", name)));

        let path = dir.path().join(name);
        assert!(fs::metadata(&path).unwrap().len() > 0);
        assert_eq!(png_dimensions(&path), (4000, 4000));
    }
    assert!(stdout.contains("✓ ALL VISUALIZATIONS GENERATED SUCCESSFULLY!"));

    // Nothing but the three images is produced
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), OUTPUTS.len());
}

#[test]
fn test_binary_fails_when_output_is_blocked() {
    let dir = tempfile::tempdir().unwrap();
    // A directory in place of the second image makes that write fail
    fs::create_dir(dir.path().join("signal_metrics.png")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_satviz"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("✓ Generated: orbital_trajectory.png"));
    assert!(!stdout.contains("✓ Generated: signal_metrics.png"));
    assert!(!stdout.contains("✓ Generated: frequency_search.png"));
    assert!(!stdout.contains("SUCCESSFULLY"));

    // The image written before the failure stays on disk
    assert!(dir.path().join("orbital_trajectory.png").is_file());
    assert!(!dir.path().join("frequency_search.png").exists());
}
