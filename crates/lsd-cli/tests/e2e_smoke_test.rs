use std::{fs, path::PathBuf};

use tempfile::tempdir;

use lsd_cli::{Args, run};

/// Collects all .lsd files from a directory
fn collect_lsd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lsd")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

/// Demos live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_lsd_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy()));

        match run(&args_for(demo_path, output_path.clone())) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).unwrap();
                assert!(svg.contains("</svg>"), "{} wrote an incomplete SVG", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_lsd_files(demos_path().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, output_path.clone())).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "{} wrote output", demo_path.display());
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_config_file_and_overrides() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_path().join("close_levels.lsd");
    let output_path = temp_dir.path().join("overrides.svg");

    let args = Args {
        config: Some(demos_path().join("config.toml").to_string_lossy().to_string()),
        spacing: Some(5.0),
        style: Some(lsd::style::LevelStyle::Platform),
        proportional: true,
        ..args_for(&demo, output_path.clone())
    };

    run(&args).unwrap();
    assert!(fs::read_to_string(output_path).unwrap().contains("<polyline"));
}
