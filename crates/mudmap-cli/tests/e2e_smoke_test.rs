use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use mudmap_cli::{Args, run};

/// Demo towers live at the workspace root, not in the crate.
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: PathBuf, bundle: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        bundle: bundle.map(|path| path.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_toml_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No demo towers found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("{stem}.svg"));
        let bundle_path = temp_dir.path().join(format!("{stem}.zip"));

        let args = args_for(demo_path, output_path.clone(), Some(bundle_path.clone()));

        if let Err(e) = run(&args) {
            failed_demos.push((demo_path.clone(), e));
            continue;
        }

        let svg = fs::read_to_string(&output_path).expect("SVG output should exist");
        assert!(svg.contains("</svg>"), "{} produced incomplete SVG", stem);
        assert!(bundle_path.exists(), "{} produced no bundle", stem);
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_toml_files(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        let args = args_for(demo_path, output_path, None);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
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

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.toml");

    let args = args_for(&missing, temp_dir.path().join("out.svg"), None);
    assert!(run(&args).is_err());
}

#[test]
fn e2e_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nwidth = 500\nheight = 500\n").unwrap();

    let output_path = temp_dir.path().join("out.svg");
    let mut args = args_for(
        &demos_dir().join("quota_share.toml"),
        output_path.clone(),
        None,
    );
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("render with explicit config");
    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("data-key=\"qs-1\""));
}
