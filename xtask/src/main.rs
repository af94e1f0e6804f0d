//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use pathlabel_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(pathlabel_types::LabelReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(pathlabel_settings::PathlabelConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "pathlabel.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "pathlabel.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture configs and golden reports");
    eprintln!("  conform-full      conform + run the pathlabel binary on every fixture");
}

/// A fixture's config file and its format.
fn fixture_config(dir: &Path) -> Option<(PathBuf, pathlabel_settings::ConfigFormat)> {
    ["pathlabel.toml", "pathlabel.yml", "pathlabel.yaml"]
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
        .map(|p| {
            let format = pathlabel_settings::ConfigFormat::from_path(&p.to_string_lossy());
            (p, format)
        })
}

fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    let mut out = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() && path.join("expected.report.json").exists() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn fixture_name(dir: &Path) -> String {
    dir.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn compile_report_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema_value =
        serde_json::to_value(generate_report_schema()).context("Failed to convert schema")?;
    jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))
}

/// Validate every fixture:
/// 1. The golden report validates against the report schema.
/// 2. The config loads, unless the golden report is a `config_invalid` error.
/// 3. Every recorded match is a real prefix match.
fn conform() -> anyhow::Result<()> {
    let compiled = compile_report_schema()?;
    println!("✓ pathlabel.report.v1 schema compiles");

    let mut errors = Vec::new();
    let dirs = fixture_dirs()?;
    if dirs.is_empty() {
        bail!("No fixtures found in {}", fixtures_dir().display());
    }

    for dir in &dirs {
        let name = fixture_name(dir);
        let golden_path = dir.join("expected.report.json");
        let content = fs::read_to_string(&golden_path)
            .with_context(|| format!("Failed to read {}", golden_path.display()))?;
        let golden: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", golden_path.display()))?;

        for err in compiled.iter_errors(&golden) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        let expects_config_error = golden
            .pointer("/error/code")
            .and_then(|v| v.as_str())
            .is_some_and(|code| code == pathlabel_types::ids::CODE_CONFIG_INVALID);

        match fixture_config(dir) {
            Some((path, format)) => {
                let text = fs::read_to_string(&path)?;
                let loaded = pathlabel_settings::load_config(&text, format);
                match (loaded, expects_config_error) {
                    (Ok(_), true) => errors.push(format!(
                        "fixture '{}': config loads but the golden report expects config_invalid",
                        name
                    )),
                    (Err(e), false) => {
                        errors.push(format!("fixture '{}': config rejected: {}", name, e))
                    }
                    _ => {}
                }
            }
            None => errors.push(format!("fixture '{}': no pathlabel config", name)),
        }

        if let Some(matches) = golden.get("matches").and_then(|v| v.as_array()) {
            for m in matches {
                let pattern = m.get("pattern").and_then(|v| v.as_str()).unwrap_or_default();
                let path = m.get("path").and_then(|v| v.as_str()).unwrap_or_default();
                if pattern.is_empty() || !pathlabel_domain::prefix_matches(pattern, path) {
                    errors.push(format!(
                        "fixture '{}': match '{}' is not a prefix of '{}'",
                        name, pattern, path
                    ));
                }
            }
        }

        println!("  ✓ {} checked", name);
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", dirs.len());
    Ok(())
}

/// `conform` plus: run the built binary on each fixture and compare against the
/// golden report after normalization.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: pathlabel binary output ---\n");

    let compiled = compile_report_schema()?;
    let pathlabel_bin = project_root().join("target").join("debug").join("pathlabel");

    #[cfg(target_os = "windows")]
    let pathlabel_bin = pathlabel_bin.with_extension("exe");

    if !pathlabel_bin.exists() {
        bail!(
            "pathlabel binary not found at {}.\n\
            Run `cargo build -p pathlabel-cli` first.",
            pathlabel_bin.display()
        );
    }

    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let Some((config_path, _)) = fixture_config(&dir) else {
            continue;
        };
        let changed = dir.join("changed.txt");
        if !changed.exists() {
            continue;
        }

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&pathlabel_bin)
            .arg("--repo-root")
            .arg(&dir)
            .arg("--config")
            .arg(config_path.file_name().unwrap_or_default())
            .arg("match")
            .arg("--files")
            .arg(&changed)
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run pathlabel on fixture '{}'", name))?;

        if !report_out.exists() {
            errors.push(format!(
                "fixture '{}': no report written (exit {:?}): {}",
                name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report_value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_out)?)
            .with_context(|| format!("Failed to parse report for fixture '{}'", name))?;

        for err in compiled.iter_errors(&report_value) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        let golden_value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("expected.report.json"))?)?;
        if normalize_nondeterministic(report_value) != normalize_nondeterministic(golden_value) {
            errors.push(format!(
                "fixture '{}': output differs from expected.report.json",
                name
            ));
        } else {
            println!("  ✓ fixture '{}' matches golden report", name);
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
