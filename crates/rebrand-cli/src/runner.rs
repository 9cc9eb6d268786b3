use crate::args::EmitFormat;
use anyhow::{bail, Context, Result};
use rebrand_core::ast::Stylesheet;
use rebrand_core::codegen::to_less;
use rebrand_core::{rebrand, RebrandStats, VariableRegistry};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const TREE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// One stylesheet tree to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Path below the directory argument it was found in, or the file name.
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct FileReport {
    pub input: InputFile,
    pub output: String,
    pub changed: bool,
    pub stats: RebrandStats,
}

fn is_tree_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TREE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Expands directory arguments into the tree files they contain.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_tree_file(entry.path()) {
                    let relative = entry
                        .path()
                        .strip_prefix(path)
                        .unwrap_or(entry.path())
                        .to_path_buf();
                    found.push(InputFile {
                        path: entry.path().to_path_buf(),
                        relative,
                    });
                }
            }
            debug!(dir = %path.display(), files = found.len(), "Collected directory inputs");
            inputs.extend(found);
        } else if path.is_file() {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.clone());
            inputs.push(InputFile {
                path: path.clone(),
                relative,
            });
        } else {
            bail!("input not found: {}", path.display());
        }
    }
    Ok(inputs)
}

fn parse_tree(path: &Path, source: &str) -> Result<Stylesheet> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(source).context("invalid JSON stylesheet tree")
    } else {
        serde_yaml::from_str(source).context("invalid YAML stylesheet tree")
    }
}

fn render(sheet: &Stylesheet, emit: EmitFormat) -> Result<String> {
    match emit {
        EmitFormat::Json => {
            let mut json = serde_json::to_string_pretty(sheet)?;
            json.push('\n');
            Ok(json)
        }
        EmitFormat::Less => Ok(to_less(sheet)),
    }
}

/// Reads, rebrands and renders one tree.
pub fn process_file(
    input: &InputFile,
    registry: &VariableRegistry,
    emit: EmitFormat,
) -> Result<FileReport> {
    let source = fs::read_to_string(&input.path)
        .with_context(|| format!("failed to read {}", input.path.display()))?;
    let original = parse_tree(&input.path, &source)
        .with_context(|| format!("failed to parse {}", input.path.display()))?;

    let mut sheet = original.clone();
    let stats = rebrand(&mut sheet, registry)
        .with_context(|| format!("failed to rebrand {}", input.path.display()))?;
    let changed = sheet != original;
    info!(
        file = %input.path.display(),
        changed,
        rules_synthesized = stats.rules_synthesized,
        "Processed stylesheet"
    );

    Ok(FileReport {
        input: input.clone(),
        output: render(&sheet, emit)?,
        changed,
        stats,
    })
}

/// Where `input` is written below `out_dir`.
pub fn output_path(out_dir: &Path, input: &InputFile, emit: EmitFormat) -> PathBuf {
    out_dir.join(&input.relative).with_extension(emit.extension())
}

/// Fails when two inputs would be written to the same output file.
pub fn ensure_distinct_outputs(
    inputs: &[InputFile],
    out_dir: &Path,
    emit: EmitFormat,
) -> Result<()> {
    let mut targets: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    for input in inputs {
        let target = output_path(out_dir, input, emit);
        if let Some(previous) = targets.insert(target.clone(), input.path.as_path()) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.path.display(),
                target.display()
            );
        }
    }
    Ok(())
}

/// Writes `report` below `out_dir`, keeping its relative path.
pub fn write_report(report: &FileReport, out_dir: &Path, emit: EmitFormat) -> Result<PathBuf> {
    let target = output_path(out_dir, &report.input, emit);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&target, &report.output)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}
