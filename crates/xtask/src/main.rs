use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;
use std::path::Path;

/// Crates the pure domain must never depend on.
const DOMAIN_FORBIDDEN: [&str; 6] = [
    "tokio",
    "sqlx",
    "tracing-subscriber",
    "dotenvy",
    "regex-lite",
    "sheetkeeper-engine",
];

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    manifest_path: String,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize)]
struct Dependency {
    name: String,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == "sheetkeeper-domain")
        .context("sheetkeeper-domain not found in workspace")?;

    let mut violations = forbidden_dependencies(domain);

    let src = Path::new(&domain.manifest_path)
        .parent()
        .context("domain manifest has no parent directory")?
        .join("src");
    violations.extend(forbidden_imports(&src)?);

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

fn forbidden_dependencies(package: &Package) -> Vec<String> {
    package
        .dependencies
        .iter()
        .filter(|d| DOMAIN_FORBIDDEN.contains(&d.name.as_str()))
        .map(|d| format!("{} depends on {}", package.name, d.name))
        .collect()
}

fn forbidden_imports(dir: &Path) -> anyhow::Result<Vec<String>> {
    let import = Regex::new(r"\b(tokio|sqlx|sheetkeeper_engine)::").context("import regex")?;
    let mut violations = Vec::new();

    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            violations.extend(forbidden_imports(&path)?);
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        for (number, line) in source.lines().enumerate() {
            if let Some(found) = import.captures(line).and_then(|c| c.get(1)) {
                violations.push(format!(
                    "{}:{} uses {}",
                    path.display(),
                    number + 1,
                    found.as_str()
                ));
            }
        }
    }
    Ok(violations)
}
