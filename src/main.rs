mod cli;

use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{Cli, Commands, PermissionsAction};
use colored::Colorize;
use rayon::prelude::*;
use skillsync::config::PermissionsConfig;
use skillsync::detector::{named_result, Detector};
use skillsync::error::PermissionError;
use skillsync::output::{self, OutputFormat};
use skillsync::permissions::{Checker, OperationType};
use skillsync::platform::{Environment, Platform, Scope};
use skillsync::report::{LocatedDetection, Report, Status};
use skillsync::result::ValidationResult;
use skillsync::similarity::{Algorithm, Matcher, SimilarityConfig};
use skillsync::skill::{discover, Skill};
use skillsync::validation::{ValidationOptions, Validator};

/// Extensions the `scan` command reads when given a directory.
const SCAN_EXTENSIONS: &[&str] = &["md", "mdc", "txt", "json", "yaml", "yml"];

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate {
            source,
            target,
            scope,
            strict,
            check_conflicts,
            scan_secrets,
            similarity,
            format,
        } => {
            let source = parse_or_exit::<Platform>(&source);
            let target = parse_or_exit::<Platform>(&target);
            let scope = parse_or_exit::<Scope>(&scope);
            let config = load_config_or_exit(cli.config.as_deref());

            let validator = Validator::new(Environment::from_process());
            let skills = load_source_skills(validator.environment(), source, scope);

            let options = ValidationOptions {
                strict_mode: strict,
                check_conflicts,
                scan_content: scan_secrets,
                similarity: similarity.then(SimilarityConfig::default),
                scope,
            };
            let result = validator.validate_source_target(source, target, &skills, &options);
            let report = Report::new(format!("{source} -> {target}"), result);
            emit(&report, &format);

            if !report.passed() {
                std::process::exit(1);
            }

            // Validation passed; the write itself is still subject to the gate.
            let checker = Checker::new(&config);
            if let Err(e) = checker
                .check_operation(OperationType::Write)
                .and_then(|()| checker.check_scope(scope))
            {
                eprintln!("{} {e}", "Sync not permitted:".red().bold());
                std::process::exit(1);
            }
            std::process::exit(0);
        }

        Commands::Scan { paths, format } => {
            for path in &paths {
                if !path.exists() {
                    eprintln!("Error: path does not exist: {}", path.display());
                    std::process::exit(2);
                }
            }

            let files: Vec<PathBuf> = paths
                .iter()
                .flat_map(|p| {
                    if p.is_dir() {
                        collect_files(p, SCAN_EXTENSIONS)
                    } else {
                        vec![p.clone()]
                    }
                })
                .collect();

            let detector = Detector::default();
            let scanned: Vec<(ValidationResult, Vec<LocatedDetection>)> = files
                .par_iter()
                .map(|file| scan_file(&detector, file))
                .collect();

            let mut result = ValidationResult::new();
            let mut detections = Vec::new();
            for (r, d) in scanned {
                result.merge(r);
                detections.extend(d);
            }

            let subject = paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let report = Report::new(subject, result).with_detections(detections);
            emit(&report, &format);
            std::process::exit(if report.passed() { 0 } else { 1 });
        }

        Commands::Similar {
            platforms,
            threshold,
            algorithm,
            char_mode,
            ngram_size,
            format,
        } => {
            let env = Environment::from_process();
            let mut skills = Vec::new();
            for name in &platforms {
                let platform = parse_or_exit::<Platform>(name);
                skills.extend(load_source_skills(&env, platform, Scope::User));
            }

            let matcher = Matcher::new(SimilarityConfig {
                threshold,
                algorithm: Algorithm::from_name(&algorithm),
                ngram_size,
                line_mode: !char_mode,
            });
            let matches = matcher.find_similar(&skills);
            tracing::info!(skills = skills.len(), pairs = matches.len(), "similarity search done");
            print!(
                "{}",
                output::format_matches(&matches, matcher.config(), &format)
            );
        }

        Commands::Compare {
            file_a,
            file_b,
            algorithm,
            char_mode,
        } => {
            let a = read_or_exit(&file_a);
            let b = read_or_exit(&file_b);
            let matcher = Matcher::new(SimilarityConfig {
                algorithm: Algorithm::from_name(&algorithm),
                line_mode: !char_mode,
                ..SimilarityConfig::default()
            });
            println!(
                "{:.4} ({})",
                matcher.compare(&a, &b),
                matcher.config().algorithm
            );
        }

        Commands::Permissions { action } => run_permissions(cli.config.as_deref(), action),

        Commands::Platforms => {
            let env = Environment::from_process();
            println!("{}", "Platforms".bold().underline());
            println!();
            for platform in Platform::ALL {
                let extensions: Vec<&str> = platform
                    .allowed_extensions()
                    .iter()
                    .map(|e| if e.is_empty() { "(none)" } else { e })
                    .collect();
                println!("  {}", platform.name().bold());
                for scope in [Scope::User, Scope::Repo] {
                    let shown = match env.platform_path_for_scope(platform, scope) {
                        Ok(path) => path.display().to_string(),
                        Err(e) => e.to_string().dimmed().to_string(),
                    };
                    println!("    {:<12} {shown}", format!("{scope}:"));
                }
                println!("    {:<12} {}", "extensions:", extensions.join(", "));
                println!("    {:<12} {}", "override:", platform.env_var().dimmed());
            }
        }
    }
}

fn run_permissions(config_path: Option<&Path>, action: PermissionsAction) {
    match action {
        PermissionsAction::Show => {
            let config = load_config_or_exit(config_path);
            match config.to_yaml() {
                Ok(yaml) => print!("{yaml}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            }
        }

        PermissionsAction::Validate => {
            let path = config_path
                .map(Path::to_path_buf)
                .or_else(|| PermissionsConfig::default_path().ok());
            let result = match path {
                Some(ref p) if p.exists() => match std::fs::read_to_string(p) {
                    Ok(text) => PermissionsConfig::validate_yaml(&text),
                    Err(e) => {
                        eprintln!("Error reading {}: {e}", p.display());
                        std::process::exit(2);
                    }
                },
                Some(ref p) if config_path.is_some() => {
                    eprintln!("Error: config file not found: {}", p.display());
                    std::process::exit(2);
                }
                _ => PermissionsConfig::default().validate(),
            };
            let subject = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "permissions (defaults)".to_string());
            let report = Report::new(subject, result);
            emit(&report, &OutputFormat::Pretty);
            std::process::exit(if report.passed() { 0 } else { 1 });
        }

        PermissionsAction::Init { force } => {
            let path = match config_path {
                Some(p) => p.to_path_buf(),
                None => PermissionsConfig::default_path().unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }),
            };
            if path.exists() && !force {
                eprintln!(
                    "Error: {} already exists (use --force to overwrite)",
                    path.display()
                );
                std::process::exit(1);
            }
            if let Err(e) = PermissionsConfig::default().save(&path) {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
            println!("Wrote default permissions to {}", path.display());
        }

        PermissionsAction::Check {
            operation,
            scope,
            details,
            confirm,
        } => {
            let Some(op) = OperationType::from_key(&operation) else {
                eprintln!(
                    "Error: unknown operation '{operation}' (expected read, write, delete, overwrite, backup, backup_delete)"
                );
                std::process::exit(2);
            };
            let config = load_config_or_exit(config_path);
            let checker = Checker::new(&config);

            let outcome = checker.check_scope_name(&scope).or_else(|e| match e {
                // Read-only scopes are fine for reads.
                PermissionError::ScopeWriteDisabled(s) | PermissionError::ScopeAlwaysReadOnly(s)
                    if !op.is_mutating() =>
                {
                    Ok(s)
                }
                other => Err(other),
            });
            let outcome = outcome.and_then(|scope| {
                if confirm {
                    checker.authorize(op, scope, &details).map(|()| scope)
                } else {
                    checker.check_operation(op).map(|()| scope)
                }
            });

            match outcome {
                Ok(scope) => {
                    let note = if !confirm && checker.requires_confirmation(op) {
                        " (requires confirmation)"
                    } else {
                        ""
                    };
                    println!("{} {op} on {scope} scope{note}", "allowed:".green().bold());
                }
                Err(PermissionError::UnknownScope(name)) => {
                    eprintln!("Error: unknown scope '{name}'");
                    std::process::exit(2);
                }
                Err(e) => {
                    eprintln!("{} {e}", "denied:".red().bold());
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .with_target(verbose > 2)
        .init();
}

/// Prints the report on stdout; warnings-only outcomes also get a note on
/// stderr so scripts see them while exiting 0.
fn emit(report: &Report, format: &OutputFormat) {
    print!("{}", output::format_report(report, format));
    if report.status == Status::Warning {
        eprintln!("{} {}", "warning:".yellow().bold(), report.result.summary());
    }
}

fn parse_or_exit<T>(value: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

fn load_config_or_exit(path: Option<&Path>) -> PermissionsConfig {
    PermissionsConfig::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

fn read_or_exit(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        std::process::exit(2);
    })
}

/// Skills in `platform`'s directory for `scope`; empty when the directory
/// cannot be resolved or read (the validation pipeline reports why).
fn load_source_skills(env: &Environment, platform: Platform, scope: Scope) -> Vec<Skill> {
    let Ok(dir) = env.platform_path_for_scope(platform, scope) else {
        return vec![];
    };
    if !dir.is_dir() {
        return vec![];
    }
    discover(&dir, platform).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "skill discovery failed");
        vec![]
    })
}

fn scan_file(detector: &Detector, file: &Path) -> (ValidationResult, Vec<LocatedDetection>) {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            let mut result = ValidationResult::new();
            result.add_warning(format!("skipped {}: {e}", file.display()));
            return (result, vec![]);
        }
    };

    let found = detector.detect(&content);
    let result = named_result(&file.display().to_string(), &found);
    let detections = found
        .into_iter()
        .map(|detection| LocatedDetection {
            file: Some(file.to_path_buf()),
            detection,
        })
        .collect();
    (result, detections)
}

/// Recursively collects files matching the given extensions, in file-name
/// order.
fn collect_files(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}
