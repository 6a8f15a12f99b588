use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use subs_core::constants::{DEFAULT_ID_FIELD, DEFAULT_MAX_IMPORT_ROWS};
use subs_core::import::read_import_file;
use subs_core::{CoreConfig, ImportReport, ImportValidator};
use subs_uuid::{sanitize_uuid, validate_and_sanitize_uuid, UuidValidation, ValidatedUuid};

#[derive(Parser)]
#[command(name = "subs")]
#[command(about = "Subscription catalog identifier tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more identifiers
    Check {
        /// Identifiers to validate (surrounding whitespace is ignored)
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Trim surrounding whitespace from an identifier
    Sanitize {
        /// Identifier to trim
        value: String,
    },
    /// Print a freshly generated identifier
    Generate,
    /// Validate the identifier column of a JSON import file
    Import {
        /// Path to a JSON array of row objects
        path: PathBuf,
        /// Column holding the row identifier
        #[arg(long, default_value = DEFAULT_ID_FIELD)]
        id_field: String,
        /// Maximum number of rows accepted
        #[arg(long, default_value_t = DEFAULT_MAX_IMPORT_ROWS)]
        max_rows: usize,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { values }) => {
            let mut all_valid = true;
            for value in &values {
                let (line, valid) = check_line(value);
                println!("{}", line);
                all_valid &= valid;
            }
            Ok(exit_code(all_valid))
        }
        Some(Commands::Sanitize { value }) => {
            println!("{}", sanitize_uuid(&value));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Generate) => {
            println!("{}", ValidatedUuid::generate());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Import {
            path,
            id_field,
            max_rows,
        }) => {
            let cfg = CoreConfig::new(max_rows, id_field)?;
            let report = run_import(&path, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(exit_code(!report.has_flagged_rows()))
        }
        None => {
            println!("Use 'subs --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Formats one `check` result line and reports whether the value passed.
fn check_line(value: &str) -> (String, bool) {
    match validate_and_sanitize_uuid(value) {
        UuidValidation::Absent => ("absent".to_string(), true),
        UuidValidation::Valid(uuid) => (format!("valid {}", uuid), true),
        UuidValidation::Invalid(error) => (format!("invalid: {}", error), false),
    }
}

fn run_import(path: &Path, cfg: &CoreConfig) -> subs_core::CoreResult<ImportReport> {
    let rows = read_import_file(path, cfg)?;
    ImportValidator::new(cfg).validate_rows(&rows)
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_line() {
        assert_eq!(check_line(""), ("absent".to_string(), true));
        assert_eq!(
            check_line(" 550e8400-e29b-41d4-a716-446655440000 "),
            (
                "valid 550e8400-e29b-41d4-a716-446655440000".to_string(),
                true
            )
        );

        let (line, valid) = check_line("bad-uuid");
        assert!(!valid);
        assert!(line.starts_with("invalid: Invalid UUID format: \"bad-uuid\""));
    }

    #[test]
    fn test_parse_import_args() {
        let cli = Cli::try_parse_from(["subs", "import", "rows.json", "--id-field", "price_id"])
            .unwrap();

        match cli.command {
            Some(Commands::Import {
                path,
                id_field,
                max_rows,
            }) => {
                assert_eq!(path, PathBuf::from("rows.json"));
                assert_eq!(id_field, "price_id");
                assert_eq!(max_rows, DEFAULT_MAX_IMPORT_ROWS);
            }
            _ => panic!("Expected import command"),
        }
    }

    #[test]
    fn test_check_requires_values() {
        assert!(Cli::try_parse_from(["subs", "check"]).is_err());
    }

    #[test]
    fn test_run_import() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "550e8400-e29b-41d4-a716-446655440000"}}, {{"id": "oops"}}]"#
        )
        .unwrap();

        let report = run_import(file.path(), &CoreConfig::default()).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.flagged, 1);
        assert!(report.has_flagged_rows());
    }
}
