use std::io::Write;

use clap::Parser;
use sql_tool_server::{
    app::{LintParams, calculate_exit_code, run_lint, split_statements},
    cli::{Cli, Commands, Format},
    lint::lint_report
};
use tempfile::NamedTempFile;

fn sql_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

fn params(file: &NamedTempFile, format: Format) -> LintParams {
    LintParams {
        input: file.path().display().to_string(),
        format,
        no_color: true
    }
}

#[test]
fn test_exit_codes() {
    assert_eq!(calculate_exit_code(&[]), 0);
    assert_eq!(calculate_exit_code(&[lint_report("SHOW TABLES")]), 0);
    assert_eq!(calculate_exit_code(&[lint_report("SELECT * FROM t")]), 1);
    assert_eq!(
        calculate_exit_code(&[
            lint_report("SHOW TABLES"),
            lint_report("SELECT id FROM t WHERE a = 'b' ORDER BY id LIMIT 1")
        ]),
        2
    );
}

#[test]
fn test_split_statements() {
    assert_eq!(split_statements("  ;; \n"), Vec::<&str>::new());
    assert_eq!(split_statements("SELECT 1"), vec!["SELECT 1"]);
}

#[test]
fn test_split_statements_keeps_chained_separator() {
    assert_eq!(
        split_statements("SELECT id FROM t LIMIT 5; DROP TABLE t\nSHOW TABLES;"),
        vec!["SELECT id FROM t LIMIT 5; DROP TABLE t", "SHOW TABLES"]
    );
}

#[test]
fn test_split_statements_ignores_quoted_separator() {
    assert_eq!(
        split_statements("SELECT id FROM t WHERE note = 'a;\nb';\nSHOW TABLES"),
        vec!["SELECT id FROM t WHERE note = 'a;\nb'", "SHOW TABLES"]
    );
}

#[test]
fn test_run_lint_flags_chained_statement() {
    let file = sql_file("SELECT id FROM t WHERE id=1 ORDER BY id LIMIT 5; DROP TABLE t\n");
    let result = run_lint(&params(&file, Format::Text)).unwrap();

    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.reports[0].findings[0].rule_id, "LINT005");
    assert_eq!(result.exit_code, 2);
    assert!(!result.output.contains("Query looks good!"));
    assert!(result.output.contains("1 errors"));
}

#[test]
fn test_run_lint_per_statement() {
    let file = sql_file("SELECT * FROM users;\nSELECT id FROM users WHERE id = 1 ORDER BY id LIMIT 1;\n");
    let result = run_lint(&params(&file, Format::Text)).unwrap();

    assert_eq!(result.reports.len(), 2);
    assert_eq!(result.reports[0].findings.len(), 4);
    assert!(result.reports[1].is_clean());
    assert_eq!(result.exit_code, 1);
    assert!(result.output.contains("Query #2:"));
}

#[test]
fn test_run_lint_json() {
    let file = sql_file("SELECT id FROM t WHERE id = 1 ORDER BY id LIMIT 1");
    let result = run_lint(&params(&file, Format::Json)).unwrap();

    assert_eq!(result.exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
    assert_eq!(value["summary"]["queries"], 1);
}

#[test]
fn test_run_lint_missing_file() {
    let params = LintParams {
        input:    "/nonexistent/queries.sql".into(),
        format:   Format::Text,
        no_color: true
    };

    assert!(run_lint(&params).is_err());
}

#[test]
fn test_cli_parse_lint() {
    let cli = Cli::try_parse_from(["sql-tool-server", "lint", "q.sql", "-f", "yaml", "--no-color"])
        .unwrap();

    match cli.command {
        Commands::Lint {
            input,
            format,
            no_color
        } => {
            assert_eq!(input.to_str(), Some("q.sql"));
            assert!(matches!(format, Format::Yaml));
            assert!(no_color);
        }
        other => panic!("unexpected command {:?}", other)
    }
}

#[test]
fn test_cli_lint_defaults_to_stdin() {
    let cli = Cli::try_parse_from(["sql-tool-server", "lint"]).unwrap();

    assert!(matches!(cli.command, Commands::Lint { ref input, .. } if input.to_str() == Some("-")));
}

#[test]
fn test_cli_parse_serve() {
    let cli = Cli::try_parse_from([
        "sql-tool-server",
        "serve",
        "--host",
        "db",
        "--port",
        "3307",
        "-d",
        "shop"
    ])
    .unwrap();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database,
            database_url,
            ..
        } => {
            assert_eq!(host.as_deref(), Some("db"));
            assert_eq!(port, Some(3307));
            assert_eq!(database.as_deref(), Some("shop"));
            assert!(database_url.is_none());
        }
        other => panic!("unexpected command {:?}", other)
    }
}

#[test]
fn test_cli_rejects_invalid_port() {
    assert!(Cli::try_parse_from(["sql-tool-server", "serve", "--port", "abc"]).is_err());
}
