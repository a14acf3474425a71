//! Headless driver for the business plan form
//!
//! Loads a JSON draft of form answers, reports completion, and on `--submit`
//! writes the export document next to the configured output directory.

use anyhow::{bail, Context, Result};
use bizplan_form::attachments::FsAttachmentStore;
use bizplan_form::config::AppConfig;
use bizplan_form::state::{FormRecord, ScalarField, Session};
use bizplan_form::FormError;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: bizplan-form <draft.json> [--submit]";

struct Args {
    draft: PathBuf,
    submit: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut draft = None;
        let mut submit = false;
        for arg in args {
            match arg.as_str() {
                "--submit" => submit = true,
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
                _ if draft.is_some() => bail!("only one draft file may be given\n{USAGE}"),
                path => draft = Some(PathBuf::from(path)),
            }
        }
        let draft = draft.with_context(|| USAGE.to_string())?;
        Ok(Self { draft, submit })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizplan_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = AppConfig::load()?;
    let session = load_session(&args.draft, &config).await?;
    let store = FsAttachmentStore::new(config.attachments_dir());

    print_report(session.record());

    let missing_files = session.missing_attachments(&store).await;
    for reference in &missing_files {
        println!("! attachment not found in store: {}", reference.filename);
    }

    if !args.submit {
        return Ok(());
    }

    match session.record().submit() {
        Ok(validated) => {
            let document = validated.export();
            let path = config.output_dir().join(document.file_name());
            write_export(&path, &document.to_json()?).await?;
            tracing::info!(session = %session.id(), path = %path.display(), "business plan exported");
            println!("Exported {}", path.display());
            Ok(())
        }
        Err(FormError::PreconditionViolation { missing }) => {
            eprintln!("Missing required fields:");
            for field in &missing {
                eprintln!("  - {field}");
            }
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}

/// Parse a draft; absent keys take their defaults and the configured duration
async fn load_session(path: &Path, config: &AppConfig) -> Result<Session> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading draft {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing draft {}", path.display()))?;
    let has_duration = raw.pointer("/financials/duration_years").is_some();

    let mut record: FormRecord =
        serde_json::from_value(raw).context("draft does not match the form layout")?;
    if !has_duration {
        record.set_field(
            ScalarField::DurationYears,
            i64::from(config.duration_years()),
        )?;
    }
    Ok(Session::from_record(record)?)
}

fn print_report(record: &FormRecord) {
    let progress = record.compute_progress();
    println!("Completion: {}%", (progress * 100.0) as u32);

    for status in record.compute_section_indicators() {
        let mark = if status.is_complete() { "done" } else { "todo" };
        println!(
            "  {:<16} {} ({}/{})",
            status.section.title(),
            mark,
            status.completed,
            status.total
        );
    }

    for warning in record.field_warnings() {
        println!("! {warning}");
    }

    let summary = record.financial_summary();
    for (year, signal) in summary.signals() {
        println!("! year {year}: {signal:?} projected");
    }
    println!(
        "Totals: revenue {:.2}, cost {:.2}, profit {:.2}",
        summary.totals.revenue, summary.totals.cost, summary.totals.profit
    );
}

async fn write_export(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_draft_and_submit() {
        let parsed = args(&["draft.json", "--submit"]).unwrap();
        assert_eq!(parsed.draft, PathBuf::from("draft.json"));
        assert!(parsed.submit);
    }

    #[test]
    fn test_parse_requires_draft() {
        assert!(args(&["--submit"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
        assert!(args(&["a.json", "--verbose"]).is_err());
    }

    #[tokio::test]
    async fn test_load_session_applies_configured_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, r#"{"general": {"company_name": "Acme Srl"}}"#).unwrap();
        let config = AppConfig {
            default_duration_years: Some(5),
            ..Default::default()
        };

        let session = load_session(&path, &config).await.unwrap();
        assert_eq!(session.record().general.company_name, "Acme Srl");
        assert_eq!(session.record().projections().len(), 5);
    }

    #[tokio::test]
    async fn test_load_session_keeps_draft_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, r#"{"financials": {"duration_years": 2}}"#).unwrap();

        let session = load_session(&path, &AppConfig::default()).await.unwrap();
        assert_eq!(session.record().duration_years(), 2);
        assert_eq!(session.record().projections().len(), 2);
    }

    #[tokio::test]
    async fn test_load_session_refuses_negative_projection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{"financials": {"projections": [{"revenue": 100.0, "cost": -5.0}]}}"#,
        )
        .unwrap();

        assert!(load_session(&path, &AppConfig::default()).await.is_err());
    }
}
