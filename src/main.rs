//! CLI entry point: load a vacancy CSV, aggregate it and write a chart or spreadsheet report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vacancy_analytics::ingestion::{
    load_vacancies, CompositeObserver, FileObserver, IngestionObserver, IngestionOptions, TracingObserver,
};
use vacancy_analytics::report::{render_report, ReportBundle, ReportConfig, ReportKind};
use vacancy_analytics::types::Vacancy;
use vacancy_analytics::ReportResult;

#[derive(Parser)]
#[command(name = "vacancy-report")]
#[command(about = "Salary and vacancy statistics from a CSV export", long_about = None)]
struct Cli {
    /// CSV file with vacancies
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Profession name substring (case-sensitive)
    #[arg(short, long)]
    profession: String,

    /// Report type to produce
    #[arg(short, long, value_enum, default_value_t = ReportArg::Chart)]
    report: ReportArg,

    /// Output file (defaults to graph.png or report.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Length of the top city lists
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Strip tags and normalize whitespace in names and cities
    #[arg(long, default_value_t = false)]
    clean_text: bool,

    /// Append load events to this file
    #[arg(long, value_name = "FILE")]
    event_log: Option<PathBuf>,

    /// Print the computed statistics before rendering
    #[arg(long, value_enum, default_value_t = SummaryArg::Text)]
    summary: SummaryArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportArg {
    #[value(aliases = ["graph", "png"])]
    Chart,
    #[value(aliases = ["table", "xlsx"])]
    Spreadsheet,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Chart => ReportKind::Chart,
            ReportArg::Spreadsheet => ReportKind::Spreadsheet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryArg {
    Text,
    Json,
    #[value(name = "none")]
    Off,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load failures reach the log through the observers.
    let Ok(loaded) = load_vacancies(&cli.input, &ingestion_options(&cli)) else {
        return ExitCode::FAILURE;
    };

    match report(&cli, &loaded.vacancies) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "report failed");
            ExitCode::FAILURE
        }
    }
}

fn ingestion_options(cli: &Cli) -> IngestionOptions {
    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &cli.event_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    IngestionOptions {
        clean_text: cli.clean_text,
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    }
}

fn report(cli: &Cli, vacancies: &[Vacancy]) -> ReportResult<()> {
    let config = ReportConfig {
        top_cities: cli.top,
        ..Default::default()
    };
    let bundle = ReportBundle::from_vacancies(vacancies, &cli.profession, &config);

    match cli.summary {
        SummaryArg::Text => println!("{bundle}"),
        SummaryArg::Json => println!("{}", bundle.to_json()?),
        SummaryArg::Off => {}
    }

    let kind = ReportKind::from(cli.report);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(kind.default_file_name()));
    info!(%kind, output = %output.display(), "rendering report");
    render_report(&bundle, kind, &output)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{ingestion_options, Cli, ReportArg, SummaryArg};
    use vacancy_analytics::report::ReportKind;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["vacancy-report", "-i", "vacancies.csv", "-p", "Программист"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.input, PathBuf::from("vacancies.csv"));
        assert_eq!(cli.profession, "Программист");
        assert_eq!(cli.report, ReportArg::Chart);
        assert_eq!(cli.summary, SummaryArg::Text);
        assert_eq!(cli.top, 10);
        assert!(cli.output.is_none());
    }

    #[test]
    fn report_type_accepts_aliases() {
        assert_eq!(parse(&["--report", "xlsx"]).report, ReportArg::Spreadsheet);
        assert_eq!(parse(&["--report", "table"]).report, ReportArg::Spreadsheet);
        assert_eq!(parse(&["-r", "png"]).report, ReportArg::Chart);
        assert_eq!(ReportKind::from(parse(&["-r", "graph"]).report), ReportKind::Chart);
    }

    #[test]
    fn unknown_report_type_is_rejected() {
        let argv = ["vacancy-report", "-i", "a.csv", "-p", "x", "--report", "pdf"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn summary_none_turns_printing_off() {
        assert_eq!(parse(&["--summary", "none"]).summary, SummaryArg::Off);
    }

    #[test]
    fn options_carry_cli_flags() {
        let opts = ingestion_options(&parse(&["--clean-text"]));
        assert!(opts.clean_text);
        assert!(opts.observer.is_some());
    }
}
