use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuestionKind;
use services::{QuizService, sequencer_for_seed};
use storage::{QuestionBank, source_for_path};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DATA: &str = "Data/quiz_data.csv";
const DEFAULT_TITLE: &str = "Rechnernetze-Quiz";
const DEFAULT_FOOTER: &str = "© 2025 Albinot Hajrizaj";

#[derive(Debug, thiserror::Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),
    #[error("invalid --seed value: {raw}")]
    InvalidSeed { raw: String },
    #[error("invalid --data value: {raw:?}")]
    InvalidDataPath { raw: String },
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    title: String,
    footer: String,
    quiz: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn footer(&self) -> String {
        self.footer.clone()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    data: PathBuf,
    seed: Option<u64>,
    title: String,
    footer: String,
    log_level: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--data <csv|xlsx>] [--seed <u64>] [--title <text>] [--footer <text>] [--log-level <filter>]");
    eprintln!("  cargo run -p app -- check [--data <csv|xlsx>] [--log-level <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data {DEFAULT_DATA}");
    eprintln!("  --title {DEFAULT_TITLE}");
    eprintln!("  --footer {DEFAULT_FOOTER}");
    eprintln!("  --seed  (random order)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA, QUIZ_SEED, QUIZ_TITLE, QUIZ_FOOTER, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    /// Parse flags after the subcommand; `env` supplies fallbacks.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut data = env("QUIZ_DATA").map_or_else(|| PathBuf::from(DEFAULT_DATA), PathBuf::from);
        let mut seed = env("QUIZ_SEED").map(parse_seed).transpose()?;
        let mut title = env("QUIZ_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let mut footer = env("QUIZ_FOOTER").unwrap_or_else(|| DEFAULT_FOOTER.to_string());
        let mut log_level = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = require_value(args, "--data")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataPath { raw: value });
                    }
                    data = PathBuf::from(value);
                }
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--title" => title = require_value(args, "--title")?,
                "--footer" => footer = require_value(args, "--footer")?,
                "--log-level" => log_level = Some(require_value(args, "--log-level")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data,
            seed,
            title,
            footer,
            log_level,
        })
    }
}

/// `--log-level` wins over `RUST_LOG`; `info` when neither is set.
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn split_command(mut argv: Vec<String>) -> Result<(Command, Vec<String>), ArgsError> {
    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => {
            Command::from_arg(first).ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?
        }
    };
    if argv.first().is_some_and(|first| !first.starts_with('-')) {
        argv.remove(0);
    }
    Ok((cmd, argv))
}

async fn load_bank(args: &Args) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    // `.xlsx` is read directly; a CSV path falls back to its sibling workbook.
    let bank = source_for_path(&args.data).load().await?;
    info!(
        path = %args.data.display(),
        questions = bank.len(),
        "question bank ready"
    );
    Ok(bank)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let (cmd, rest) = split_command(argv).inspect_err(|_| print_usage())?;

    let mut iter = rest.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).inspect_err(|_| {
        print_usage();
    })?;

    init_tracing(parsed.log_level.as_deref());
    let bank = load_bank(&parsed).await?;

    match cmd {
        Command::Check => {
            println!(
                "{}: {} questions ({} MC, {} FT)",
                parsed.data.display(),
                bank.len(),
                bank.count_kind(QuestionKind::MultipleChoice),
                bank.count_kind(QuestionKind::FreeText),
            );
            Ok(())
        }
        Command::Ui => {
            let quiz = Arc::new(QuizService::new(
                Arc::new(bank),
                sequencer_for_seed(parsed.seed),
            ));
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                title: parsed.title.clone(),
                footer: parsed.footer.clone(),
                quiz,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(parsed.title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| (*arg).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_flags() {
        let parsed = Args::parse(&mut Vec::new().into_iter(), no_env).unwrap();
        assert_eq!(parsed.data, PathBuf::from(DEFAULT_DATA));
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.footer, "© 2025 Albinot Hajrizaj");
        assert_eq!(parsed.log_level, None);
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "QUIZ_DATA" => Some("env.csv".to_string()),
            "QUIZ_SEED" => Some("7".to_string()),
            "QUIZ_FOOTER" => Some("Kurs WS".to_string()),
            _ => None,
        };
        let mut iter = args(&["--data", "flag.csv", "--title", "Netze"]).into_iter();
        let parsed = Args::parse(&mut iter, env).unwrap();
        assert_eq!(parsed.data, PathBuf::from("flag.csv"));
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.title, "Netze");
        assert_eq!(parsed.footer, "Kurs WS");
    }

    #[test]
    fn rejects_bad_seed_and_missing_values() {
        let mut iter = args(&["--seed", "abc"]).into_iter();
        assert!(matches!(
            Args::parse(&mut iter, no_env),
            Err(ArgsError::InvalidSeed { .. })
        ));

        let mut iter = args(&["--data"]).into_iter();
        assert!(matches!(
            Args::parse(&mut iter, no_env),
            Err(ArgsError::MissingValue { flag: "--data" })
        ));

        let mut iter = args(&["--bogus"]).into_iter();
        assert!(matches!(
            Args::parse(&mut iter, no_env),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn subcommand_defaults_to_ui() {
        let (cmd, rest) = split_command(args(&["--seed", "1"])).unwrap();
        assert_eq!(cmd, Command::Ui);
        assert_eq!(rest.len(), 2);

        let (cmd, rest) = split_command(args(&["check", "--data", "x.csv"])).unwrap();
        assert_eq!(cmd, Command::Check);
        assert_eq!(rest, args(&["--data", "x.csv"]));

        assert!(matches!(
            split_command(args(&["serve"])),
            Err(ArgsError::UnknownCommand(_))
        ));
    }
}
