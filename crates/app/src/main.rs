use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizSettings;
use services::{Clock, QuizService, ShuffleSource};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_QUESTIONS_PATH: &str = "assets/questions.json";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPoolSize { raw: String },
    InvalidSeed { raw: String },
    InvalidDelay { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPoolSize { raw } => write!(f, "invalid --pool-size value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDelay { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>] [--pool-size <n|all>] [--seed <u64>]");
    eprintln!("                      [--correct-delay-ms <ms>] [--incorrect-delay-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS_PATH}");
    eprintln!("  --pool-size all");
    eprintln!(
        "  --correct-delay-ms {}",
        QuizSettings::DEFAULT_CORRECT_DELAY.as_millis()
    );
    eprintln!(
        "  --incorrect-delay-ms {}",
        QuizSettings::DEFAULT_INCORRECT_DELAY.as_millis()
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS, QUIZ_POOL_SIZE, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Launch(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    questions: PathBuf,
    pool_size: Option<u32>,
    seed: Option<u64>,
    correct_delay: Duration,
    incorrect_delay: Duration,
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut questions = env("QUIZ_QUESTIONS")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_PATH), PathBuf::from);
        let mut pool_size = env("QUIZ_POOL_SIZE")
            .map(parse_pool_size)
            .transpose()?
            .flatten();
        let mut seed = env("QUIZ_SEED").map(parse_seed).transpose()?;
        let mut correct_delay = QuizSettings::DEFAULT_CORRECT_DELAY;
        let mut incorrect_delay = QuizSettings::DEFAULT_INCORRECT_DELAY;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    questions = PathBuf::from(require_value(args, "--questions")?);
                }
                "--pool-size" => {
                    pool_size = parse_pool_size(require_value(args, "--pool-size")?)?;
                }
                "--seed" => {
                    seed = Some(parse_seed(require_value(args, "--seed")?)?);
                }
                "--correct-delay-ms" => {
                    let value = require_value(args, "--correct-delay-ms")?;
                    correct_delay = parse_delay("--correct-delay-ms", value)?;
                }
                "--incorrect-delay-ms" => {
                    let value = require_value(args, "--incorrect-delay-ms")?;
                    incorrect_delay = parse_delay("--incorrect-delay-ms", value)?;
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Launch(Self {
            questions,
            pool_size,
            seed,
            correct_delay,
            incorrect_delay,
        }))
    }

    fn settings(&self) -> Result<QuizSettings, quiz_core::model::SettingsError> {
        QuizSettings::new(self.pool_size, self.correct_delay, self.incorrect_delay)
    }

    fn shuffle(&self) -> ShuffleSource {
        self.seed.map_or(ShuffleSource::Entropy, ShuffleSource::Seeded)
    }
}

/// `all` (or an empty value) plays the whole bank.
fn parse_pool_size(raw: String) -> Result<Option<u32>, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(ArgsError::InvalidPoolSize { raw }),
        Ok(n) => Ok(Some(n)),
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_delay(flag: &'static str, raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ArgsError::InvalidDelay { flag, raw }),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Command::Launch(args) => args,
        Command::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    let settings = args.settings()?;
    let storage = Storage::json_file(&args.questions);
    info!(path = %args.questions.display(), "loading question bank");
    let service = QuizService::load(storage.questions.as_ref(), settings, Clock::system())
        .await?
        .with_shuffle(args.shuffle());

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_service: Arc::new(service),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz Board Game")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    fn launch(args: &[&str], env: &[(&str, &str)]) -> Args {
        match parse(args, env).expect("valid args") {
            Command::Launch(args) => args,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = launch(&[], &[]);
        assert_eq!(args.questions, PathBuf::from(DEFAULT_QUESTIONS_PATH));
        assert_eq!(args.pool_size, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.correct_delay, QuizSettings::DEFAULT_CORRECT_DELAY);
        assert_eq!(args.incorrect_delay, QuizSettings::DEFAULT_INCORRECT_DELAY);
        assert_eq!(args.shuffle(), ShuffleSource::Entropy);
    }

    #[test]
    fn flags_override_env() {
        let env = [
            ("QUIZ_QUESTIONS", "env.json"),
            ("QUIZ_POOL_SIZE", "5"),
            ("QUIZ_SEED", "9"),
        ];
        let args = launch(&["--questions", "flag.json", "--pool-size", "all"], &env);
        assert_eq!(args.questions, PathBuf::from("flag.json"));
        assert_eq!(args.pool_size, None);
        assert_eq!(args.shuffle(), ShuffleSource::Seeded(9));
    }

    #[test]
    fn delays_are_parsed_in_millis() {
        let args = launch(
            &["--correct-delay-ms", "200", "--incorrect-delay-ms", "400"],
            &[],
        );
        let settings = args.settings().unwrap();
        assert_eq!(settings.correct_delay(), Duration::from_millis(200));
        assert_eq!(settings.incorrect_delay(), Duration::from_millis(400));
    }

    #[test]
    fn delay_order_is_checked_when_building_settings() {
        let args = launch(
            &["--correct-delay-ms", "900", "--incorrect-delay-ms", "100"],
            &[],
        );
        assert!(args.settings().is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            parse(&["--pool-size", "0"], &[]),
            Err(ArgsError::InvalidPoolSize { raw: "0".into() })
        );
        assert_eq!(
            parse(&[], &[("QUIZ_SEED", "abc")]),
            Err(ArgsError::InvalidSeed { raw: "abc".into() })
        );
        assert_eq!(
            parse(&["--correct-delay-ms", "0"], &[]),
            Err(ArgsError::InvalidDelay {
                flag: "--correct-delay-ms",
                raw: "0".into()
            })
        );
        assert_eq!(
            parse(&["--seed"], &[]),
            Err(ArgsError::MissingValue { flag: "--seed" })
        );
        assert_eq!(
            parse(&["--db", "x"], &[]),
            Err(ArgsError::UnknownArg("--db".into()))
        );
    }

    #[test]
    fn help_flag() {
        assert_eq!(parse(&["--help"], &[]), Ok(Command::Help));
    }
}
