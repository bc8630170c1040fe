use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use interview_core::Clock;
use interview_core::model::{Category, Difficulty, QuestionDraft, QuestionId};
use services::{
    AuthService, DashboardService, LocalIdentityProvider, MediaCapture, NullCapture,
    ProfileService, QuestionService,
};
use storage::repository::{QuestionRepository, Storage};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    auth: Arc<AuthService>,
    questions: Arc<QuestionService>,
    profiles: Arc<ProfileService>,
    dashboard: Arc<DashboardService>,
    capture: Arc<dyn MediaCapture>,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    fn capture(&self) -> Arc<dyn MediaCapture> {
        Arc::clone(&self.capture)
    }
}

struct Args {
    db_url: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db sqlite:dev.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL");
    eprintln!();
    eprintln!("Seeding lives in the storage crate:");
    eprintln!("  cargo run -p storage --bin seed -- --help");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PREP_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launch the UI when no subcommand is provided.
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }
    if argv.first().map(String::as_str) == Some("ui") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let clock = Clock::default_clock();
    ensure_question_bank(storage.questions.as_ref(), &clock).await?;

    let auth = Arc::new(AuthService::new(
        clock,
        Arc::new(LocalIdentityProvider::new()),
        Arc::clone(&storage.profiles),
    ));
    let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
    let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));
    let dashboard = Arc::new(DashboardService::new(
        clock,
        Arc::clone(&storage.sessions),
        Arc::clone(&storage.metrics),
    ));

    let app = DesktopApp {
        auth,
        questions,
        profiles,
        dashboard,
        capture: Arc::new(NullCapture),
    };

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Prep")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

/// First launch on an empty database gets a small starter bank so the
/// practice and interview pages are not empty shells.
async fn ensure_question_bank(
    questions: &dyn QuestionRepository,
    clock: &Clock,
) -> Result<(), Box<dyn std::error::Error>> {
    if !questions.list_active(None).await?.is_empty() {
        return Ok(());
    }

    let now = clock.now();
    let starters = [
        (
            Category::Hr,
            Difficulty::Easy,
            "Tell me about yourself.",
            "Open with your current role, then two or three relevant accomplishments.",
            Some(120),
        ),
        (
            Category::Technical,
            Difficulty::Medium,
            "Explain the difference between a process and a thread.",
            "Processes own their address space; threads share it and are cheaper to switch.",
            Some(180),
        ),
        (
            Category::Behavioral,
            Difficulty::Medium,
            "Describe a time you disagreed with a teammate.",
            "Use STAR: situation, task, action, result.",
            Some(180),
        ),
    ];

    for (i, (category, difficulty, prompt, sample, limit)) in starters.into_iter().enumerate() {
        let question = QuestionDraft {
            category,
            difficulty,
            prompt: prompt.to_string(),
            sample_answer: Some(sample.to_string()),
            tags: Vec::new(),
            time_limit_secs: limit,
        }
        .validate(now + chrono_minutes(i))?
        .assign_id(QuestionId::generate());
        questions.upsert_question(&question).await?;
    }

    Ok(())
}

fn chrono_minutes(i: usize) -> chrono::Duration {
    chrono::Duration::minutes(i64::try_from(i).unwrap_or(0))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
