use std::fmt;

use chrono::{DateTime, Duration, Utc};
use interview_core::model::{
    Category, Difficulty, MetricsId, PerformanceMetrics, PracticeSessionRecord, QuestionDraft,
    QuestionId, ResponseId, SessionId, SessionResponseRecord, UserId,
};
use storage::repository::{
    PerformanceMetricsRepository as _, PracticeSessionRepository as _, QuestionRepository as _,
    SessionResponseRepository as _, Storage,
};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    demo: bool,
    demo_email: String,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("PREP_DB_URL").unwrap_or_else(|_| "sqlite://dev.sqlite3".into());
        let mut demo = false;
        let mut demo_email =
            std::env::var("PREP_DEMO_EMAIL").unwrap_or_else(|_| "demo@example.com".into());
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--demo" => demo = true,
                "--demo-email" => {
                    demo_email = require_value(&mut args, "--demo-email")?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            demo,
            demo_email,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>      SQLite URL (default: sqlite://dev.sqlite3)");
    eprintln!("  --demo                 Also seed demo sessions, responses and metrics");
    eprintln!("  --demo-email <email>   Account that owns the demo data (default: demo@example.com)");
    eprintln!("  --now <rfc3339>        Fixed current time for deterministic seeding");
    eprintln!("  -h, --help             Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  PREP_DB_URL, PREP_DEMO_EMAIL");
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Ok(());
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

struct BankEntry {
    category: Category,
    difficulty: Difficulty,
    prompt: &'static str,
    sample_answer: &'static str,
    tags: &'static [&'static str],
    time_limit_secs: Option<u32>,
}

fn question_bank() -> Vec<BankEntry> {
    vec![
        BankEntry {
            category: Category::Hr,
            difficulty: Difficulty::Easy,
            prompt: "Tell me about yourself.",
            sample_answer: "Open with your current role, pick two or three relevant \
                accomplishments, and close with why this position is the logical next step.",
            tags: &["introduction", "opener"],
            time_limit_secs: Some(120),
        },
        BankEntry {
            category: Category::Hr,
            difficulty: Difficulty::Medium,
            prompt: "What are your salary expectations?",
            sample_answer: "Give a researched range for the role and market, and signal \
                flexibility on the total package rather than a single number.",
            tags: &["salary", "negotiation"],
            time_limit_secs: Some(90),
        },
        BankEntry {
            category: Category::Technical,
            difficulty: Difficulty::Medium,
            prompt: "Explain the difference between a process and a thread.",
            sample_answer: "A process owns its address space and resources; threads share \
                the address space of their process and are cheaper to create and switch. \
                Mention isolation versus communication cost.",
            tags: &["operating-systems"],
            time_limit_secs: Some(180),
        },
        BankEntry {
            category: Category::Technical,
            difficulty: Difficulty::Hard,
            prompt: "How would you design a rate limiter for a public API?",
            sample_answer: "Discuss token bucket or sliding window, where the counters \
                live, per-key fairness, and what the client sees when throttled.",
            tags: &["system-design", "api"],
            time_limit_secs: Some(300),
        },
        BankEntry {
            category: Category::Behavioral,
            difficulty: Difficulty::Medium,
            prompt: "Describe a time you disagreed with a teammate. How was it resolved?",
            sample_answer: "Use STAR: the situation, your task, the concrete actions you \
                took to understand their position, and the resolution plus what you learned.",
            tags: &["star", "conflict"],
            time_limit_secs: Some(180),
        },
        BankEntry {
            category: Category::Behavioral,
            difficulty: Difficulty::Easy,
            prompt: "Tell me about a project you are proud of.",
            sample_answer: "Pick one with measurable impact. Lead with the outcome, then \
                your specific contribution, then one thing you would do differently.",
            tags: &["star"],
            time_limit_secs: Some(150),
        },
    ]
}

async fn seed_questions(
    storage: &Storage,
    now: DateTime<Utc>,
) -> Result<Vec<QuestionId>, Box<dyn std::error::Error>> {
    let bank = question_bank();
    let total = bank.len();
    let mut ids = Vec::new();
    for (i, entry) in bank.into_iter().enumerate() {
        // Stagger created_at so list ordering is stable and predictable.
        let created_at = now - Duration::minutes(i64::try_from(total - i)?);
        let question = QuestionDraft {
            category: entry.category,
            difficulty: entry.difficulty,
            prompt: entry.prompt.to_string(),
            sample_answer: Some(entry.sample_answer.to_string()),
            tags: entry.tags.iter().map(|t| (*t).to_string()).collect(),
            time_limit_secs: entry.time_limit_secs,
        }
        .validate(created_at)?
        .assign_id(QuestionId::generate());
        storage.questions.upsert_question(&question).await?;
        ids.push(question.id());
    }
    Ok(ids)
}

async fn seed_demo(
    storage: &Storage,
    user_id: UserId,
    question_ids: &[QuestionId],
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let categories = [Category::Hr, Category::Technical, Category::Behavioral];

    for day in 0..5_u32 {
        let started_at = now - Duration::days(i64::from(day)) - Duration::minutes(30);
        let completed_at = started_at + Duration::minutes(12);
        let score = 60.0 + f64::from(day) * 5.0;
        let session = PracticeSessionRecord::from_persisted(
            SessionId::generate(),
            user_id,
            Some(categories[(day as usize) % categories.len()]),
            5,
            5,
            Some(score),
            started_at,
            Some(completed_at),
            Some(720),
        )?;
        storage.sessions.insert_session(&session).await?;

        for (slot, question_id) in question_ids.iter().take(3).enumerate() {
            let response = SessionResponseRecord::new(
                ResponseId::generate(),
                session.id(),
                *question_id,
                Some(format!("Demo answer for question {}", slot + 1)),
                Some(score),
                Some("Solid structure; tighten the ending.".to_string()),
                Some(90),
                started_at + Duration::minutes(i64::try_from(slot)? * 3),
            );
            storage.responses.insert_response(&response).await?;
        }

        let metrics = PerformanceMetrics::new(
            MetricsId::generate(),
            user_id,
            started_at.date_naive(),
            1,
            5,
            Some(score),
            Some(score + 3.0),
            Some(score - 5.0),
            Some(score + 1.0),
            started_at,
        );
        storage.metrics.upsert_daily(&metrics).await?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let question_ids = seed_questions(&storage, now).await?;

    if args.demo {
        let user_id = UserId::derived_from(args.demo_email.trim());
        seed_demo(&storage, user_id, &question_ids, now).await?;
        println!(
            "Seeded {} questions and demo data for {} (user {}) into {}",
            question_ids.len(),
            args.demo_email,
            user_id,
            args.db_url
        );
    } else {
        println!(
            "Seeded {} questions into {}",
            question_ids.len(),
            args.db_url
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
