mod terminal;

use std::fmt;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use course_core::Catalog;
use course_core::model::CourseId;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ChannelPrompt, CourseController, PromptRequest, ScriptedPrompt};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

use crate::terminal::{TerminalPrompt, describe_outcome, render_board};

const APP_TITLE: &str = "Course Tracker";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCourse,
    UnknownArg(String),
    InvalidCourseId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCourse => write!(f, "toggle requires a course id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCourseId { raw } => write!(f, "invalid course id: {raw:?}"),
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
    controller: Arc<Mutex<CourseController>>,
    prompt_requests: StdMutex<Option<UnboundedReceiver<PromptRequest>>>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn controller(&self) -> Arc<Mutex<CourseController>> {
        Arc::clone(&self.controller)
    }

    fn take_prompt_requests(&self) -> Option<UnboundedReceiver<PromptRequest>> {
        self.prompt_requests
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    catalog: Option<PathBuf>,
    course: Option<CourseId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  course-tracker ui     [--db <sqlite_url>] [--catalog <path.toml>]");
    eprintln!("  course-tracker status [--db <sqlite_url>] [--catalog <path.toml>]");
    eprintln!("  course-tracker toggle <course-id> [--db <sqlite_url>] [--catalog <path.toml>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:courses.sqlite3");
    eprintln!("  --catalog (built-in course list)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSES_DB_URL, COURSES_CATALOG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
    Toggle,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            "toggle" => Some(Self::Toggle),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env_db: Option<String>,
        env_catalog: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env_db
            .filter(|value| !value.trim().is_empty())
            .map_or_else(
                || normalize_sqlite_url("sqlite:courses.sqlite3".into()),
                normalize_sqlite_url,
            );
        let mut catalog = env_catalog
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut course = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                raw if cmd == Command::Toggle && course.is_none() && !raw.starts_with("--") => {
                    let id = CourseId::new(raw)
                        .map_err(|_| ArgsError::InvalidCourseId { raw: arg.clone() })?;
                    course = Some(id);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Toggle && course.is_none() {
            return Err(ArgsError::MissingCourse);
        }

        Ok(Self {
            db_url,
            catalog,
            course,
        })
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
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Bare flags mean `ui`.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(
        cmd,
        &mut iter,
        std::env::var("COURSES_DB_URL").ok(),
        std::env::var("COURSES_CATALOG").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = match parsed.catalog.as_deref() {
        Some(path) => Catalog::load_file(path)?,
        None => Catalog::builtin(),
    };

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, catalog).await?;
    info!(db = %parsed.db_url, courses = services.catalog().len(), "storage ready");

    match cmd {
        Command::Ui => {
            let (prompt, prompt_requests) = ChannelPrompt::new();
            let controller = services.controller(Arc::new(prompt)).await;

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                controller: Arc::new(Mutex::new(controller)),
                prompt_requests: StdMutex::new(Some(prompt_requests)),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_TITLE)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            let controller = services
                .controller(Arc::new(ScriptedPrompt::default()))
                .await;
            print!("{}", render_board(controller.board()));
            Ok(())
        }
        Command::Toggle => {
            let id = parsed.course.ok_or(ArgsError::MissingCourse)?;
            let prompt = TerminalPrompt::new(BufReader::new(std::io::stdin()), std::io::stderr());
            let mut controller = services.controller(Arc::new(prompt)).await;
            let outcome = controller.toggle(&id).await?;
            if let Some(course) = controller.board().get(&id) {
                println!("{}", describe_outcome(course, &outcome));
            }
            Ok(())
        }
    }
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
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
