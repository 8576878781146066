mod config;

use std::fmt;
use std::sync::Arc;

use codelearn_core::catalog::{CatalogQuery, CourseFilter, CourseSort, ParseQueryError};
use codelearn_core::model::{CourseId, LessonId, LessonIdError, ParseIdError};
use services::{AppServices, Clock, LessonPage, TokioScheduler};
use storage::assets::{AssetSource, DirAssetSource};
use storage::seed::{mock_assets, mock_courses};

use crate::config::{AppConfig, CONTENT_DIR_VAR, SIMULATE_LATENCY_VAR};

const RECENT_LIMIT: usize = 3;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCourseId { command: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidCourseId(ParseIdError),
    InvalidQuery(ParseQueryError),
    InvalidLesson(LessonIdError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCourseId { command } => write!(f, "{command} requires a course id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidCourseId(err) => write!(f, "invalid course id: {err}"),
            ArgsError::InvalidQuery(err) => write!(f, "{err}"),
            ArgsError::InvalidLesson(err) => write!(f, "invalid --lesson value: {err}"),
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

fn require_course_id(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<CourseId, ArgsError> {
    let raw = args.next().ok_or(ArgsError::MissingCourseId { command })?;
    raw.parse().map_err(ArgsError::InvalidCourseId)
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- list [--filter all|html|css|javascript] [--sort title|difficulty|popular] [--search <text>]");
    eprintln!("  cargo run -p app -- show <course-id>");
    eprintln!("  cargo run -p app -- read <course-id> [--lesson <file>]");
    eprintln!("  cargo run -p app -- complete <course-id>");
    eprintln!("  cargo run -p app -- home");
    eprintln!();
    eprintln!("Every run starts from the seeded mock catalog; progress recorded by");
    eprintln!("`complete` is not kept between runs.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {CONTENT_DIR_VAR}       lesson page root (default: assets)");
    eprintln!("  {SIMULATE_LATENCY_VAR}  1 to add mock backend delays");
    eprintln!("  RUST_LOG                    log filter (default: info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List {
        query: CatalogQuery,
        search: Option<String>,
    },
    Show {
        id: CourseId,
    },
    Read {
        id: CourseId,
        lesson: Option<LessonId>,
    },
    Complete {
        id: CourseId,
    },
    Home,
    Help,
}

impl Command {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Ok(Self::Help);
        };

        let command = match first.as_str() {
            "--help" | "-h" | "help" => return Ok(Self::Help),
            "list" => Self::parse_list(&mut args)?,
            "show" => Self::Show {
                id: require_course_id(&mut args, "show")?,
            },
            "read" => Self::parse_read(&mut args)?,
            "complete" => Self::Complete {
                id: require_course_id(&mut args, "complete")?,
            },
            "home" => Self::Home,
            _ => return Err(ArgsError::UnknownCommand(first)),
        };

        match args.next() {
            Some(extra) => Err(ArgsError::UnknownArg(extra)),
            None => Ok(command),
        }
    }

    fn parse_list(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut query = CatalogQuery::default();
        let mut search = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--filter" => {
                    query.filter = require_value(args, "--filter")?
                        .parse::<CourseFilter>()
                        .map_err(ArgsError::InvalidQuery)?;
                }
                "--sort" => {
                    query.sort = require_value(args, "--sort")?
                        .parse::<CourseSort>()
                        .map_err(ArgsError::InvalidQuery)?;
                }
                "--search" => search = Some(require_value(args, "--search")?),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self::List { query, search })
    }

    fn parse_read(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let id = require_course_id(args, "read")?;
        let mut lesson = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lesson" => {
                    let raw = require_value(args, "--lesson")?;
                    lesson = Some(LessonId::parse(raw).map_err(ArgsError::InvalidLesson)?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self::Read { id, lesson })
    }
}

fn setup_trace() {
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Lesson pages from disk when the content directory exists, otherwise the
/// generated placeholder pages.
fn asset_source(
    config: &AppConfig,
    clock: Clock,
) -> Result<Arc<dyn AssetSource>, Box<dyn std::error::Error>> {
    if config.content_dir.is_dir() {
        tracing::info!(root = %config.content_dir.display(), "serving lesson pages from disk");
        return Ok(Arc::new(DirAssetSource::new(config.content_dir.clone())));
    }

    tracing::warn!(
        root = %config.content_dir.display(),
        "content directory missing, using placeholder lesson pages"
    );
    let courses = mock_courses(clock.now())?;
    Ok(Arc::new(mock_assets(&courses)?))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // load .env file for RUST_LOG and CODELEARN_* settings
    let _ = dotenvy::dotenv();
    setup_trace();

    let command = Command::parse(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    if command == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = AppConfig::from_env();
    let clock = Clock::system();
    let services = AppServices::with_mock_catalog(
        asset_source(&config, clock)?,
        Arc::new(TokioScheduler::current()?),
        config.latency(),
        clock,
    )
    .await?;

    match command {
        Command::List { query, search } => list(&services, query, search).await?,
        Command::Show { id } => show(&services, id).await?,
        Command::Read { id, lesson } => {
            let content = services.content();
            let page = match lesson {
                Some(lesson) => content.open(id, &lesson).await?,
                None => content.open_current(id).await?,
            };
            print_page(&page);
        }
        Command::Complete { id } => complete(&services, id).await?,
        Command::Home => home(&services).await?,
        Command::Help => {}
    }
    Ok(())
}

async fn list(
    services: &AppServices,
    query: CatalogQuery,
    search: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let list = services.course_list();
    list.load().await?;
    list.set_filter(query.filter);
    list.set_sort(query.sort);
    if let Some(text) = search {
        list.search(&text).await;
    }

    let state = list.state();
    if state.courses.is_empty() {
        println!("no courses match");
    }
    for course in &state.courses {
        println!(
            "{:>3}  {:<28} {:<10} {:<12} {}",
            course.id().value(),
            course.title(),
            course.category().to_string(),
            course.difficulty().label(),
            course.formatted_duration()
        );
    }
    Ok(())
}

async fn show(services: &AppServices, id: CourseId) -> Result<(), Box<dyn std::error::Error>> {
    let view = services.course_detail().load(id).await?;
    let detail = &view.detail;
    let course = &detail.course;

    println!("{} ({})", course.title(), course.category());
    println!("{}", course.description());
    println!(
        "{} | {} | {} lessons | {}",
        course.difficulty().label(),
        course.formatted_duration(),
        course.total_lessons(),
        detail.formatted_student_count()
    );
    match detail.pricing.original_label() {
        Some(original) => println!("Price: {} (was {original})", detail.pricing.label()),
        None => println!("Price: {}", detail.pricing.label()),
    }
    println!("Instructor: {}, {}", detail.instructor.name, detail.instructor.title);
    println!("Enrolled: {}  Wishlisted: {}", view.enrolled, view.wishlisted);

    println!("\nYou will learn:");
    for outcome in &detail.learning_outcomes {
        println!("  - {outcome}");
    }
    println!("\nRequirements:");
    for requirement in &detail.requirements {
        println!("  - {requirement}");
    }
    Ok(())
}

async fn complete(services: &AppServices, id: CourseId) -> Result<(), Box<dyn std::error::Error>> {
    let progress = services.progress();
    match progress.complete_current(id).await? {
        Some(next) => println!("now on {next}"),
        None => println!("course finished"),
    }
    let status = progress.progress(id).await?;
    println!("{}/{} lessons ({}%)", status.completed, status.total, status.percent);
    Ok(())
}

async fn home(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let view = services.home().load(RECENT_LIMIT).await?;
    let learner = &view.learner;

    println!("Welcome back, {}", learner.name);
    println!(
        "{} courses | {} lessons | {} day streak | {} h learned",
        learner.enrolled_courses,
        learner.completed_lessons,
        learner.learning_streak_days,
        learner.total_hours()
    );
    println!("\nRecent:");
    for course in &view.recent {
        println!("  {} {}", course.id(), course.title());
    }
    println!("\nAchievements:");
    for achievement in &view.achievements {
        println!(
            "  {} {} [{}] {}",
            achievement.icon(),
            achievement.title(),
            achievement.rarity().name(),
            achievement.formatted_unlock_date()
        );
    }
    Ok(())
}

fn print_page(page: &LessonPage) {
    let nav = &page.navigation;
    println!(
        "{} / {} ({}/{})",
        page.course_title, page.lesson, nav.position, nav.total
    );
    println!("{}", page.path);
    println!();
    println!("{}", page.text.trim_end());
    println!();
    let label =
        |lesson: Option<&LessonId>| lesson.map_or_else(|| "-".to_owned(), ToString::to_string);
    println!(
        "prev: {}  next: {}",
        label(nav.previous.as_ref()),
        label(nav.next.as_ref())
    );
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
