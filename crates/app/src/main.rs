use std::fmt;
use std::iter::Peekable;

use services::{AppServices, TrackerConfig};
use tracker_core::Snapshot;
use tracker_core::model::{AppStateDraft, Status};
use tracker_core::store::Action;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingHandle { command: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidBool { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingHandle { command } => write!(f, "{command} requires a handle"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidBool { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected true/false)")
            }
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

fn parse_number(raw: String, flag: &'static str) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn parse_bool(raw: String, flag: &'static str) -> Result<bool, ArgsError> {
    match raw.trim() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ArgsError::InvalidBool { flag, raw }),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- show   [--limit <n>] [common options]");
    eprintln!("  cargo run -p app -- sync   [common options]");
    eprintln!("  cargo run -p app -- add    <handle> [common options]");
    eprintln!("  cargo run -p app -- remove <handle> [common options]");
    eprintln!("  cargo run -p app -- clear  [common options]");
    eprintln!("  cargo run -p app -- prefs  [--show-tags <bool>] [--show-rating <bool>]");
    eprintln!("                             [--hide-solved <bool>] [--min-rating <n>]");
    eprintln!("                             [--max-rating <n>] [--per-page <n>]");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --db <sqlite_url>   (default: sqlite://cftracker.sqlite3)");
    eprintln!("  --api <base_url>    (default: https://codeforces.com/api)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CFTRACKER_DB_URL, CFTRACKER_API_BASE, CFTRACKER_SHARED_URL, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Sync,
    Add(String),
    Remove(String),
    Clear,
    Prefs,
}

impl Command {
    /// Consume the subcommand, if any. Leading flags without a subcommand mean `show`.
    fn from_args<I: Iterator<Item = String>>(
        args: &mut Peekable<I>,
    ) -> Result<Option<Self>, ArgsError> {
        match args.peek().map(String::as_str) {
            None => return Ok(Some(Self::Show)),
            Some(flag) if flag.starts_with("--") && flag != "--help" => {
                return Ok(Some(Self::Show));
            }
            Some(_) => {}
        }
        let Some(first) = args.next() else {
            return Ok(Some(Self::Show));
        };
        let command = match first.as_str() {
            "show" => Self::Show,
            "sync" => Self::Sync,
            "add" => Self::Add(args.next().ok_or(ArgsError::MissingHandle { command: "add" })?),
            "remove" => Self::Remove(
                args.next()
                    .ok_or(ArgsError::MissingHandle { command: "remove" })?,
            ),
            "clear" => Self::Clear,
            "prefs" => Self::Prefs,
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(first)),
        };
        Ok(Some(command))
    }
}

struct Args {
    config: TrackerConfig,
    limit: usize,
    prefs: AppStateDraft,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        mut config: TrackerConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut limit = 20;
        let mut prefs = AppStateDraft::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value }.into());
                    }
                    config = config.with_db_url(&normalize_sqlite_url(value))?;
                }
                "--api" => {
                    let value = require_value(args, "--api")?;
                    config = config.with_api_base(&value)?;
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    limit = parse_number(value, "--limit")? as usize;
                }
                "--show-tags" => {
                    prefs.show_tags = Some(parse_bool(require_value(args, "--show-tags")?, "--show-tags")?);
                }
                "--show-rating" => {
                    prefs.show_rating =
                        Some(parse_bool(require_value(args, "--show-rating")?, "--show-rating")?);
                }
                "--hide-solved" => {
                    prefs.hide_solved =
                        Some(parse_bool(require_value(args, "--hide-solved")?, "--hide-solved")?);
                }
                "--min-rating" => {
                    prefs.min_rating =
                        Some(parse_number(require_value(args, "--min-rating")?, "--min-rating")?);
                }
                "--max-rating" => {
                    prefs.max_rating =
                        Some(parse_number(require_value(args, "--max-rating")?, "--max-rating")?);
                }
                "--per-page" => {
                    prefs.per_page =
                        Some(parse_number(require_value(args, "--per-page")?, "--per-page")?);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        Ok(Self {
            config,
            limit,
            prefs,
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

fn status_mark(status: Status) -> &'static str {
    match status {
        Status::Accepted => "[x]",
        Status::Attempted => "[~]",
        Status::Unseen => "[ ]",
    }
}

fn render(snapshot: &Snapshot, limit: usize) {
    let state = &snapshot.state;
    let prefs = &state.app_state;
    let ledger = &snapshot.view.ledger;

    println!("Users: {}", state.user_list.handles().join(", "));
    if let Some(err) = state.user_list.error() {
        println!("  ! {err}");
    }
    println!(
        "Solved: {} problems in {} contests; attempted: {} problems",
        ledger.solved_problems().len(),
        ledger.solved_contests().len(),
        ledger.attempted_problems().len(),
    );
    for (label, error) in [
        ("submissions", state.submissions.error()),
        ("problems", state.problems.error()),
        ("contests", state.contests.error()),
        ("shared problems", state.shared_problems.error()),
    ] {
        if let Some(err) = error {
            println!("  ! {label}: {err}");
        }
    }

    println!();
    println!("Contests:");
    for contest in snapshot.view.contests.iter().filter(|c| !c.problems().is_empty()).take(limit) {
        let solved = contest.problems().iter().filter(|p| p.solved()).count();
        println!(
            "  {} {:>6} {} ({solved}/{})",
            status_mark(ledger.contest_status(contest.id())),
            contest.id(),
            contest.name(),
            contest.problems().len(),
        );
    }

    println!();
    println!("Problems:");
    for problem in snapshot.visible_problems().take(limit) {
        let mut line = format!(
            "  {} {:>8} {}",
            status_mark(problem.status()),
            problem.id(),
            problem.name()
        );
        if prefs.show_rating() {
            if let Some(rating) = problem.rating() {
                line.push_str(&format!(" [{rating}]"));
            }
        }
        if prefs.show_tags() && !problem.tags().is_empty() {
            line.push_str(&format!(" {{{}}}", problem.tags().join(", ")));
        }
        println!("{line}");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1).peekable();
    let command = match Command::from_args(&mut argv) {
        Ok(Some(command)) => command,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };
    let parsed = Args::parse(&mut argv, TrackerConfig::from_env()?).inspect_err(|_| print_usage())?;

    prepare_sqlite_file(&parsed.config.db_url)?;
    tracing::debug!(db = %parsed.config.db_url, api = %parsed.config.api_base, "opening tracker");
    let mut services = AppServices::new_sqlite(&parsed.config).await?;
    let sync = services.sync();

    match command {
        Command::Show => {}
        Command::Sync => sync.sync_all(services.store_mut()).await,
        Command::Add(handle) => {
            if sync.add_user(services.store_mut(), &handle).await {
                sync.sync_all(services.store_mut()).await;
            }
        }
        Command::Remove(handle) => {
            sync.remove_user(services.store_mut(), &handle).await;
        }
        Command::Clear => {
            services.store_mut().dispatch(Action::ClearUsers).await;
            services.store_mut().dispatch(Action::ClearSubmissions).await;
        }
        Command::Prefs => {
            services
                .store_mut()
                .dispatch(Action::UpdateAppState(parsed.prefs))
                .await;
        }
    }

    render(services.store().snapshot(), parsed.limit);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Peekable<std::vec::IntoIter<String>> {
        list.iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
            .peekable()
    }

    #[test]
    fn command_defaults_to_show() {
        assert_eq!(Command::from_args(&mut args(&[])).unwrap(), Some(Command::Show));
        assert_eq!(
            Command::from_args(&mut args(&["add", "tourist"])).unwrap(),
            Some(Command::Add("tourist".into()))
        );
        assert!(Command::from_args(&mut args(&["add"])).is_err());
        assert_eq!(Command::from_args(&mut args(&["-h"])).unwrap(), None);

        let mut rest = args(&["--limit", "3"]);
        assert_eq!(Command::from_args(&mut rest).unwrap(), Some(Command::Show));
        assert_eq!(rest.next().as_deref(), Some("--limit"));
    }

    #[test]
    fn prefs_flags_fill_the_draft() {
        let parsed = Args::parse(
            &mut args(&["--hide-solved", "yes", "--min-rating", "1200", "--limit", "5"]),
            TrackerConfig::default(),
        )
        .unwrap();
        assert_eq!(parsed.prefs.hide_solved, Some(true));
        assert_eq!(parsed.prefs.min_rating, Some(1200));
        assert_eq!(parsed.limit, 5);
    }

    #[test]
    fn bad_flag_values_are_rejected() {
        assert!(Args::parse(&mut args(&["--per-page", "many"]), TrackerConfig::default()).is_err());
        assert!(Args::parse(&mut args(&["--hide-solved", "maybe"]), TrackerConfig::default()).is_err());
        assert!(Args::parse(&mut args(&["--bogus"]), TrackerConfig::default()).is_err());
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/tracker.db".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/tracker.db"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
