//! Command line front end for the padel scoring engine.
//!
//! Replays a point sequence against a new or stored match, prints the score
//! and optionally persists the result to a JSON file store.

mod config;
mod replay;

use std::path::PathBuf;

use anyhow::{Context, Error, anyhow};
use log::{info, warn};
use padel_score::{
    Match, TeamThem, TeamUs,
    settings::AppSettings,
    storage::{FileStore, MatchRepository},
};
use pico_args::Arguments;

use config::CliConfig;

const HELP: &str = "\
Replay and record padel match scores

USAGE:
  padel_cli [OPTIONS] [--points LIST]

OPTIONS:
  --points       LIST     Comma-separated commands: us, them, undo, pause, resume.
                          Points may carry touches as us:LEFT:RIGHT  [default: none]
  --sets-to-win  N        Sets needed to win, 2 or 3  [default: env PADEL_SETS_TO_WIN or stored settings]
  --store        DIR      JSON store directory        [default: env PADEL_STORE_DIR]
  --us           A,B      Our players (left,right)    [default: Left,Right]
  --them         A,B      Opponent players            [default: Player 1,Player 2]

FLAGS:
  --no-final-tiebreak     Play the final set on past 6-6
  --resume                Continue the stored current match instead of starting one
  --json                  Print the full match record as JSON
  -h, --help              Print help information

ENVIRONMENT:
  PADEL_SETS_TO_WIN        Sets needed to win (2 or 3)
  PADEL_FINAL_SET_TIEBREAK Tie-break at 6-6 in the final set (true/false)
  PADEL_STORE_DIR          Directory for the JSON file store
  RUST_LOG                 Log level (e.g., debug)
";

struct Args {
    points: String,
    sets_to_win: Option<u32>,
    store: Option<PathBuf>,
    us: Option<String>,
    them: Option<String>,
    no_final_tiebreak: bool,
    resume: bool,
    json: bool,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        points: pargs.opt_value_from_str("--points")?.unwrap_or_default(),
        sets_to_win: pargs.opt_value_from_str("--sets-to-win")?,
        store: pargs.opt_value_from_str("--store")?,
        us: pargs.opt_value_from_str("--us")?,
        them: pargs.opt_value_from_str("--them")?,
        no_final_tiebreak: pargs.contains("--no-final-tiebreak"),
        resume: pargs.contains("--resume"),
        json: pargs.contains("--json"),
    };

    env_logger::builder().format_target(false).init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unexpected arguments: {remaining:?}");
    }

    let config = CliConfig::from_env(args.sets_to_win, args.no_final_tiebreak, args.store)?;
    config.validate()?;

    let mut repo = config
        .store_dir
        .as_ref()
        .map(|dir| MatchRepository::new(FileStore::new(dir)));

    let settings = match repo.as_mut() {
        Some(repo) => {
            if !repo.check_version()? {
                warn!("Stored data was written by a different format version");
            }
            config.apply(repo.settings_or_default()?)
        }
        None => config.apply(AppSettings::default()),
    };

    let mut m = if args.resume {
        let dir = config.require_store()?;
        let stored = match repo.as_ref() {
            Some(repo) => repo.current_match()?,
            None => None,
        };
        stored.ok_or_else(|| anyhow!("No match in play under {}", dir.display()))?
    } else {
        let (team_us, team_them) = teams(args.us.as_deref(), args.them.as_deref())?;
        Match::new(settings.match_config(team_us, team_them))?
    };
    info!("Scoring match {} ({})", m.id, m.status);

    let commands = replay::parse_points(&args.points)?;
    let outcome = replay::replay(&mut m, &commands);

    // Persist whatever was applied, even if a later command was rejected.
    if let Some(repo) = repo.as_mut() {
        repo.save_current_match(&m)
            .context("Failed to save current match")?;
        if m.is_completed() {
            repo.archive_current_match()?;
        }
    }

    let summary = outcome?;
    info!(
        "Replayed {} point(s), undid {}, ignored {} command(s)",
        summary.points_scored, summary.points_undone, summary.ignored
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&m)?);
    } else {
        print_score(&m);
    }

    Ok(())
}

/// Build both teams from optional `A,B` name pairs
fn teams(us: Option<&str>, them: Option<&str>) -> Result<(TeamUs, TeamThem), Error> {
    let (player_left, player_right) = name_pair(us.unwrap_or("Left,Right"), "--us")?;
    let (player1, player2) = name_pair(them.unwrap_or("Player 1,Player 2"), "--them")?;
    Ok((
        TeamUs {
            player_left,
            player_right,
        },
        TeamThem { player1, player2 },
    ))
}

fn name_pair(raw: &str, flag: &str) -> Result<(String, String), Error> {
    match raw.split_once(',') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => Err(anyhow!("{flag} expects two comma-separated names, got {raw:?}")),
    }
}

fn print_score(m: &Match) {
    println!(
        "{} / {} vs {} / {}",
        m.team_us.player_left, m.team_us.player_right, m.team_them.player1, m.team_them.player2
    );
    for line in m.sets_scores() {
        let marker = if line.completed { "" } else { " *" };
        println!("  Set {}: {}-{}{marker}", line.set_number, line.us, line.them);
    }
    println!("{}", m.summary());
}
