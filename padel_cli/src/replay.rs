//! Point sequence parsing and replay.
//!
//! A sequence is a comma-separated list of commands:
//!
//! - `us` / `them`: a point won by that team, optionally with touches as
//!   `us:LEFT:RIGHT`
//! - `undo`: undo the last point
//! - `pause` / `resume`: pause or resume the match

use std::str::FromStr;

use log::{debug, warn};
use padel_score::{Match, ScoreError, Team};

/// One replayed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Point {
        winner: Team,
        touches_left: u32,
        touches_right: u32,
    },
    Undo,
    Pause,
    Resume,
}

/// Replay error types
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Unknown command {0:?} (expected us, them, undo, pause or resume)")]
    UnknownCommand(String),

    #[error("Invalid touch count in {0:?}")]
    InvalidTouches(String),

    #[error("Command {index} ({command:?}) failed: {source}")]
    Score {
        index: usize,
        command: Command,
        #[source]
        source: ScoreError,
    },
}

impl FromStr for Command {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let mut parts = token.split(':');
        let head = parts.next().unwrap_or_default();

        let winner = match head {
            "us" => Team::Us,
            "them" => Team::Them,
            "undo" | "pause" | "resume" if parts.next().is_some() => {
                return Err(ReplayError::UnknownCommand(s.to_string()));
            }
            "undo" => return Ok(Command::Undo),
            "pause" => return Ok(Command::Pause),
            "resume" => return Ok(Command::Resume),
            _ => return Err(ReplayError::UnknownCommand(s.to_string())),
        };

        let touches: Vec<u32> = parts
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| ReplayError::InvalidTouches(s.to_string()))?;
        let (touches_left, touches_right) = match touches[..] {
            [] => (0, 0),
            [left, right] => (left, right),
            _ => return Err(ReplayError::InvalidTouches(s.to_string())),
        };

        Ok(Command::Point {
            winner,
            touches_left,
            touches_right,
        })
    }
}

/// Parse a comma-separated command list, skipping empty entries
pub fn parse_points(input: &str) -> Result<Vec<Command>, ReplayError> {
    input
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub points_scored: usize,
    pub games_won: usize,
    pub sets_won: usize,
    pub points_undone: usize,
    /// Undo, pause or resume commands that had nothing to act on
    pub ignored: usize,
}

/// Apply commands in order, stopping at the first rejected point
pub fn replay(m: &mut Match, commands: &[Command]) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for (index, &command) in commands.iter().enumerate() {
        let applied = match command {
            Command::Point {
                winner,
                touches_left,
                touches_right,
            } => {
                let update = m
                    .score_point(winner, touches_left, touches_right)
                    .map_err(|source| ReplayError::Score {
                        index,
                        command,
                        source,
                    })?;
                summary.points_scored += 1;
                summary.games_won += usize::from(update.game_won);
                summary.sets_won += usize::from(update.set_won);
                true
            }
            Command::Undo => {
                let undone = m.undo_last_point();
                summary.points_undone += usize::from(undone);
                undone
            }
            Command::Pause => m.pause(),
            Command::Resume => m.resume(),
        };

        if applied {
            debug!("Applied {command:?}: {}", m.summary());
        } else {
            warn!("Ignored {command:?} at position {index}");
            summary.ignored += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_score::{MatchConfig, TeamThem, TeamUs};

    fn new_match() -> Match {
        Match::new(MatchConfig {
            team_us: TeamUs {
                player_left: "L".to_string(),
                player_right: "R".to_string(),
            },
            team_them: TeamThem {
                player1: "A".to_string(),
                player2: "B".to_string(),
            },
            sets_to_win: 2,
            tiebreak_in_final_set: true,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        let commands = parse_points(" us, Them:3:1 ,undo,,pause,resume").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Point {
                    winner: Team::Us,
                    touches_left: 0,
                    touches_right: 0
                },
                Command::Point {
                    winner: Team::Them,
                    touches_left: 3,
                    touches_right: 1
                },
                Command::Undo,
                Command::Pause,
                Command::Resume,
            ]
        );
        assert!(parse_points("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!(matches!(
            "deuce".parse::<Command>(),
            Err(ReplayError::UnknownCommand(_))
        ));
        assert!(matches!(
            "undo:1".parse::<Command>(),
            Err(ReplayError::UnknownCommand(_))
        ));
        assert!(matches!(
            "us:1".parse::<Command>(),
            Err(ReplayError::InvalidTouches(_))
        ));
        assert!(matches!(
            "them:a:b".parse::<Command>(),
            Err(ReplayError::InvalidTouches(_))
        ));
    }

    #[test]
    fn test_replay_counts() {
        let mut m = new_match();
        let commands = parse_points("undo,us,us,us,us,them,undo,undo,undo").unwrap();

        let summary = replay(&mut m, &commands).unwrap();
        assert_eq!(summary.points_scored, 5);
        assert_eq!(summary.games_won, 1);
        assert_eq!(summary.points_undone, 3);
        assert_eq!(summary.ignored, 1);
        assert_eq!(m.summary(), "Set 1 • 0-0 • 30-0");
    }

    #[test]
    fn test_replay_stops_on_paused_match() {
        let mut m = new_match();
        let commands = parse_points("us,pause,them,resume").unwrap();

        let err = replay(&mut m, &commands).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Score {
                index: 2,
                source: ScoreError::MatchPaused(_),
                ..
            }
        ));
        assert_eq!(m.summary(), "Set 1 • 0-0 • 15-0");
    }

    #[test]
    fn test_replay_stops_on_touch_overflow() {
        let mut m = new_match();
        let commands = parse_points("us:1:0,them:4294967295:1,us").unwrap();

        let err = replay(&mut m, &commands).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Score {
                index: 1,
                source: ScoreError::TouchOverflow { .. },
                ..
            }
        ));
        assert_eq!(m.summary(), "Set 1 • 0-0 • 15-0");
    }
}
