//! Caller-side helpers around a pairing: preparing the field, loading
//! standings, and presenting the resulting matchups

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PairingError, Result};
use crate::types::{Pairing, Participant};

/// Standings for one round as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Standings {
    pub participants: Vec<Participant>,
}

impl Standings {
    /// Load standings from a `.json` file, or TOML for any other extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| PairingError::InvalidStandings {
                reason: format!("Failed to read {}: {}", path.display(), e),
            })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| {
            PairingError::InvalidStandings {
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            PairingError::InvalidStandings {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Add the bye participant when the live field is odd
///
/// A field that already contains `bye_id` is returned unchanged even if odd;
/// the orchestrator rejects it.
pub fn prepare_field(mut participants: Vec<Participant>, bye_id: &str) -> Vec<Participant> {
    if participants.len() % 2 == 1 && !participants.iter().any(|p| p.id == bye_id) {
        debug!(
            "Odd field of {} participants, adding bye '{}'",
            participants.len(),
            bye_id
        );
        participants.push(Participant::bye(bye_id));
    }
    participants
}

/// Two participants drawn against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup<'a> {
    pub first: &'a Participant,
    pub second: &'a Participant,
}

impl Matchup<'_> {
    /// Whether one side is the bye slot
    pub fn is_bye(&self, bye_id: &str) -> bool {
        self.first.id == bye_id || self.second.id == bye_id
    }
}

impl std::fmt::Display for Matchup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v {}", self.first, self.second)
    }
}

/// How a list of matchups is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `first (points) v second (points)` line per matchup
    #[default]
    Text,
    /// A JSON array of `{ "first": id, "second": id }` objects
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown format '{}' (expected text or json)", other)),
        }
    }
}

#[derive(Serialize)]
struct MatchupRow<'a> {
    first: &'a str,
    second: &'a str,
}

/// Render matchups for output; text ends with a newline per matchup
pub fn render(matchups: &[Matchup<'_>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(matchups
            .iter()
            .map(|matchup| format!("{}\n", matchup))
            .collect()),
        OutputFormat::Json => {
            let rows: Vec<MatchupRow<'_>> = matchups
                .iter()
                .map(|matchup| MatchupRow {
                    first: &matchup.first.id,
                    second: &matchup.second.id,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)? + "\n")
        }
    }
}

/// One matchup per unordered pair, lower position first
pub fn matchups<'a>(participants: &'a [Participant], pairing: &Pairing) -> Vec<Matchup<'a>> {
    pairing
        .pairs()
        .into_iter()
        .filter_map(|(i, j)| {
            Some(Matchup {
                first: participants.get(i)?,
                second: participants.get(j)?,
            })
        })
        .collect()
}
