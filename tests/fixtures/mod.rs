//! Shared standings fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use proptest::prelude::*;
use swiss_pairing::types::Participant;

/// Standings after round one of an eight-entrant event with a bye
pub fn standings() -> Vec<Participant> {
    vec![
        Participant::new("Abimbola", 3, ["Boipelo"]),
        Participant::new("Boipelo", 0, ["Abimbola"]),
        Participant::new("Chiamaka", 1, ["Delo"]),
        Participant::new("Delo", 1, ["Chiamaka"]),
        Participant::new("Ebele", 0, ["Furaha"]),
        Participant::new("Furaha", 3, ["Ebele"]),
        Participant::new("Zula", 3, ["BYE"]),
        Participant::new("BYE", 0, ["Zula"]),
    ]
}

/// The same standings as a TOML standings file
pub const STANDINGS_TOML: &str = r#"
[[participants]]
id = "Abimbola"
points = 3
opponents = ["Boipelo"]

[[participants]]
id = "Boipelo"
points = 0
opponents = ["Abimbola"]

[[participants]]
id = "Chiamaka"
points = 1
opponents = ["Delo"]

[[participants]]
id = "Delo"
points = 1
opponents = ["Chiamaka"]

[[participants]]
id = "Ebele"
points = 0
opponents = ["Furaha"]

[[participants]]
id = "Furaha"
points = 3
opponents = ["Ebele"]

[[participants]]
id = "Zula"
points = 3
opponents = ["BYE"]
"#;

/// Write `contents` to a per-process file in the system temp directory
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("swiss-pairing-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("failed to write temp file");
    path
}

/// Even fields of 2 to `max_size` participants with small scores and random
/// histories drawn from the field's own ids
pub fn arb_field(max_size: usize) -> impl Strategy<Value = Vec<Participant>> {
    (1..=max_size / 2).prop_flat_map(|half| {
        let n = half * 2;
        prop::collection::vec((0u32..6, prop::collection::vec(0..n, 0..4)), n).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (points, opponents))| {
                        Participant::new(
                            format!("p{}", i),
                            points,
                            opponents.into_iter().map(|o| format!("p{}", o)),
                        )
                    })
                    .collect()
            },
        )
    })
}
