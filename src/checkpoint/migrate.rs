//! Upgrades for saved games written by earlier releases.
//!
//! Saved data is upgraded one version at a time on the raw JSON tree:
//!
//! - **v0**: `rounds` instead of `hands`, both at the top level and inside
//!   each team; team `name`; camelCase hand fields; `bidWinner` as a bare
//!   team string.
//! - **v1**: as v0 but named `hands`. Later v1 saves carry a `players` pair
//!   per team and `bidWinnerPlayerIndex` per hand.
//! - **v2**: the current [`Checkpoint`](super::Checkpoint) envelope, which
//!   is the first layout with an explicit `version`.

use super::error::CheckpointError;
use super::CHECKPOINT_VERSION;
use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

type MigrationStep = fn(Value) -> Result<Value, CheckpointError>;

/// `(from, step)`: each step upgrades a `from` layout to `from + 1`.
const MIGRATIONS: &[(u32, MigrationStep)] = &[(0, rounds_to_hands), (1, legacy_to_envelope)];

fn shape_error(message: impl Into<String>) -> CheckpointError {
    CheckpointError::UnrecognizedShape(message.into())
}

/// Work out which layout `value` was written in.
pub fn detect_version(value: &Value) -> Result<u32, CheckpointError> {
    let obj = value
        .as_object()
        .ok_or_else(|| shape_error("top level is not an object"))?;

    if let Some(version) = obj.get("version") {
        return version
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| shape_error("version is not a non-negative integer"));
    }

    let teams: Vec<&Map<String, Value>> = ["team1", "team2"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_object))
        .collect();
    if teams.len() != 2 {
        return Err(shape_error("both teams must be present"));
    }

    let uses_rounds =
        obj.contains_key("rounds") || teams.iter().any(|team| team.contains_key("rounds"));
    Ok(if uses_rounds { 0 } else { 1 })
}

/// Apply every migration needed to bring `value` to the current layout.
pub fn upgrade(mut value: Value) -> Result<Value, CheckpointError> {
    let mut version = detect_version(&value)?;
    if version > CHECKPOINT_VERSION {
        return Err(CheckpointError::UnsupportedVersion {
            found: version,
            supported: CHECKPOINT_VERSION,
        });
    }

    while version < CHECKPOINT_VERSION {
        let step = MIGRATIONS
            .iter()
            .find(|(from, _)| *from == version)
            .map(|(_, step)| *step)
            .ok_or(CheckpointError::UnsupportedVersion {
                found: version,
                supported: CHECKPOINT_VERSION,
            })?;
        value = step(value)?;
        version += 1;
        tracing::debug!(version, "saved game upgraded");
    }

    Ok(value)
}

/// Prefer `to` when both keys exist, matching how older readers resolved them.
fn rename_key(obj: &mut Map<String, Value>, from: &str, to: &str) {
    let old = obj.remove(from);
    if obj.get(to).is_some_and(|v| !v.is_null()) {
        return;
    }
    if let Some(old) = old {
        obj.insert(to.to_string(), old);
    }
}

/// v0 -> v1: `rounds` became `hands`.
fn rounds_to_hands(mut value: Value) -> Result<Value, CheckpointError> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| shape_error("top level is not an object"))?;
    rename_key(obj, "rounds", "hands");
    for key in ["team1", "team2"] {
        if let Some(team) = obj.get_mut(key).and_then(Value::as_object_mut) {
            rename_key(team, "rounds", "hands");
        }
    }
    Ok(value)
}

/// v1 -> v2: snake_case fields, player pairs, structured bid winner, envelope.
fn legacy_to_envelope(value: Value) -> Result<Value, CheckpointError> {
    let Value::Object(mut obj) = value else {
        return Err(shape_error("top level is not an object"));
    };

    let team1 = legacy_team(obj.remove("team1"), "team1")?;
    let team2 = legacy_team(obj.remove("team2"), "team2")?;
    let hands = match obj.remove("hands") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(legacy_hand)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(shape_error("hands is not a list")),
    };

    Ok(json!({
        "version": 2,
        "id": Uuid::new_v4(),
        "saved_at": Utc::now(),
        "team1": team1,
        "team2": team2,
        "hands": hands,
    }))
}

fn legacy_team(value: Option<Value>, key: &str) -> Result<Value, CheckpointError> {
    let Some(Value::Object(mut team)) = value else {
        return Err(shape_error(format!("{key} is not an object")));
    };

    let players = match team.remove("players") {
        Some(Value::Array(names)) if names.len() == 2 => Value::Array(names),
        _ => {
            let name = team
                .remove("name")
                .and_then(|n| n.as_str().map(str::to_owned))
                .unwrap_or_default();
            json!([name, ""])
        }
    };

    let deltas = match team.remove("hands") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(shape_error(format!("{key} hand list is not a list"))),
    };

    let score = match team.remove("score") {
        Some(score) if !score.is_null() => score,
        _ => json!(deltas.iter().filter_map(Value::as_i64).sum::<i64>()),
    };

    Ok(json!({
        "players": players,
        "score": score,
        "hand_deltas": deltas,
    }))
}

fn legacy_hand(value: Value) -> Result<Value, CheckpointError> {
    let Value::Object(mut hand) = value else {
        return Err(shape_error("hand is not an object"));
    };
    let mut take = |key: &str| hand.remove(key).unwrap_or(Value::Null);

    let player = match take("bidWinnerPlayerIndex").as_u64() {
        Some(0) => json!("first"),
        Some(1) => json!("second"),
        _ => Value::Null,
    };

    Ok(json!({
        "team1_meld": take("team1Meld"),
        "team1_tricks": take("team1Tricks"),
        "team2_meld": take("team2Meld"),
        "team2_tricks": take("team2Tricks"),
        "bid": take("bid"),
        "bid_winner": { "team": take("bidWinner"), "player": player },
        "trump": take("trump"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v0() -> Value {
        json!({
            "team1": { "name": "Us", "score": 22, "rounds": [22] },
            "team2": { "name": "Them", "score": 13, "rounds": [13] },
            "rounds": [{
                "team1Meld": 10, "team1Tricks": 12,
                "team2Meld": 0, "team2Tricks": 13,
                "bid": 20, "bidWinner": "team1", "trump": "hearts"
            }]
        })
    }

    #[test]
    fn detects_each_layout() {
        assert_eq!(detect_version(&v0()).unwrap(), 0);

        let v1 = rounds_to_hands(v0()).unwrap();
        assert_eq!(detect_version(&v1).unwrap(), 1);

        assert_eq!(detect_version(&json!({ "version": 2 })).unwrap(), 2);
    }

    #[test]
    fn rejects_unknown_layouts() {
        assert!(matches!(
            detect_version(&json!([1, 2, 3])),
            Err(CheckpointError::UnrecognizedShape(_))
        ));
        assert!(matches!(
            detect_version(&json!({ "team1": {} })),
            Err(CheckpointError::UnrecognizedShape(_))
        ));
        assert!(matches!(
            detect_version(&json!({ "version": "two" })),
            Err(CheckpointError::UnrecognizedShape(_))
        ));
    }

    #[test]
    fn newer_versions_are_refused() {
        let err = upgrade(json!({ "version": 9 })).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion {
                found: 9,
                supported: CHECKPOINT_VERSION
            }
        ));
    }

    #[test]
    fn rounds_rename_prefers_existing_hands() {
        let value = json!({
            "team1": { "hands": [1], "rounds": [2] },
            "team2": { "rounds": [3] },
            "rounds": []
        });
        let upgraded = rounds_to_hands(value).unwrap();
        assert_eq!(upgraded["team1"]["hands"], json!([1]));
        assert_eq!(upgraded["team2"]["hands"], json!([3]));
        assert_eq!(upgraded["hands"], json!([]));
        assert!(upgraded["team1"].get("rounds").is_none());
    }

    #[test]
    fn full_chain_produces_current_layout() {
        let upgraded = upgrade(v0()).unwrap();
        assert_eq!(upgraded["version"], json!(CHECKPOINT_VERSION));
        assert_eq!(upgraded["team1"]["players"], json!(["Us", ""]));
        assert_eq!(upgraded["team1"]["hand_deltas"], json!([22]));
        assert_eq!(upgraded["hands"][0]["team1_tricks"], json!(12));
        assert_eq!(upgraded["hands"][0]["bid_winner"]["team"], json!("team1"));
        assert!(upgraded["hands"][0]["bid_winner"]["player"].is_null());
        assert!(upgraded["id"].is_string());
    }

    #[test]
    fn player_pairs_and_seat_index_carry_over() {
        let v1 = json!({
            "team1": { "players": ["Ann", "Bob"], "score": -25, "hands": [-25] },
            "team2": { "players": ["Cy", "Di"], "score": 22, "hands": [22] },
            "hands": [{
                "team1Meld": 10, "team1Tricks": 8,
                "team2Meld": 5, "team2Tricks": 17,
                "bid": 25, "bidWinner": "team1", "bidWinnerPlayerIndex": 1,
                "trump": "spades"
            }]
        });
        let upgraded = upgrade(v1).unwrap();
        assert_eq!(upgraded["team2"]["players"], json!(["Cy", "Di"]));
        assert_eq!(upgraded["hands"][0]["bid_winner"]["player"], json!("second"));
    }

    #[test]
    fn missing_score_is_summed_from_deltas() {
        let v1 = json!({
            "team1": { "name": "A", "hands": [10, -20] },
            "team2": { "name": "B" }
        });
        let upgraded = upgrade(v1).unwrap();
        assert_eq!(upgraded["team1"]["score"], json!(-10));
        assert_eq!(upgraded["team2"]["score"], json!(0));
        assert_eq!(upgraded["hands"], json!([]));
    }

    #[test]
    fn current_layout_passes_through_untouched() {
        let current = json!({ "version": CHECKPOINT_VERSION, "team1": 1 });
        assert_eq!(upgrade(current.clone()).unwrap(), current);
    }
}
