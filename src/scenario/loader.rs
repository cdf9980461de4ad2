//! Load scenario definitions from JSON

use super::ScenarioSet;
use crate::error::LoadError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a scenario set from a JSON file holding an array of scenarios
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<ScenarioSet, LoadError> {
    let file = File::open(path)?;
    load_scenarios_from_reader(BufReader::new(file))
}

/// Load a scenario set from any reader
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<ScenarioSet, LoadError> {
    let set: ScenarioSet = serde_json::from_reader(reader)?;
    log::info!(
        "Loaded {} scenarios ({} active)",
        set.len(),
        set.active().count()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioKind;

    #[test]
    fn test_load_scenarios() {
        let json = r#"[
            {"id": "hiring", "amount": 4500, "active": true, "kind": "recurring_expense", "start_index": 2},
            {"id": "grant", "label": "Subvention", "amount": 10000, "kind": "one_off_income", "index": 4}
        ]"#;
        let set = load_scenarios_from_reader(json.as_bytes()).expect("Failed to load scenarios");
        assert_eq!(set.len(), 2);
        assert_eq!(set.active().count(), 1);
        assert_eq!(
            set.get("hiring").map(|s| s.kind),
            Some(ScenarioKind::RecurringExpense { start_index: 2 })
        );
    }

    #[test]
    fn test_reference_file_matches_builtin() {
        let set = load_scenarios("data/reference_scenarios.json").expect("Failed to load reference scenarios");
        assert_eq!(set, ScenarioSet::reference());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": "x", "amount": 1, "kind": "one_off_income", "index": 0},
            {"id": "x", "amount": 2, "kind": "one_off_expense", "index": 1}
        ]"#;
        let err = load_scenarios_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().contains("already defined"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"[{"id": "x", "amount": 1, "kind": "refund", "index": 0}]"#;
        assert!(load_scenarios_from_reader(json.as_bytes()).is_err());
    }
}
