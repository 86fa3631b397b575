use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel division id meaning "aggregate across all divisions".
pub const ALL_DIVISIONS: &str = "all";

/// The active tenant scope for the current session.
///
/// Exactly one selection is active at a time; its absence means the
/// consuming view must prompt for a division before loading scoped data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionSelection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DivisionSelection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// The cross-division aggregate view.
    pub fn all() -> Self {
        Self::new(ALL_DIVISIONS, "All divisions")
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_DIVISIONS
    }
}

/// Query parameters carrying the division scope.
///
/// The sentinel selection yields `showAllDivisions=true`, a concrete
/// division yields `divisionId=<id>`, and no selection yields neither —
/// the two parameters are never sent together.
pub fn scope_params(selection: Option<&DivisionSelection>) -> Vec<(String, String)> {
    match selection {
        Some(sel) if sel.is_all() => {
            vec![("showAllDivisions".to_string(), "true".to_string())]
        }
        Some(sel) => vec![("divisionId".to_string(), sel.id.clone())],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &[(String, String)]) -> Vec<&str> {
        params.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_all_divisions_scope() {
        let sel = DivisionSelection::all();
        let params = scope_params(Some(&sel));
        assert_eq!(
            params,
            vec![("showAllDivisions".to_string(), "true".to_string())]
        );
        assert!(!keys(&params).contains(&"divisionId"));
    }

    #[test]
    fn test_concrete_division_scope() {
        let sel = DivisionSelection::new("7", "North");
        let params = scope_params(Some(&sel));
        assert_eq!(params, vec![("divisionId".to_string(), "7".to_string())]);
        assert!(!keys(&params).contains(&"showAllDivisions"));
    }

    #[test]
    fn test_no_selection_scope() {
        assert!(scope_params(None).is_empty());
    }

    #[test]
    fn test_reselection_switches_scope() {
        // "all" followed by a concrete division: the second request
        // must carry only divisionId.
        let first = DivisionSelection::all();
        let second = DivisionSelection::new("7", "North");
        assert_eq!(
            scope_params(Some(&first)),
            vec![("showAllDivisions".to_string(), "true".to_string())]
        );
        let params = scope_params(Some(&second));
        assert_eq!(params, vec![("divisionId".to_string(), "7".to_string())]);
    }
}
