use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::role::{FieldPath, Role};

/// Sort key reserved for "position in the loaded dataset"
pub const ORIGINAL_SORT_KEY: &str = "__original";
/// Sort key reserved for a random permutation
pub const RANDOM_SORT_KEY: &str = "__random";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc.",
            SortDirection::Desc => "desc.",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// One of the three mutually exclusive sort modes.
///
/// Wire form is `"<key>::<direction>"`, e.g. `"price::desc"`,
/// `"__original::asc"` or `"__random::none"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortChoice {
    /// Sort by a mapped sort field using normalized values
    Field {
        path: FieldPath,
        direction: SortDirection,
    },
    /// Sort by position in the loaded dataset
    Original { direction: SortDirection },
    /// Uniform random permutation, re-rolled on every run
    Random,
}

impl FromStr for SortChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.rsplit_once("::") {
            Some((key, direction)) => (key, Some(direction)),
            None => (s, None),
        };

        if key.is_empty() {
            return Err(format!("empty sort key in '{}'", s));
        }

        if key == RANDOM_SORT_KEY {
            return Ok(SortChoice::Random);
        }

        let direction = direction
            .ok_or_else(|| format!("missing sort direction in '{}'", s))?
            .parse::<SortDirection>()?;

        if key == ORIGINAL_SORT_KEY {
            Ok(SortChoice::Original { direction })
        } else {
            Ok(SortChoice::Field {
                path: key.to_string(),
                direction,
            })
        }
    }
}

impl fmt::Display for SortChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortChoice::Field { path, direction } => write!(f, "{}::{}", path, direction.as_str()),
            SortChoice::Original { direction } => {
                write!(f, "{}::{}", ORIGINAL_SORT_KEY, direction.as_str())
            }
            SortChoice::Random => write!(f, "{}::none", RANDOM_SORT_KEY),
        }
    }
}

/// Chosen value per filter role; an empty or missing value leaves that filter off
pub type FilterValues = BTreeMap<Role, String>;

/// Request to run the filter -> search -> sort pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub filter_values: FilterValues,
    /// Sort choice in wire form (`"key::direction"`)
    #[serde(default)]
    pub sort: Option<String>,
}

/// Field value shown on a list card (`None` = absent in this record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub path: FieldPath,
    pub value: Option<Value>,
}

/// A record in the result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Position in the loaded dataset, used to open the detail view
    pub position: usize,
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub total: usize,
    pub items: Vec<ListItem>,
}

/// Present field value in the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub path: FieldPath,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub position: usize,
    pub entries: Vec<DetailEntry>,
}

/// Filter dropdown for one mapped filter role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControl {
    pub role: Role,
    pub path: FieldPath,
    /// Distinct values in string form, sorted
    pub values: Vec<String>,
}

/// Entry of the sort dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    /// Wire form to send back as `QueryRequest::sort`
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsResponse {
    pub filters: Vec<FilterControl>,
    pub sort_options: Vec<SortOption>,
}

/// Search keystrokes for the live query (debounced on the server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSearchRequest {
    pub text: String,
}

/// Filter and sort changes for the live query (applied immediately)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveInputsRequest {
    #[serde(default)]
    pub filter_values: FilterValues,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Last result of the live query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSnapshot {
    /// Bumped on every pipeline run
    pub generation: u64,
    pub query: QueryRequest,
    pub result: QueryResponse,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_choices() {
        assert_eq!(
            "price::desc".parse::<SortChoice>().unwrap(),
            SortChoice::Field {
                path: "price".to_string(),
                direction: SortDirection::Desc
            }
        );
        assert_eq!(
            "__original::asc".parse::<SortChoice>().unwrap(),
            SortChoice::Original {
                direction: SortDirection::Asc
            }
        );
        assert_eq!("__random::none".parse::<SortChoice>().unwrap(), SortChoice::Random);
        assert_eq!("__random".parse::<SortChoice>().unwrap(), SortChoice::Random);
    }

    #[test]
    fn test_parse_rejects_bad_direction() {
        assert!("price::up".parse::<SortChoice>().is_err());
        assert!("price".parse::<SortChoice>().is_err());
        assert!("__original::none".parse::<SortChoice>().is_err());
        assert!("::asc".parse::<SortChoice>().is_err());
    }

    #[test]
    fn test_display_matches_wire_form() {
        for wire in ["a.b::asc", "__original::desc", "__random::none"] {
            assert_eq!(wire.parse::<SortChoice>().unwrap().to_string(), wire);
        }
    }
}
