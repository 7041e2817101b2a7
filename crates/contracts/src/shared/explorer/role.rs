use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dot-joined address of a leaf inside a record (e.g. "customer.address.city")
pub type FieldPath = String;

/// Label the import format uses for an unmapped role
pub const NOT_USED_LABEL: &str = "- not used -";

/// Functional slot a user binds to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Free-text search target (search itself runs over the list view fields)
    Search,
    Filter1,
    Filter2,
    Filter3,
    Sort1,
    Sort2,
}

impl Role {
    /// All roles in their canonical order
    pub const ALL: [Role; 6] = [
        Role::Search,
        Role::Filter1,
        Role::Filter2,
        Role::Filter3,
        Role::Sort1,
        Role::Sort2,
    ];

    pub const FILTERS: [Role; 3] = [Role::Filter1, Role::Filter2, Role::Filter3];

    pub const SORTS: [Role; 2] = [Role::Sort1, Role::Sort2];

    /// Wire name used in `controls_mapping`
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Search => "search",
            Role::Filter1 => "filter1",
            Role::Filter2 => "filter2",
            Role::Filter3 => "filter3",
            Role::Sort1 => "sort1",
            Role::Sort2 => "sort2",
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, Role::Filter1 | Role::Filter2 | Role::Filter3)
    }

    pub fn is_sort(&self) -> bool {
        matches!(self, Role::Sort1 | Role::Sort2)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("filter4".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::Filter2).unwrap();
        assert_eq!(json, "\"filter2\"");
    }
}
