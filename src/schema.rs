//! Remote tables touched by a reset.
//!
//! The race tables form a chain of foreign keys: `heat_results` and
//! `heat_entries` reference `heats`, `heats` reference `rounds`, and the
//! `race_state` singleton points at the current round and heat. Rows must be
//! removed child-first, after the singleton's pointers are cleared.

/// Singleton row tracking the round and heat currently being raced.
pub const RACE_STATE_TABLE: &str = "race_state";

/// Primary key of the one `race_state` row.
pub const RACE_STATE_ID: &str = "1";

/// Nullable foreign keys held by `race_state`.
pub const RACE_STATE_POINTERS: [&str; 2] = ["current_round_id", "current_heat_id"];

/// A race data table whose rows are deleted wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    HeatResults,
    HeatEntries,
    Heats,
    Rounds,
    Cars,
}

impl Table {
    /// Children before parents.
    pub const DELETION_ORDER: [Table; 5] = [
        Table::HeatResults,
        Table::HeatEntries,
        Table::Heats,
        Table::Rounds,
        Table::Cars,
    ];

    /// Table name as exposed by the REST API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeatResults => "heat_results",
            Self::HeatEntries => "heat_entries",
            Self::Heats => "heats",
            Self::Rounds => "rounds",
            Self::Cars => "cars",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body that clears every pointer on the `race_state` row.
pub fn race_state_reset_body() -> serde_json::Value {
    let fields = RACE_STATE_POINTERS
        .iter()
        .map(|name| (name.to_string(), serde_json::Value::Null))
        .collect();
    serde_json::Value::Object(fields)
}
