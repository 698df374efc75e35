use serde::Serialize;
use std::fmt;

/// Which retrieval path produced the current item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Browse,
    Search,
}

/// What the display should render. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Browse load succeeded but the catalog returned nothing.
    NoData,
    /// Search succeeded but nothing matched the filters.
    NoResults,
    Error,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Idle => "idle",
            DisplayStatus::Loading => "loading",
            DisplayStatus::Loaded => "loaded",
            DisplayStatus::NoData => "no-data",
            DisplayStatus::NoResults => "no-results",
            DisplayStatus::Error => "error",
        }
    }

    /// Status for a successful response in the given mode.
    pub fn for_success(mode: Mode, item_count: usize) -> Self {
        match (mode, item_count) {
            (_, n) if n > 0 => DisplayStatus::Loaded,
            (Mode::Browse, _) => DisplayStatus::NoData,
            (Mode::Search, _) => DisplayStatus::NoResults,
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
