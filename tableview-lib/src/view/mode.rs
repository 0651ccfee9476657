use serde::Deserialize;
use serde::Serialize;

/// Which projection of the processed rows is active.
///
/// `Grid` and `Cards` are toggled by the user; `Group` is only entered and
/// left as a side effect of selecting group columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Cards,
    Group,
}

impl ViewMode {
    /// The grid/cards toggle. No-op while grouped.
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Cards,
            Self::Cards => Self::Grid,
            Self::Group => Self::Group,
        }
    }

    /// Mode after the number of group columns went from `before` to `after`.
    ///
    /// The first group column forces `Group`. Removing the last one leaves
    /// `Group` for `resume`, the mode that was active before grouping started
    /// (`Grid` when that is unknown); any other mode is kept as is.
    pub fn after_group_change(self, before: usize, after: usize, resume: ViewMode) -> Self {
        match (before, after) {
            (0, n) if n > 0 => Self::Group,
            (n, 0) if n > 0 && self == Self::Group => match resume {
                Self::Group => Self::Grid,
                other => other,
            },
            _ => self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Cards => "cards",
            Self::Group => "group",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "cards" => Ok(Self::Cards),
            "group" => Ok(Self::Group),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}
