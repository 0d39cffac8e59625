use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const INVESTMENT_LABEL: &str = "Investment";
pub const INCOME_OFFSET_LABEL: &str = "Income Offset";

/// Closed category taxonomy. The two labels with aggregation semantics are
/// first-class variants; everything else is an ordinary user-defined label.
/// Strings appear only at the serde boundary, so the analytics code can
/// match exhaustively instead of comparing magic strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Investment,
    IncomeOffset,
    Custom(String),
}

impl Category {
    /// Unknown labels deliberately fall back to `Custom`: an unrecognized
    /// category is treated as an ordinary expense/income bucket, never an
    /// error.
    pub fn from_label(label: &str) -> Self {
        match label {
            INVESTMENT_LABEL => Category::Investment,
            INCOME_OFFSET_LABEL => Category::IncomeOffset,
            other => Category::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Investment => INVESTMENT_LABEL,
            Category::IncomeOffset => INCOME_OFFSET_LABEL,
            Category::Custom(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

/// A user-defined taxonomy entry as stored in the snapshot. Keywords feed
/// the static pattern-rule categorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}
