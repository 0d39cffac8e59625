pub mod csv;
pub mod match_engine;
pub mod rules;

pub use csv::{parse_bank_csv, parse_secondary_csv, ImportError, SecondaryRecord};
pub use match_engine::{apply_match, is_matchable, MatchEngine, ProposedMatch};
pub use rules::{CategoryRule, CategoryRuleEngine, RuleMatch};
