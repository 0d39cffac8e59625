use ledgerlens_core::{Category, CategoryDef, Transaction};
use serde::{Deserialize, Serialize};

/// A static pattern rule assigning a category to transactions whose
/// description matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub pattern: String,
    #[serde(default)]
    pub match_type: RuleMatch,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum RuleMatch {
    #[default]
    Contains,
    Exact,
    Regex,
}

/// Internal pairing of a rule with its precompiled regex (if applicable).
struct CompiledRule {
    rule: CategoryRule,
    compiled_regex: Option<regex::Regex>,
}

pub struct CategoryRuleEngine {
    rules: Vec<CompiledRule>,
}

impl CategoryRuleEngine {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let mut compiled: Vec<CompiledRule> = rules
            .into_iter()
            .map(|rule| {
                let compiled_regex = if let RuleMatch::Regex = &rule.match_type {
                    regex::Regex::new(&rule.pattern).ok()
                } else {
                    None
                };
                CompiledRule {
                    rule,
                    compiled_regex,
                }
            })
            .collect();
        // Highest priority first.
        compiled.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));
        Self { rules: compiled }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        struct RuleFile {
            #[serde(default)]
            rules: Vec<CategoryRule>,
        }
        let file: RuleFile =
            toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))?;
        Ok(Self::new(file.rules))
    }

    /// Build Contains rules from the snapshot taxonomy: each keyword of a
    /// category definition becomes one rule.
    pub fn from_defs(defs: &[CategoryDef]) -> Self {
        let rules = defs
            .iter()
            .flat_map(|def| {
                def.keywords.iter().map(|kw| CategoryRule {
                    category: def.name.clone(),
                    pattern: kw.clone(),
                    match_type: RuleMatch::Contains,
                    priority: 0,
                })
            })
            .collect();
        Self::new(rules)
    }

    pub fn find_matching_rule(&self, description: &str) -> Option<&CategoryRule> {
        let text = description.to_lowercase();
        self.rules
            .iter()
            .find(|cr| rule_matches(cr, description, &text))
            .map(|cr| &cr.rule)
    }

    /// Assign categories to uncategorized transactions in place. Existing
    /// categories are never overwritten. Returns how many were assigned.
    pub fn categorize(&self, transactions: &mut [Transaction]) -> usize {
        let mut assigned = 0;
        for tx in transactions.iter_mut().filter(|tx| tx.category.is_none()) {
            if let Some(rule) = self.find_matching_rule(&tx.description) {
                tx.category = Some(Category::from_label(&rule.category));
                assigned += 1;
            }
        }
        assigned
    }
}

fn rule_matches(cr: &CompiledRule, original: &str, lowercased: &str) -> bool {
    let pattern = cr.rule.pattern.to_lowercase();
    match &cr.rule.match_type {
        RuleMatch::Contains => lowercased.contains(&pattern),
        RuleMatch::Exact => lowercased == pattern,
        RuleMatch::Regex => cr
            .compiled_regex
            .as_ref()
            .is_some_and(|re| re.is_match(original)),
    }
}
