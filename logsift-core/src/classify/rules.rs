use crate::classify::classifier::PageClassifier;
use crate::classify::error::ClassificationConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One category and the patterns that select it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub category: String,
    pub patterns: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(category: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Both rule lists, in the order the caller wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationRuleSet {
    #[serde(default)]
    pub contains_rules: Vec<Rule>,

    #[serde(default)]
    pub exact_rules: Vec<Rule>,
}

impl ClassificationRuleSet {
    pub fn new(contains_rules: Vec<Rule>, exact_rules: Vec<Rule>) -> Self {
        Self {
            contains_rules,
            exact_rules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contains_rules.is_empty() && self.exact_rules.is_empty()
    }

    /// Append another set's rules after this one's, keeping both orders.
    pub fn extend(&mut self, other: ClassificationRuleSet) {
        self.contains_rules.extend(other.contains_rules);
        self.exact_rules.extend(other.exact_rules);
    }

    /// Compile into a classifier. Substring patterns of a rule are regular
    /// expressions joined into one alternation.
    pub fn compile(&self) -> Result<PageClassifier, ClassificationConfigError> {
        let contains = self
            .contains_rules
            .iter()
            .enumerate()
            .map(|(index, rule)| compile_contains(index, rule))
            .collect::<Result<Vec<_>, _>>()?;

        let exact = self
            .exact_rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                check_category(index, rule)?;
                Ok(ExactRule {
                    category: rule.category.clone(),
                    paths: rule.patterns.iter().cloned().collect(),
                })
            })
            .collect::<Result<Vec<_>, ClassificationConfigError>>()?;

        Ok(PageClassifier::new(contains, exact))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ContainsRule {
    pub(crate) category: String,
    pub(crate) pattern: Regex,
}

#[derive(Debug, Clone)]
pub(crate) struct ExactRule {
    pub(crate) category: String,
    pub(crate) paths: HashSet<String>,
}

fn check_category(index: usize, rule: &Rule) -> Result<(), ClassificationConfigError> {
    if rule.category.trim().is_empty() {
        return Err(ClassificationConfigError::EmptyCategory { index });
    }
    Ok(())
}

fn compile_contains(index: usize, rule: &Rule) -> Result<ContainsRule, ClassificationConfigError> {
    check_category(index, rule)?;

    // An empty alternation would match every path.
    if rule.patterns.is_empty() {
        return Err(ClassificationConfigError::NoPatterns {
            category: rule.category.clone(),
        });
    }

    // Compile each piece alone first so the error names the offending pattern.
    for pattern in &rule.patterns {
        Regex::new(pattern).map_err(|source| invalid(rule, pattern, source))?;
    }

    let joined = rule.patterns.join("|");
    let pattern = Regex::new(&joined).map_err(|source| invalid(rule, &joined, source))?;

    Ok(ContainsRule {
        category: rule.category.clone(),
        pattern,
    })
}

fn invalid(rule: &Rule, pattern: &str, source: regex::Error) -> ClassificationConfigError {
    ClassificationConfigError::InvalidPattern {
        category: rule.category.clone(),
        pattern: pattern.to_string(),
        source: Box::new(source),
    }
}
