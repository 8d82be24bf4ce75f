use crate::classify::error::ClassificationConfigError;
use crate::classify::rules::{ClassificationRuleSet, ContainsRule, ExactRule};
use crate::record::Record;

/// Compiled form of a [`ClassificationRuleSet`].
#[derive(Debug, Clone)]
pub struct PageClassifier {
    contains: Vec<ContainsRule>,
    exact: Vec<ExactRule>,
}

impl PageClassifier {
    pub(crate) fn new(contains: Vec<ContainsRule>, exact: Vec<ExactRule>) -> Self {
        Self { contains, exact }
    }

    pub fn is_empty(&self) -> bool {
        self.contains.is_empty() && self.exact.is_empty()
    }

    /// Category for `path`, if any rule selects it.
    pub fn class_for(&self, path: &str) -> Option<&str> {
        let by_substring = self
            .contains
            .iter()
            .fold(None, |class, rule| {
                if rule.pattern.is_match(path) {
                    Some(rule.category.as_str())
                } else {
                    class
                }
            });

        self.exact.iter().fold(by_substring, |class, rule| {
            if rule.paths.contains(path) {
                Some(rule.category.as_str())
            } else {
                class
            }
        })
    }

    /// Tag every record; returns how many received a class.
    pub fn classify(&self, records: &mut [Record]) -> u64 {
        let mut classified = 0;
        for record in records {
            let Some(class) = self.class_for(record.path()) else {
                continue;
            };
            let class = class.to_string();
            if record.set_page_class(class) {
                classified += 1;
            }
        }
        classified
    }
}

/// Compile `rule_set` and classify `records` with it.
pub fn classify(
    records: &mut [Record],
    rule_set: &ClassificationRuleSet,
) -> Result<u64, ClassificationConfigError> {
    Ok(rule_set.compile()?.classify(records))
}
