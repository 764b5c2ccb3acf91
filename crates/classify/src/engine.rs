//! The scoring engine.
//!
//! Pure and total: every subject/description pair classifies to something,
//! worst case the fallback category and priority at low confidence. No
//! I/O, no clock, no shared mutable state.

use model::{Category, ClassificationResult, Priority, Reasoning};

use crate::rules::RuleSet;


/// Confidence reported when no category keyword matches.
pub const FALLBACK_CATEGORY_CONFIDENCE: f64 = 0.3;

/// Confidence reported when no priority trigger matches.
pub const FALLBACK_PRIORITY_CONFIDENCE: f64 = 0.5;

/// Keyword count at which category confidence saturates at 1.0.
const CATEGORY_SATURATION: f64 = 5.0;

/// Severity rank at which priority confidence saturates at 1.0.
const PRIORITY_SATURATION: f64 = 3.0;

/// Keyword-based ticket classifier over an injected, immutable rule set.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    /// Builds a classifier over explicit rule tables.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Builds a classifier over the reference tables.
    pub fn with_defaults() -> Self {
        Self::new(RuleSet::default())
    }

    /// The rule tables this classifier scores against.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classifies one ticket's subject + description.
    ///
    /// Deterministic for identical input and rule tables. Matching is
    /// substring-based with no word boundaries: "login" inside a longer
    /// word still counts, which is intentional.
    pub fn classify(&self, subject: &str, description: &str) -> ClassificationResult {
        let text = format!("{subject} {description}").to_lowercase();
        let mut found: Vec<String> = Vec::new();

        // Category axis: presence count per rule. A later rule needs a
        // strictly greater count to replace an earlier one, so ties keep
        // the earliest-declared category.
        let mut best: Option<(Category, usize)> = None;
        for rule in &self.rules.categories {
            let mut count = 0;
            for keyword in &rule.keywords {
                if text.contains(keyword.as_str()) {
                    count += 1;
                    record_match(&mut found, keyword);
                }
            }
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((rule.category, count));
            }
        }

        let (category, category_confidence, category_reasoning) = match best {
            Some((category, count)) => (
                category,
                round2((count as f64 / CATEGORY_SATURATION).min(1.0)),
                format!("matched {count} keyword(s) for {category}"),
            ),
            None => (
                Category::Other,
                FALLBACK_CATEGORY_CONFIDENCE,
                "no keywords matched, assigned default category".to_string(),
            ),
        };

        // Priority axis, evaluated independently of category. Rules are in
        // ascending severity, so overwriting on every hit keeps the
        // highest-severity match; rank is the rule's 1-based list position.
        // Every matched trigger is recorded, not just the winning rule's.
        let mut hit: Option<(Priority, usize)> = None;
        for (index, rule) in self.rules.priorities.iter().enumerate() {
            let mut any = false;
            for trigger in &rule.triggers {
                if text.contains(trigger.as_str()) {
                    any = true;
                    record_match(&mut found, trigger);
                }
            }
            if any {
                hit = Some((rule.priority, index + 1));
            }
        }

        let (priority, priority_confidence, priority_reasoning) = match hit {
            Some((priority, rank)) => (
                priority,
                round2((rank as f64 / PRIORITY_SATURATION).min(1.0)),
                format!("found urgent/important keywords indicating {priority} priority"),
            ),
            None => (
                Priority::Medium,
                FALLBACK_PRIORITY_CONFIDENCE,
                "no priority indicators found, assigned default medium priority".to_string(),
            ),
        };

        let overall_confidence = round2((category_confidence + priority_confidence) / 2.0);

        ClassificationResult {
            category,
            priority,
            category_confidence,
            priority_confidence,
            overall_confidence,
            reasoning: Reasoning {
                category_reasoning,
                priority_reasoning,
            },
            keywords_found: found,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Appends a matched keyword unless it was already recorded. The found
/// list stays in first-seen order; tables are small enough that a linear
/// scan beats a set.
fn record_match(found: &mut Vec<String>, keyword: &str) {
    if !found.iter().any(|k| k == keyword) {
        found.push(keyword.to_string());
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
