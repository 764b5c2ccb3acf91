//! Rule tables driving the classification engine.
//!
//! A [`RuleSet`] is immutable configuration: loaded once at startup (or
//! built in a test) and injected into the engine. Declaration order is
//! semantic on both axes. Category ties resolve to the earliest rule, and
//! priority rules are listed in ascending severity so the last hit is the
//! most severe and its list position feeds the confidence formula.
//!
//! The specific keyword strings are a tunable table, not a contract; the
//! scoring algorithm over them is the contract.

use model::{Category, Priority};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-priority integer boosts carried by a category rule.
///
/// A struct with one field per level rather than a map, so the table is
/// total over all priorities by construction; levels omitted from a config
/// file default to zero. Carried for downstream triage policies; the
/// scoring algorithm itself does not consume boosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityBoosts {
    pub low: i32,
    pub medium: i32,
    pub high: i32,
    pub urgent: i32,
}

impl PriorityBoosts {
    /// The boost for one priority level. Total: every level has a value.
    pub fn for_priority(self, priority: Priority) -> i32 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Urgent => self.urgent,
        }
    }
}

/// Keywords that vote for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    /// Matched as substrings of the lowercased ticket text, in order.
    pub keywords: Vec<String>,
    #[serde(default)]
    pub boosts: PriorityBoosts,
}

/// Trigger keywords that select one priority level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRule {
    pub priority: Priority,
    /// Any single trigger hit selects this level.
    pub triggers: Vec<String>,
}

/// The complete, immutable rule configuration for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Category rules in declaration order. Ties resolve to the earliest
    /// rule, so order here is part of the configuration.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    /// Priority rules in ascending severity. `medium` never appears: it is
    /// the rule-less default level.
    #[serde(default)]
    pub priorities: Vec<PriorityRule>,
}

/// Rule-table validation failures. These are startup concerns: surface
/// them when configuration is loaded, before live traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("duplicate rule for category {0}")]
    DuplicateCategory(Category),

    #[error("duplicate rule for priority {0}")]
    DuplicatePriority(Priority),

    #[error("the fallback category 'other' cannot carry a scoring rule")]
    FallbackCategoryRule,

    #[error("the default priority 'medium' cannot carry a trigger rule")]
    DefaultPriorityRule,

    #[error("category {0} has an empty keyword")]
    EmptyKeyword(Category),

    #[error("priority {0} has an empty trigger")]
    EmptyTrigger(Priority),

    /// The engine lowercases ticket text before matching, so a keyword
    /// with uppercase characters can never hit.
    #[error("keyword '{keyword}' for {category} is not lowercase")]
    NonLowercaseKeyword { category: Category, keyword: String },

    #[error("trigger '{trigger}' for {priority} is not lowercase")]
    NonLowercaseTrigger { priority: Priority, trigger: String },

    #[error("priority rules must be declared in ascending severity order")]
    UnorderedPriorities,
}

impl RuleSet {
    /// Validates internal consistency. Cheap; call when configuration is
    /// loaded.
    pub fn validate(&self) -> Result<(), RuleError> {
        let mut seen_categories: Vec<Category> = Vec::new();
        for rule in &self.categories {
            if rule.category == Category::Other {
                return Err(RuleError::FallbackCategoryRule);
            }
            if seen_categories.contains(&rule.category) {
                return Err(RuleError::DuplicateCategory(rule.category));
            }
            seen_categories.push(rule.category);

            for keyword in &rule.keywords {
                if keyword.trim().is_empty() {
                    return Err(RuleError::EmptyKeyword(rule.category));
                }
                if keyword.chars().any(|c| c.is_uppercase()) {
                    return Err(RuleError::NonLowercaseKeyword {
                        category: rule.category,
                        keyword: keyword.clone(),
                    });
                }
            }
        }

        let mut seen_priorities: Vec<Priority> = Vec::new();
        for rule in &self.priorities {
            if rule.priority == Priority::Medium {
                return Err(RuleError::DefaultPriorityRule);
            }
            if seen_priorities.contains(&rule.priority) {
                return Err(RuleError::DuplicatePriority(rule.priority));
            }
            seen_priorities.push(rule.priority);

            for trigger in &rule.triggers {
                if trigger.trim().is_empty() {
                    return Err(RuleError::EmptyTrigger(rule.priority));
                }
                if trigger.chars().any(|c| c.is_uppercase()) {
                    return Err(RuleError::NonLowercaseTrigger {
                        priority: rule.priority,
                        trigger: trigger.clone(),
                    });
                }
            }
        }

        if self
            .priorities
            .windows(2)
            .any(|pair| pair[0].priority >= pair[1].priority)
        {
            return Err(RuleError::UnorderedPriorities);
        }

        Ok(())
    }
}

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleSet {
    /// The reference keyword tables.
    ///
    /// Tuned so that common support phrasings land where a human triager
    /// would put them; see the crate tests for the anchored scenarios.
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryRule {
                    category: Category::AccountAccess,
                    keywords: keywords(&[
                        "login",
                        "password",
                        "account",
                        "locked out",
                        "sign in",
                        "unauthorized",
                        "credentials",
                        "reset",
                        "2fa",
                    ]),
                    boosts: PriorityBoosts::default(),
                },
                CategoryRule {
                    category: Category::TechnicalIssue,
                    keywords: keywords(&[
                        "error",
                        "crash",
                        "slow",
                        "performance",
                        "timeout",
                        "not working",
                        "unavailable",
                        "outage",
                    ]),
                    boosts: PriorityBoosts::default(),
                },
                CategoryRule {
                    category: Category::BillingQuestion,
                    keywords: keywords(&[
                        "billing",
                        "invoice",
                        "charge",
                        "payment",
                        "refund",
                        "subscription",
                        "pricing",
                        "overcharged",
                    ]),
                    boosts: PriorityBoosts::default(),
                },
                CategoryRule {
                    category: Category::FeatureRequest,
                    keywords: keywords(&[
                        "feature",
                        "request",
                        "enhancement",
                        "improvement",
                        "integration",
                        "would be nice",
                        "add support",
                    ]),
                    boosts: PriorityBoosts::default(),
                },
                CategoryRule {
                    category: Category::BugReport,
                    keywords: keywords(&[
                        "bug",
                        "broken",
                        "defect",
                        "glitch",
                        "doesn't work",
                        "does not work",
                        "incorrect",
                        "reproduce",
                    ]),
                    boosts: PriorityBoosts::default(),
                },
            ],
            priorities: vec![
                PriorityRule {
                    priority: Priority::Low,
                    triggers: keywords(&[
                        "minor",
                        "cosmetic",
                        "whenever",
                        "no rush",
                        "low priority",
                        "would be nice",
                        "nice to have",
                        "suggestion",
                    ]),
                },
                PriorityRule {
                    priority: Priority::High,
                    triggers: keywords(&[
                        "important",
                        "significant",
                        "failing",
                        "not working",
                        "degraded",
                        "high priority",
                        "blocked",
                    ]),
                },
                PriorityRule {
                    priority: Priority::Urgent,
                    triggers: keywords(&[
                        "urgent",
                        "critical",
                        "emergency",
                        "asap",
                        "immediately",
                        "locked out",
                        "cannot access",
                        "can't access",
                        "data loss",
                        "production down",
                    ]),
                },
            ],
        }
    }
}
