//! Closed enumerations for ticket classification and lifecycle state.
//!
//! These were string unions in earlier iterations of the system; they are
//! enums here so the compiler enforces the closed sets everywhere they are
//! matched. Wire names are the snake_case variant names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value outside one of the closed sets was encountered while parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    /// Which closed set was being parsed ("category", "priority", "status").
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Ticket classification category.
///
/// `Other` is the guaranteed fallback: the engine assigns it whenever no
/// category keyword matches, so it never carries scoring keywords itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AccountAccess,
    TechnicalIssue,
    BillingQuestion,
    FeatureRequest,
    BugReport,
    Other,
}

impl Category {
    /// Every category, in wire order.
    pub const ALL: [Category; 6] = [
        Category::AccountAccess,
        Category::TechnicalIssue,
        Category::BillingQuestion,
        Category::FeatureRequest,
        Category::BugReport,
        Category::Other,
    ];

    /// Wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::AccountAccess => "account_access",
            Category::TechnicalIssue => "technical_issue",
            Category::BillingQuestion => "billing_question",
            Category::FeatureRequest => "feature_request",
            Category::BugReport => "bug_report",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account_access" => Ok(Category::AccountAccess),
            "technical_issue" => Ok(Category::TechnicalIssue),
            "billing_question" => Ok(Category::BillingQuestion),
            "feature_request" => Ok(Category::FeatureRequest),
            "bug_report" => Ok(Category::BugReport),
            "other" => Ok(Category::Other),
            other => Err(UnknownVariant::new("category", other)),
        }
    }
}

/// Ticket urgency level, ordered from lowest to highest severity.
///
/// The derived `Ord` follows declaration order, so `Priority::Low <
/// Priority::Urgent` holds and "highest severity wins" comparisons can use
/// plain `max`. `Medium` is the guaranteed fallback and carries no trigger
/// keywords in any rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Every priority, in ascending severity order.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Wire name of this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(UnknownVariant::new("priority", other)),
        }
    }
}

/// Ticket lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    /// Wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(UnknownVariant::new("status", other)),
        }
    }
}
