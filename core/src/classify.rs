// Issue classification by keyword lookup
//
// Table order is load-bearing: a description matching keywords from two
// categories is assigned to whichever category appears first.

use serde::{Deserialize, Serialize};

/// Closed set of root-cause labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    Network,
    Billing,
    #[serde(rename = "App/Device")]
    AppDevice,
    Support,
    Other,
}

impl IssueCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Network => "Network",
            IssueCategory::Billing => "Billing",
            IssueCategory::AppDevice => "App/Device",
            IssueCategory::Support => "Support",
            IssueCategory::Other => "Other",
        }
    }
}

/// Ordered category table; first keyword hit wins.
const KEYWORD_TABLE: &[(IssueCategory, &[&str])] = &[
    (
        IssueCategory::Network,
        &[
            "signal",
            "disconnect",
            "outage",
            "coverage",
            "5g",
            "data speed",
            "no service",
            "zero bars",
        ],
    ),
    (
        IssueCategory::Billing,
        &[
            "bill",
            "charged",
            "refund",
            "payment",
            "fee",
            "trade-in",
            "credit",
            "compensation",
        ],
    ),
    (
        IssueCategory::AppDevice,
        &[
            "app", "crash", "update", "esim", "phone", "tablet", "voicemail", "setup",
        ],
    ),
    (
        IssueCategory::Support,
        &[
            "help",
            "service",
            "resolution",
            "agent",
            "compliment",
            "empathetic",
            "professional",
        ],
    ),
];

/// Maps free-text descriptions to exactly one issue category.
#[derive(Debug, Default, Clone)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Lower-cases the text and returns the first category whose keyword
    /// list has a substring match, or `Other` when nothing matches.
    pub fn classify(&self, text: &str) -> IssueCategory {
        let lower = text.to_lowercase();
        for (category, keywords) in KEYWORD_TABLE {
            if keywords.iter().any(|word| lower.contains(word)) {
                return *category;
            }
        }
        IssueCategory::Other
    }
}
