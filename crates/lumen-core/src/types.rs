use serde::{Deserialize, Serialize};

/// Severity of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Warning
    }
}

/// One detected accessibility or style problem.
///
/// Issues own all their strings; they never reference back into the
/// document tree they were produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub recommendation: String,
}

impl Issue {
    pub fn error(
        category: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Issue {
            severity: Severity::Error,
            category: category.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    pub fn warning(
        category: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Issue {
            severity: Severity::Warning,
            category: category.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// A user-defined audit rule: CSS selector + condition + message.
///
/// The `condition` field holds the raw DSL string as submitted; the audit
/// engine parses it into a typed form at registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRule {
    pub name: String,
    pub description: String,
    pub selector: String,
    pub condition: String,
    pub message: String,
    pub recommendation: String,
    #[serde(default)]
    pub severity: Severity,
}

/// Merged results of auditing one document.
///
/// `accessibility` holds the structural battery output followed by custom
/// rule output, in declaration/registration order. `styles` holds the
/// palette, background, button, and contrast output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub accessibility: Vec<Issue>,
    pub styles: Vec<Issue>,
}

impl DocumentReport {
    pub fn error_count(&self) -> usize {
        self.all_issues()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.accessibility.iter().chain(self.styles.iter())
    }
}

/// The success-or-failure result of analyzing one URL.
///
/// Success and failure are mutually exclusive: issue lists are empty and
/// `error_message` is populated on failure; `error_message` is `None` on
/// success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub url: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessibility: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Issue>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AnalysisOutcome {
    /// Build a successful outcome from a document report.
    pub fn from_report(url: impl Into<String>, report: DocumentReport) -> Self {
        AnalysisOutcome {
            url: url.into(),
            success: true,
            accessibility: report.accessibility,
            colors: report.styles,
            error_message: None,
        }
    }

    /// Build a failed outcome carrying the original error message verbatim.
    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisOutcome {
            url: url.into(),
            success: false,
            accessibility: Vec::new(),
            colors: Vec::new(),
            error_message: Some(message.into()),
        }
    }

    /// All issues across both lists, accessibility first.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.accessibility.iter().chain(self.colors.iter())
    }
}

/// Errors that can occur during auditing, rule management, or persistence.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    #[error("Rule `{rule}` has an invalid selector: {reason}")]
    InvalidSelector { rule: String, reason: String },

    #[error("Rule `{rule}` has an invalid condition: {reason}")]
    InvalidCondition { rule: String, reason: String },

    #[error("A rule named `{0}` already exists")]
    DuplicateRuleName(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to fetch URL content: {0}")]
    Fetch(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for AuditError {
    fn from(e: rusqlite::Error) -> Self {
        AuditError::Database(e.to_string())
    }
}
