//! Slot values attached to an intent once downstream logic extracts them.
//!
//! Extraction from free text happens elsewhere; this module only owns the
//! normalization contract applied to an already-populated [`Slots`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task priority after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    /// Lenient parse: case-insensitive and exact otherwise, anything
    /// unrecognised (including padded labels) is `Normal`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slots extracted for a task-like intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slots {
    pub title: String,
    /// `YYYY-MM-DD`, or absent.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Free-form until [`Slots::normalize`] runs; then one of low|normal|high.
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_priority() -> String {
    Priority::Normal.as_str().to_string()
}

fn default_locale() -> String {
    "zh".to_string()
}

impl Slots {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            priority: default_priority(),
            project_id: None,
            locale: default_locale(),
        }
    }

    /// Collapse priority to low|normal|high and drop a malformed due date.
    pub fn normalize(&mut self) -> &mut Self {
        self.priority = Priority::from_label(&self.priority).as_str().to_string();
        if self
            .due_date
            .as_deref()
            .is_some_and(|d| !is_iso_date(d))
        {
            self.due_date = None;
        }
        self
    }

    /// Typed view of the priority field.
    pub fn priority_level(&self) -> Priority {
        Priority::from_label(&self.priority)
    }
}

/// Shape check only: four digits, dash, two digits, dash, two digits.
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// An intent decision together with its extracted slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCandidate {
    pub intent: String,
    pub confidence: f32,
    pub slots: Slots,
    pub raw_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_shape() {
        assert!(is_iso_date("2025-01-31"));
        assert!(is_iso_date("2025-13-99"));
        assert!(!is_iso_date("2025-1-31"));
        assert!(!is_iso_date("2025/01/31"));
        assert!(!is_iso_date("2025-01-31T00:00"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn priority_from_label() {
        assert_eq!(Priority::from_label("HIGH"), Priority::High);
        assert_eq!(Priority::from_label("Low"), Priority::Low);
        // Surrounding whitespace is not stripped
        assert_eq!(Priority::from_label(" low "), Priority::Normal);
        assert_eq!(Priority::from_label("urgent"), Priority::Normal);
        assert_eq!(Priority::from_label(""), Priority::Normal);
    }
}
