//! Task categories and their presentation descriptors.
//!
//! # Responsibility
//! - Define the fixed category enumeration shared by store and UI.
//! - Ship the category -> color/icon table consumed by renderers.
//!
//! # Invariants
//! - Every category maps to exactly one `CategoryStyle`.
//! - Wire values are lowercase and never renamed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Classification of a task's kind of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Assignment,
    Exam,
    Reading,
    Project,
    Lecture,
    Other,
}

/// Render hints for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Utility classes for badge background, text and border.
    pub color_class: &'static str,
    /// Icon identifier from the host icon set.
    pub icon: &'static str,
}

impl Category {
    /// All categories in picker order.
    pub const ALL: [Category; 6] = [
        Self::Assignment,
        Self::Exam,
        Self::Reading,
        Self::Project,
        Self::Lecture,
        Self::Other,
    ];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Exam => "exam",
            Self::Reading => "reading",
            Self::Project => "project",
            Self::Lecture => "lecture",
            Self::Other => "other",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Assignment => "Assignment",
            Self::Exam => "Exam",
            Self::Reading => "Reading",
            Self::Project => "Project",
            Self::Lecture => "Lecture",
            Self::Other => "Other",
        }
    }

    pub fn style(self) -> CategoryStyle {
        match self {
            Self::Assignment => CategoryStyle {
                color_class: "bg-blue-100 text-blue-800 border-blue-200",
                icon: "file-text",
            },
            Self::Exam => CategoryStyle {
                color_class: "bg-red-100 text-red-800 border-red-200",
                icon: "book-open",
            },
            Self::Reading => CategoryStyle {
                color_class: "bg-purple-100 text-purple-800 border-purple-200",
                icon: "book",
            },
            Self::Project => CategoryStyle {
                color_class: "bg-amber-100 text-amber-800 border-amber-200",
                icon: "folder",
            },
            Self::Lecture => CategoryStyle {
                color_class: "bg-emerald-100 text-emerald-800 border-emerald-200",
                icon: "presentation",
            },
            Self::Other => CategoryStyle {
                color_class: "bg-gray-100 text-gray-800 border-gray-200",
                icon: "circle",
            },
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseCategoryError(value.trim().to_string()))
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl Display for ParseCategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category `{}`; expected assignment|exam|reading|project|lecture|other",
            self.0
        )
    }
}

impl Error for ParseCategoryError {}
