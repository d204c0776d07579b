//! Closed enumerations produced by classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Company category assigned to a speaker
///
/// - Builder: general contractors, construction firms doing the physical work
/// - Owner: organizations that own and commission built assets
/// - Partner: technology or service companies that integrate with us
/// - Competitor: companies selling overlapping products
/// - Other: everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Construction company doing the work
    Builder,

    /// Asset owner or developer
    Owner,

    /// Integration or channel partner
    Partner,

    /// Direct competitor
    Competitor,

    /// Not a target
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Builder,
        Category::Owner,
        Category::Partner,
        Category::Competitor,
        Category::Other,
    ];

    /// Get the category literal as written to output files
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Builder => "Builder",
            Category::Owner => "Owner",
            Category::Partner => "Partner",
            Category::Competitor => "Competitor",
            Category::Other => "Other",
        }
    }

    /// Parse a category, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "builder" => Some(Category::Builder),
            "owner" => Some(Category::Owner),
            "partner" => Some(Category::Partner),
            "competitor" => Some(Category::Competitor),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Whether speakers in this category are email targets (size permitting)
    pub fn is_target(&self) -> bool {
        matches!(self, Category::Builder | Category::Owner)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// Estimated company size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    /// Small or local business
    Small,

    /// Large, regional or national organization
    Large,

    /// Size could not be estimated
    Unknown,
}

impl CompanySize {
    /// Get the size literal
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Small => "Small",
            CompanySize::Large => "Large",
            CompanySize::Unknown => "Unknown",
        }
    }

    /// Parse a company size, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Some(CompanySize::Small),
            "large" => Some(CompanySize::Large),
            "unknown" => Some(CompanySize::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid company size: {}", s))
    }
}
