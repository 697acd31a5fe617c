// src/models/filter.rs

//! Request filters accepted by the listing operations.
//!
//! All of these parse from user-facing strings and reject anything they do
//! not recognize, so invalid input never reaches the network.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Completion-status filter for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Ongoing,
    Completed,
}

impl StatusFilter {
    /// Code the site expects in the `status` query parameter.
    pub fn code(self) -> i8 {
        match self {
            StatusFilter::All => -1,
            StatusFilter::Ongoing => 1,
            StatusFilter::Completed => 2,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "ongoing" | "updating" => Ok(StatusFilter::Ongoing),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(AppError::invalid_filter("status", s)),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Ongoing => "ongoing",
            StatusFilter::Completed => "completed",
        })
    }
}

/// Ranking used by the top-comics listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopCategory {
    All,
    Monthly,
    Weekly,
    Daily,
    Follow,
    Comment,
    Chapter,
}

impl TopCategory {
    /// Value of the site's `sort` query parameter.
    pub fn sort_code(self) -> u8 {
        match self {
            TopCategory::All => 10,
            TopCategory::Monthly => 11,
            TopCategory::Weekly => 12,
            TopCategory::Daily => 13,
            TopCategory::Follow => 20,
            TopCategory::Comment => 25,
            TopCategory::Chapter => 30,
        }
    }
}

impl FromStr for TopCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TopCategory::All),
            "monthly" => Ok(TopCategory::Monthly),
            "weekly" => Ok(TopCategory::Weekly),
            "daily" => Ok(TopCategory::Daily),
            "follow" => Ok(TopCategory::Follow),
            "comment" => Ok(TopCategory::Comment),
            "chapter" => Ok(TopCategory::Chapter),
            _ => Err(AppError::invalid_filter("top category", s)),
        }
    }
}

/// Carousel flavour for recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendKind {
    #[default]
    Hot,
    Boy,
    Girl,
}

impl RecommendKind {
    pub fn path(self) -> &'static str {
        match self {
            RecommendKind::Hot => "hot",
            RecommendKind::Boy => "truyen-con-trai",
            RecommendKind::Girl => "truyen-con-gai",
        }
    }
}

impl FromStr for RecommendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Ok(RecommendKind::Hot),
            "boy" => Ok(RecommendKind::Boy),
            "girl" => Ok(RecommendKind::Girl),
            _ => Err(AppError::invalid_filter("recommendation type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!("all".parse::<StatusFilter>().unwrap().code(), -1);
        assert_eq!("updating".parse::<StatusFilter>().unwrap().code(), 1);
        assert_eq!("ongoing".parse::<StatusFilter>().unwrap().code(), 1);
        assert_eq!("Completed".parse::<StatusFilter>().unwrap().code(), 2);
    }

    #[test]
    fn test_status_rejects_unknown() {
        let err = "paused".parse::<StatusFilter>().unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_top_category_codes() {
        assert_eq!("daily".parse::<TopCategory>().unwrap().sort_code(), 13);
        assert_eq!("chapter".parse::<TopCategory>().unwrap().sort_code(), 30);
        assert!("yearly".parse::<TopCategory>().is_err());
    }
}
