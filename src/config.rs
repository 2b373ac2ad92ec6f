// journal-pdf: input boundary
//
// Every raw value coming from the command line passes through here before it
// reaches the pagination engine. Counts are bounded and silently reverted,
// dates are parsed, and the category list is held to its size limits.

use crate::error::AppError;
use crate::locale::{Catalog, Locale};
use crate::pagination::{
    days_between, days_for_pages, journal_days, pages_for_days, paginate, JournalDay, Sheet,
};
use ::image::DynamicImage;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::Read;
use std::ops::RangeInclusive;

// ============================================================================
// Constants
// ============================================================================

pub const DAY_BOUNDS: RangeInclusive<u32> = 1..=402;
pub const PAGE_BOUNDS: RangeInclusive<u32> = 0..=100;

pub const DEFAULT_PAGES: u32 = 5;
pub const DEFAULT_DAYS: u32 = days_for_pages(DEFAULT_PAGES);

pub const MIN_CATEGORIES: usize = 1;
pub const MAX_CATEGORIES: usize = 10;

/// Points available per category row
pub const POINTS_PER_CATEGORY: u32 = 10;

// ============================================================================
// Count Validation
// ============================================================================

/// Parses a raw day or page count.
///
/// Anything that is not a whole number inside `bounds` reverts to
/// `last_good`. This is the only place counts are validated.
pub fn sanitize_count(raw: &str, bounds: RangeInclusive<u32>, last_good: u32) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(value) if bounds.contains(&value) => value,
        _ => {
            warn!(
                "event=count_reverted raw={:?} min={} max={} value={}",
                raw,
                bounds.start(),
                bounds.end(),
                last_good
            );
            last_good
        }
    }
}

pub fn parse_date(date_str: Option<&str>) -> Result<NaiveDate, AppError> {
    match date_str {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::DateError(s.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

// ============================================================================
// Journal Mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Builds a range, rejecting an end date before the start date and spans
    /// longer than `DAY_BOUNDS` allows.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, AppError> {
        if let Some(end) = end {
            if end < start {
                return Err(AppError::ReversedRange {
                    start: start.format("%Y-%m-%d").to_string(),
                    end: end.format("%Y-%m-%d").to_string(),
                });
            }
            let days = days_between(start, end);
            if !DAY_BOUNDS.contains(&days) {
                return Err(AppError::RangeTooLong {
                    days,
                    max: *DAY_BOUNDS.end(),
                });
            }
        }
        Ok(DateRange { start, end })
    }

    /// Zero when no end date has been chosen yet.
    pub fn day_count(&self) -> u32 {
        self.end.map_or(0, |end| days_between(self.start, end))
    }
}

/// How the amount of journal is chosen: by dates, or by a plain count of
/// days or A4 pages. Count modes produce undated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    DateRange(DateRange),
    Days(u32),
    Pages(u32),
}

impl JournalMode {
    /// Picks the mode from raw CLI values. Explicit counts win over dates.
    pub fn resolve(
        start: NaiveDate,
        end: Option<NaiveDate>,
        days: Option<&str>,
        pages: Option<&str>,
    ) -> Result<Self, AppError> {
        if let Some(raw) = days {
            return Ok(JournalMode::Days(sanitize_count(raw, DAY_BOUNDS, DEFAULT_DAYS)));
        }
        if let Some(raw) = pages {
            return Ok(JournalMode::Pages(sanitize_count(raw, PAGE_BOUNDS, DEFAULT_PAGES)));
        }
        Ok(JournalMode::DateRange(DateRange::new(start, end)?))
    }

    pub fn day_count(&self) -> u32 {
        match self {
            JournalMode::DateRange(range) => range.day_count(),
            JournalMode::Days(days) => *days,
            JournalMode::Pages(pages) => days_for_pages(*pages),
        }
    }

    pub fn page_count(&self) -> u32 {
        match self {
            JournalMode::Pages(pages) => *pages,
            _ => pages_for_days(self.day_count()),
        }
    }

    /// First bound date, only in date-range mode.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            JournalMode::DateRange(range) => Some(range.start),
            _ => None,
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Entry in a category file: either a bare string or `{ "label": "..." }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Label(String),
    Object { label: String },
}

impl From<CategoryEntry> for String {
    fn from(entry: CategoryEntry) -> Self {
        match entry {
            CategoryEntry::Label(label) | CategoryEntry::Object { label } => label,
        }
    }
}

/// Ordered, user-editable category labels shown on every slot.
///
/// Labels need not be unique or non-blank. The length always stays within
/// `MIN_CATEGORIES..=MAX_CATEGORIES`; edits that would break that are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryList(Vec<String>);

impl CategoryList {
    pub fn try_from_labels(labels: Vec<String>) -> Result<Self, AppError> {
        if labels.len() < MIN_CATEGORIES || labels.len() > MAX_CATEGORIES {
            return Err(AppError::CategoryError(format!(
                "{} categories given, expected {} to {}",
                labels.len(),
                MIN_CATEGORIES,
                MAX_CATEGORIES
            )));
        }
        Ok(CategoryList(labels))
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.0.len() < MAX_CATEGORIES
    }

    pub fn can_remove(&self) -> bool {
        self.0.len() > MIN_CATEGORIES
    }

    /// Appends a label; returns `false` and leaves the list unchanged when full.
    pub fn push(&mut self, label: impl Into<String>) -> bool {
        if !self.can_add() {
            return false;
        }
        self.0.push(label.into());
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }

    pub fn rename(&mut self, index: usize, label: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = label.into();
                true
            }
            None => false,
        }
    }

    /// Maximum score across all rows, shown in each slot's footer
    pub fn total_points(&self) -> u32 {
        u32::try_from(self.0.len()).unwrap_or(u32::MAX) * POINTS_PER_CATEGORY
    }

    /// Reads a JSON array of labels (strings or `{ "label": ... }` objects).
    pub fn load_labels(path: &str) -> Result<Vec<String>, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::CategoryError(format!("{}: {}", path, e)))?;
        let entries: Vec<CategoryEntry> = serde_json::from_str(&content)
            .map_err(|e| AppError::CategoryError(format!("Invalid JSON: {}", e)))?;
        Ok(entries.into_iter().map(String::from).collect())
    }

    /// Combines labels from a file and from individual flags. With neither,
    /// the locale's default list from the catalog is used.
    pub fn resolve(
        file: Option<&str>,
        extra: Vec<String>,
        catalog: &Catalog,
        locale: Locale,
    ) -> Result<Self, AppError> {
        let mut labels = match file {
            Some(path) => Self::load_labels(path)?,
            None => Vec::new(),
        };
        labels.extend(extra);

        if labels.is_empty() {
            debug!("event=categories_default locale={}", locale);
            labels = catalog.categories_or_default(locale);
        }
        Self::try_from_labels(labels)
    }
}

// ============================================================================
// Cover Image
// ============================================================================

/// Loads an optional cover image from a file path or an http(s) URL.
pub fn load_cover_image(path: Option<&str>) -> Result<Option<DynamicImage>, AppError> {
    match path {
        Some(p) => {
            let image_bytes = if p.starts_with("http://") || p.starts_with("https://") {
                info!("event=cover_fetch url={}", p);
                let response = ureq::get(p)
                    .call()
                    .map_err(|e| AppError::ImageError(format!("Failed to fetch URL: {}", e)))?;

                let mut bytes = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut bytes)
                    .map_err(|e| AppError::ImageError(format!("Failed to read response: {}", e)))?;
                bytes
            } else {
                std::fs::read(p).map_err(|e| AppError::ImageError(format!("{}: {}", p, e)))?
            };

            let img = ::image::load_from_memory(&image_bytes)
                .map_err(|e| AppError::ImageError(format!("Failed to decode image: {}", e)))?;

            Ok(Some(img))
        }
        None => Ok(None),
    }
}

// ============================================================================
// Journal Configuration
// ============================================================================

/// Everything needed to lay out and draw one journal. Built once per run and
/// never mutated afterwards.
pub struct JournalConfig {
    pub mode: JournalMode,
    pub locale: Locale,
    pub categories: CategoryList,
    pub catalog: Catalog,
    pub journal_name: Option<String>,
    pub cover_image: Option<DynamicImage>,
    pub cut_guides: bool,
}

impl JournalConfig {
    pub fn day_count(&self) -> u32 {
        self.mode.day_count()
    }

    pub fn page_count(&self) -> u32 {
        self.mode.page_count()
    }

    pub fn days(&self) -> Vec<JournalDay> {
        journal_days(self.mode.start_date(), self.day_count())
    }

    /// Sheets to print, title sheet first.
    pub fn layout(&self) -> Vec<Sheet<JournalDay>> {
        paginate(self.days())
    }

    /// First and last printed date, when the journal is date bound.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let days = self.days();
        let first = days.first()?.date?;
        let last = days.last()?.date?;
        Some((first, last))
    }

    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.label(self.locale, key)
    }
}
