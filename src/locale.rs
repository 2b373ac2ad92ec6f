//! Locales, date headers and the translation catalog.
//!
//! The catalog is a plain lookup table: labels are strings keyed by name and
//! each language may carry its own default category list. Missing labels fall
//! back to German and then to the key; a missing category list is reported
//! as `None` so the caller can supply its own defaults.

use crate::error::AppError;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

const FALLBACK_LANGUAGE: &str = "de";

const BUILTIN_TABLES: &[(&str, &str)] = &[
    ("de", include_str!("../locales/de.json")),
    ("en", include_str!("../locales/en.json")),
    ("fr", include_str!("../locales/fr.json")),
    ("es", include_str!("../locales/es.json")),
    ("it", include_str!("../locales/it.json")),
];

/// Used when the catalog has no category list for the active language nor
/// for the fallback language
pub const FALLBACK_CATEGORIES: &[&str] = &[
    "Ernährung & Gewicht",
    "Fitness & Physis",
    "Sozial- und Beziehungsleben",
    "Kreative Entfaltung, Kunst, Musik & Projekte",
    "Sauberkeit & Ordnung",
    "Finanzen",
];

// ============================================================================
// Locale
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    DeDe,
    EnUs,
    EnGb,
    FrFr,
    EsEs,
    ItIt,
}

pub const SUPPORTED_LOCALES: &[Locale] = &[
    Locale::DeDe,
    Locale::EnUs,
    Locale::EnGb,
    Locale::FrFr,
    Locale::EsEs,
    Locale::ItIt,
];

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::DeDe => "de-DE",
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::FrFr => "fr-FR",
            Locale::EsEs => "es-ES",
            Locale::ItIt => "it-IT",
        }
    }

    /// Language part of the tag, used to pick the translation table.
    pub fn language(self) -> &'static str {
        match self {
            Locale::DeDe => "de",
            Locale::EnUs | Locale::EnGb => "en",
            Locale::FrFr => "fr",
            Locale::EsEs => "es",
            Locale::ItIt => "it",
        }
    }

    fn chrono_locale(self) -> chrono::Locale {
        match self {
            Locale::DeDe => chrono::Locale::de_DE,
            Locale::EnUs => chrono::Locale::en_US,
            Locale::EnGb => chrono::Locale::en_GB,
            Locale::FrFr => chrono::Locale::fr_FR,
            Locale::EsEs => chrono::Locale::es_ES,
            Locale::ItIt => chrono::Locale::it_IT,
        }
    }

    fn date_pattern(self) -> &'static str {
        match self {
            Locale::DeDe => "%A %d.%m.%Y",
            Locale::EnUs => "%A %m/%d/%Y",
            _ => "%A %d/%m/%Y",
        }
    }

    /// Slot header: full weekday name followed by the numeric date.
    pub fn format_day(self, date: NaiveDate) -> String {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        midnight
            .format_localized(self.date_pattern(), self.chrono_locale())
            .to_string()
    }

    /// Short numeric date used on the front cover.
    pub fn format_short(self, date: NaiveDate) -> String {
        let pattern = match self {
            Locale::DeDe => "%d.%m.%Y",
            Locale::EnUs => "%m/%d/%Y",
            _ => "%d/%m/%Y",
        };
        date.format(pattern).to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    /// Accepts full tags in any case with `-` or `_`, or a bare language.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "de" | "de-de" => Ok(Locale::DeDe),
            "en" | "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "fr" | "fr-fr" => Ok(Locale::FrFr),
            "es" | "es-es" => Ok(Locale::EsEs),
            "it" | "it-it" => Ok(Locale::ItIt),
            _ => Err(AppError::LocaleError(format!(
                "{} (expected one of {})",
                value,
                SUPPORTED_LOCALES
                    .iter()
                    .map(|l| l.tag())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

// ============================================================================
// Translation Catalog
// ============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    default_categories: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    tables: HashMap<String, Translation>,
}

impl Catalog {
    /// Catalog with the translations bundled into the binary.
    pub fn builtin() -> Result<Self, AppError> {
        let mut tables = HashMap::new();
        for (language, source) in BUILTIN_TABLES {
            let table: Translation = serde_json::from_str(source).map_err(|e| {
                AppError::TranslationError(format!("built-in `{}` table: {}", language, e))
            })?;
            tables.insert((*language).to_string(), table);
        }
        Ok(Catalog { tables })
    }

    /// Parses an override file keyed by language (`{"de": {...}, "en": {...}}`).
    pub fn from_json(source: &str) -> Result<Self, AppError> {
        let tables: HashMap<String, Translation> = serde_json::from_str(source)
            .map_err(|e| AppError::TranslationError(format!("Invalid JSON: {}", e)))?;
        let tables = tables
            .into_iter()
            .map(|(language, table)| (language.to_ascii_lowercase(), table))
            .collect();
        Ok(Catalog { tables })
    }

    pub fn load(path: &str) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::TranslationError(format!("{}: {}", path, e)))?;
        Self::from_json(&content)
    }

    /// Layers `overrides` on top of this catalog. Labels are merged key by
    /// key; a category list in the override replaces the existing one.
    pub fn merged_with(mut self, overrides: Catalog) -> Self {
        for (language, table) in overrides.tables {
            let entry = self.tables.entry(language).or_default();
            entry.labels.extend(table.labels);
            if table.default_categories.is_some() {
                entry.default_categories = table.default_categories;
            }
        }
        self
    }

    pub fn label<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        [locale.language(), FALLBACK_LANGUAGE]
            .iter()
            .filter_map(|language| self.tables.get(*language))
            .find_map(|table| table.labels.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Default category labels for `locale`, if the catalog defines a usable
    /// (non-empty) list for that language.
    pub fn default_categories(&self, locale: Locale) -> Option<Vec<String>> {
        self.tables
            .get(locale.language())
            .and_then(|table| table.default_categories.clone())
            .filter(|categories| !categories.is_empty())
    }

    /// The locale's category list, else the fallback language's, else the
    /// built-in German list.
    pub fn categories_or_default(&self, locale: Locale) -> Vec<String> {
        self.default_categories(locale)
            .or_else(|| {
                log::debug!(
                    "event=categories_fallback locale={} fallback={}",
                    locale,
                    FALLBACK_LANGUAGE
                );
                self.tables
                    .get(FALLBACK_LANGUAGE)
                    .and_then(|table| table.default_categories.clone())
                    .filter(|categories| !categories.is_empty())
            })
            .unwrap_or_else(|| FALLBACK_CATEGORIES.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_tags_and_bare_languages() {
        assert_eq!("de-DE".parse::<Locale>().unwrap(), Locale::DeDe);
        assert_eq!("en_gb".parse::<Locale>().unwrap(), Locale::EnGb);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!(" it-IT ".parse::<Locale>().unwrap(), Locale::ItIt);
        assert!("pt-BR".parse::<Locale>().is_err());
    }

    #[test]
    fn display_round_trips_every_locale() {
        for locale in SUPPORTED_LOCALES {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), *locale);
        }
    }

    #[test]
    fn formats_day_headers_per_locale() {
        let day = date("2024-03-04");
        assert_eq!(Locale::DeDe.format_day(day), "Montag 04.03.2024");
        assert_eq!(Locale::EnUs.format_day(day), "Monday 03/04/2024");
        assert_eq!(Locale::EnGb.format_day(day), "Monday 04/03/2024");
    }

    #[test]
    fn short_dates_follow_locale_order() {
        let day = date("2024-12-25");
        assert_eq!(Locale::DeDe.format_short(day), "25.12.2024");
        assert_eq!(Locale::EnUs.format_short(day), "12/25/2024");
        assert_eq!(Locale::FrFr.format_short(day), "25/12/2024");
    }

    #[test]
    fn builtin_catalog_has_every_language() {
        let catalog = Catalog::builtin().unwrap();
        for locale in SUPPORTED_LOCALES {
            let categories = catalog.default_categories(*locale).unwrap();
            assert_eq!(categories.len(), 6, "{}", locale);
            assert_ne!(catalog.label(*locale, "total"), "total");
        }
        assert_eq!(catalog.label(Locale::DeDe, "rating"), "Bewertung");
        assert_eq!(catalog.label(Locale::EnGb, "rating"), "Rating");
    }

    #[test]
    fn missing_label_falls_back_to_german_then_key() {
        let catalog = Catalog::builtin()
            .unwrap()
            .merged_with(Catalog::from_json(r#"{"de": {"labels": {"custom": "Eigenes"}}}"#).unwrap());
        assert_eq!(catalog.label(Locale::FrFr, "custom"), "Eigenes");
        assert_eq!(catalog.label(Locale::EnUs, "custom"), "Eigenes");
        assert_eq!(catalog.label(Locale::FrFr, "no.such.key"), "no.such.key");
    }

    #[test]
    fn missing_categories_fall_back_to_german_table() {
        let catalog = Catalog::from_json(
            r#"{"de": {"defaultCategories": ["Schlaf"]}, "fr": {"labels": {"total": "Total"}}}"#,
        )
        .unwrap();
        assert_eq!(catalog.default_categories(Locale::FrFr), None);
        assert_eq!(catalog.categories_or_default(Locale::FrFr), vec!["Schlaf".to_string()]);
    }

    #[test]
    fn missing_categories_use_caller_default() {
        let catalog = Catalog::from_json(r#"{"fr": {"labels": {}}, "it": {"defaultCategories": []}}"#)
            .unwrap();
        assert_eq!(catalog.default_categories(Locale::FrFr), None);
        assert_eq!(catalog.default_categories(Locale::ItIt), None);
        assert_eq!(
            catalog.categories_or_default(Locale::EsEs),
            FALLBACK_CATEGORIES.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn overrides_replace_category_lists() {
        let overrides =
            Catalog::from_json(r#"{"DE": {"defaultCategories": ["Schlaf", "Lesen"]}}"#).unwrap();
        let catalog = Catalog::builtin().unwrap().merged_with(overrides);
        assert_eq!(
            catalog.default_categories(Locale::DeDe).unwrap(),
            vec!["Schlaf".to_string(), "Lesen".to_string()]
        );
        assert_eq!(catalog.label(Locale::DeDe, "total"), "Gesamt");
    }

    #[test]
    fn rejects_malformed_override_file() {
        assert!(matches!(
            Catalog::from_json("[1, 2, 3]"),
            Err(AppError::TranslationError(_))
        ));
    }
}
