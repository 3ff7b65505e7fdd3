//! Translation of UI labels
//!
//! Components never look labels up globally; they receive a [`Translate`]
//! implementation from the app.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// Label lookup injected into components
pub trait Translate {
    /// Translate `key`; unknown keys are returned unchanged
    fn translate(&self, key: &str) -> String;

    /// Translate `key` and substitute `%{name}` placeholders
    fn translate_with(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut text = self.translate(key);
        for (name, value) in args {
            text = text.replace(&format!("%{{{}}}", name), value);
        }
        text
    }

    /// Format a stored timestamp as a local date
    fn format_date(&self, raw: &str) -> String {
        raw.to_string()
    }
}

const EN: &[(&str, &str)] = &[
    ("ra.navigation.prev", "Prev"),
    ("ra.navigation.next", "Next"),
    ("ra.navigation.page_info", "Page %{page} of %{count}"),
    ("ra.navigation.no_results", "No results found"),
    ("ra.page.loading", "Loading..."),
    ("ra.action.export", "Export"),
    ("ra.action.show", "Show"),
    ("comment.list.about", "About"),
    ("resources.comments.name", "Comments"),
    ("resources.comments.empty", "No comments found"),
    ("resources.comments.invite", "It looks like your comment list is empty."),
];

const FR: &[(&str, &str)] = &[
    ("ra.navigation.prev", "Précédent"),
    ("ra.navigation.next", "Suivant"),
    ("ra.navigation.page_info", "Page %{page} sur %{count}"),
    ("ra.navigation.no_results", "Aucun résultat"),
    ("ra.page.loading", "Chargement..."),
    ("ra.action.export", "Exporter"),
    ("ra.action.show", "Afficher"),
    ("comment.list.about", "Au sujet de"),
    ("resources.comments.name", "Commentaires"),
    ("resources.comments.empty", "Aucun commentaire"),
    ("resources.comments.invite", "La liste des commentaires est vide."),
];

/// Catalog-backed translator for one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn catalog(&self) -> &'static [(&'static str, &'static str)] {
        match self.locale {
            Locale::En => EN,
            Locale::Fr => FR,
        }
    }
}

impl Translate for Translator {
    fn translate(&self, key: &str) -> String {
        self.catalog()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    fn format_date(&self, raw: &str) -> String {
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

        match date {
            Ok(date) => match self.locale {
                Locale::En => date.format("%-m/%-d/%Y").to_string(),
                Locale::Fr => date.format("%d/%m/%Y").to_string(),
            },
            Err(_) => raw.to_string(),
        }
    }
}
