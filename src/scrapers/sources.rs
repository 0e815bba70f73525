//! The fixed registry of named news sources.
//!
//! The set of sources is closed: [`NewsSource`] has one variant per outlet and
//! [`SourceRegistry`] maps each to its homepage. The built-in registry is
//! constructed once on first use and never mutated.

use crate::error::UnknownSource;
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A news outlet offered in the "top articles" selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NewsSource {
    #[default]
    IndianExpress,
    RoundTableIndia,
    TimesOfIndia,
    IndiaToday,
}

impl NewsSource {
    /// All sources, in the order the selector lists them.
    pub const ALL: [NewsSource; 4] = [
        NewsSource::IndianExpress,
        NewsSource::RoundTableIndia,
        NewsSource::TimesOfIndia,
        NewsSource::IndiaToday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NewsSource::IndianExpress => "Indian Express",
            NewsSource::RoundTableIndia => "Round Table India",
            NewsSource::TimesOfIndia => "Times of India",
            NewsSource::IndiaToday => "India Today",
        }
    }

    fn default_homepage(&self) -> &'static str {
        match self {
            NewsSource::IndianExpress => "https://indianexpress.com/",
            NewsSource::RoundTableIndia => {
                "https://www.roundtableindia.co.in/category/perspective/gender/"
            }
            NewsSource::TimesOfIndia => "https://timesofindia.indiatimes.com/",
            NewsSource::IndiaToday => "https://www.indiatoday.in/",
        }
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NewsSource {
    type Err = UnknownSource;

    /// Match a display name exactly, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NewsSource::ALL
            .into_iter()
            .find(|source| source.name() == wanted)
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// Mapping from each [`NewsSource`] to the homepage crawled for its articles.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    homepages: HashMap<NewsSource, Url>,
}

static BUILTIN: Lazy<SourceRegistry> = Lazy::new(|| SourceRegistry {
    homepages: NewsSource::ALL
        .into_iter()
        .filter_map(|source| {
            Url::parse(source.default_homepage())
                .ok()
                .map(|url| (source, url))
        })
        .collect(),
});

impl SourceRegistry {
    /// The process-wide registry of the four built-in outlets.
    pub fn builtin() -> &'static SourceRegistry {
        &BUILTIN
    }

    /// Build a registry pointing sources at other homepages.
    #[cfg(test)]
    pub fn from_entries(entries: impl IntoIterator<Item = (NewsSource, Url)>) -> Self {
        Self {
            homepages: entries.into_iter().collect(),
        }
    }

    pub fn homepage(&self, source: NewsSource) -> Option<&Url> {
        self.homepages.get(&source)
    }

    /// Resolve a display name to its source and homepage.
    ///
    /// Unrecognized names yield `None`; callers treat that the same as a
    /// source with no articles.
    pub fn lookup(&self, name: &str) -> Option<(NewsSource, &Url)> {
        let source = name.parse::<NewsSource>().ok()?;
        self.homepage(source).map(|url| (source, url))
    }

    /// Entries in selector order.
    pub fn entries(&self) -> Vec<(NewsSource, &Url)> {
        NewsSource::ALL
            .into_iter()
            .filter_map(|s| self.homepage(s).map(|u| (s, u)))
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_exactly_four_sources() {
        let registry = SourceRegistry::builtin();
        assert_eq!(registry.entries().len(), 4);
    }

    #[test]
    fn test_builtin_homepages() {
        let registry = SourceRegistry::builtin();
        assert_eq!(
            registry.homepage(NewsSource::IndiaToday).unwrap().as_str(),
            "https://www.indiatoday.in/"
        );
        assert_eq!(
            registry.homepage(NewsSource::IndianExpress).unwrap().as_str(),
            "https://indianexpress.com/"
        );
        assert_eq!(
            registry.homepage(NewsSource::TimesOfIndia).unwrap().as_str(),
            "https://timesofindia.indiatimes.com/"
        );
        assert_eq!(
            registry.homepage(NewsSource::RoundTableIndia).unwrap().as_str(),
            "https://www.roundtableindia.co.in/category/perspective/gender/"
        );
    }

    #[test]
    fn test_lookup_by_display_name() {
        let registry = SourceRegistry::builtin();
        let (source, _) = registry.lookup("Round Table India").unwrap();
        assert_eq!(source, NewsSource::RoundTableIndia);
        assert!(registry.lookup("Round Table India ").is_some());
        assert!(registry.lookup("The Hindu").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for source in NewsSource::ALL {
            assert_eq!(source.name().parse::<NewsSource>(), Ok(source));
        }
        assert_eq!(
            "india today".parse::<NewsSource>(),
            Err(UnknownSource("india today".to_string()))
        );
        let err = "Daily Planet".parse::<NewsSource>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown news source: "Daily Planet""#);
    }
}
