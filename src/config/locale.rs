//! ECS marketplaces and their service hosts.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The marketplace a request is sent to.
///
/// # Example
///
/// ```rust
/// use ecs_api::Locale;
///
/// let locale: Locale = "jp".parse().unwrap();
/// assert_eq!(locale, Locale::Jp);
/// assert_eq!(locale.host(), "webservices.amazon.co.jp");
/// assert_eq!(Locale::default().to_string(), "us");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// United States.
    #[default]
    Us,
    /// United Kingdom.
    Uk,
    /// Germany.
    De,
    /// Japan.
    Jp,
    /// France.
    Fr,
    /// Canada.
    Ca,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 6] = [Self::Us, Self::Uk, Self::De, Self::Jp, Self::Fr, Self::Ca];

    /// Returns the service host for this marketplace.
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Us => "webservices.amazon.com",
            Self::Uk => "webservices.amazon.co.uk",
            Self::De => "webservices.amazon.de",
            Self::Jp => "webservices.amazon.co.jp",
            Self::Fr => "webservices.amazon.fr",
            Self::Ca => "webservices.amazon.ca",
        }
    }

    /// Returns the two-letter locale code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Uk => "uk",
            Self::De => "de",
            Self::Jp => "jp",
            Self::Fr => "fr",
            Self::Ca => "ca",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == code)
            .ok_or(ConfigError::BadLocale { locale: code })
    }
}
