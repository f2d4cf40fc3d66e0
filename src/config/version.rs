//! ECS API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// ECS API version, sent as the `Version` query argument.
///
/// Known WSDL releases have their own variants; any other `YYYY-MM-DD` date
/// is accepted as [`ApiVersion::Custom`].
///
/// # Example
///
/// ```rust
/// use ecs_api::ApiVersion;
///
/// assert_eq!(ApiVersion::latest(), ApiVersion::V2007_04_04);
///
/// let version: ApiVersion = "2005-10-05".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2005_10_05);
/// assert_eq!(version.to_string(), "2005-10-05");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2005-10-05
    V2005_10_05,
    /// API version 2006-09-11
    V2006_09_11,
    /// API version 2007-01-15
    V2007_01_15,
    /// API version 2007-04-04
    V2007_04_04,
    /// Any other release date.
    Custom(String),
}

impl ApiVersion {
    /// Returns the most recent known version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2007_04_04
    }

    /// Returns `true` for the named releases.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2005_10_05 => "2005-10-05",
            Self::V2006_09_11 => "2006-09-11",
            Self::V2007_01_15 => "2007-01-15",
            Self::V2007_04_04 => "2007-04-04",
            Self::Custom(version) => version,
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return false;
        };

        let numeric = |part: &str, len: usize| {
            part.len() == len && part.chars().all(|c| c.is_ascii_digit())
        };
        if !numeric(*year, 4) || !numeric(*month, 2) || !numeric(*day, 2) {
            return false;
        }

        matches!(month.parse::<u8>(), Ok(1..=12)) && matches!(day.parse::<u8>(), Ok(1..=31))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s {
            "2005-10-05" => Ok(Self::V2005_10_05),
            "2006-09-11" => Ok(Self::V2006_09_11),
            "2007-01-15" => Ok(Self::V2007_01_15),
            "2007-04-04" => Ok(Self::V2007_04_04),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!(
            "2005-10-05".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2005_10_05
        );
        assert_eq!(
            "2007-04-04".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2007_04_04
        );
    }

    #[test]
    fn test_api_version_parses_other_dates_as_custom() {
        let version: ApiVersion = "2008-08-19".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2008-08-19".to_string()));
        assert!(!version.is_known());
        assert_eq!(version.to_string(), "2008-08-19");
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("2007-04".parse::<ApiVersion>().is_err());
        assert!("2007-13-01".parse::<ApiVersion>().is_err());
        assert!("2007-04-4".parse::<ApiVersion>().is_err());
        assert!(matches!(
            "07-04-04".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { version }) if version == "07-04-04"
        ));
    }

    #[test]
    fn test_default_is_latest() {
        assert_eq!(ApiVersion::default(), ApiVersion::latest());
        assert!(ApiVersion::latest().is_known());
    }
}
