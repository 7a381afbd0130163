//! PA-API 5.0 locales: marketplace hosts and signing regions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplaces served by PA-API 5.0, each with its API host and AWS region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Nl,
    Se,
    Pl,
    Be,
    Tr,
    Ae,
    Sa,
    Eg,
    In,
    Ca,
    Mx,
    Br,
    Jp,
    Au,
    Sg,
}

impl Locale {
    /// Returns the Amazon retail domain for this locale.
    pub fn domain(&self) -> &'static str {
        match self {
            Locale::Us => "amazon.com",
            Locale::Uk => "amazon.co.uk",
            Locale::De => "amazon.de",
            Locale::Fr => "amazon.fr",
            Locale::Es => "amazon.es",
            Locale::It => "amazon.it",
            Locale::Nl => "amazon.nl",
            Locale::Se => "amazon.se",
            Locale::Pl => "amazon.pl",
            Locale::Be => "amazon.com.be",
            Locale::Tr => "amazon.com.tr",
            Locale::Ae => "amazon.ae",
            Locale::Sa => "amazon.sa",
            Locale::Eg => "amazon.eg",
            Locale::In => "amazon.in",
            Locale::Ca => "amazon.ca",
            Locale::Mx => "amazon.com.mx",
            Locale::Br => "amazon.com.br",
            Locale::Jp => "amazon.co.jp",
            Locale::Au => "amazon.com.au",
            Locale::Sg => "amazon.sg",
        }
    }

    /// Returns the PA-API host, e.g. `webservices.amazon.com`.
    pub fn host(&self) -> String {
        format!("webservices.{}", self.domain())
    }

    /// Returns the marketplace value sent in requests, e.g. `www.amazon.com`.
    pub fn marketplace(&self) -> String {
        format!("www.{}", self.domain())
    }

    /// Returns the AWS region used to sign requests for this locale.
    pub fn region(&self) -> &'static str {
        match self {
            Locale::Us | Locale::Ca | Locale::Mx | Locale::Br => "us-east-1",
            Locale::Jp | Locale::Au | Locale::Sg => "us-west-2",
            Locale::Uk
            | Locale::De
            | Locale::Fr
            | Locale::Es
            | Locale::It
            | Locale::Nl
            | Locale::Se
            | Locale::Pl
            | Locale::Be
            | Locale::Tr
            | Locale::Ae
            | Locale::Sa
            | Locale::Eg
            | Locale::In => "eu-west-1",
        }
    }

    /// Returns all supported locales.
    pub fn all() -> &'static [Locale] {
        &[
            Locale::Us,
            Locale::Uk,
            Locale::De,
            Locale::Fr,
            Locale::Es,
            Locale::It,
            Locale::Nl,
            Locale::Se,
            Locale::Pl,
            Locale::Be,
            Locale::Tr,
            Locale::Ae,
            Locale::Sa,
            Locale::Eg,
            Locale::In,
            Locale::Ca,
            Locale::Mx,
            Locale::Br,
            Locale::Jp,
            Locale::Au,
            Locale::Sg,
        ]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Locale::Us => "us",
            Locale::Uk => "uk",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Es => "es",
            Locale::It => "it",
            Locale::Nl => "nl",
            Locale::Se => "se",
            Locale::Pl => "pl",
            Locale::Be => "be",
            Locale::Tr => "tr",
            Locale::Ae => "ae",
            Locale::Sa => "sa",
            Locale::Eg => "eg",
            Locale::In => "in",
            Locale::Ca => "ca",
            Locale::Mx => "mx",
            Locale::Br => "br",
            Locale::Jp => "jp",
            Locale::Au => "au",
            Locale::Sg => "sg",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Locale::Us),
            "uk" | "gb" | "united kingdom" => Ok(Locale::Uk),
            "de" | "germany" => Ok(Locale::De),
            "fr" | "france" => Ok(Locale::Fr),
            "es" | "spain" => Ok(Locale::Es),
            "it" | "italy" => Ok(Locale::It),
            "nl" | "netherlands" => Ok(Locale::Nl),
            "se" | "sweden" => Ok(Locale::Se),
            "pl" | "poland" => Ok(Locale::Pl),
            "be" | "belgium" => Ok(Locale::Be),
            "tr" | "turkey" => Ok(Locale::Tr),
            "ae" | "uae" | "united arab emirates" => Ok(Locale::Ae),
            "sa" | "saudi arabia" => Ok(Locale::Sa),
            "eg" | "egypt" => Ok(Locale::Eg),
            "in" | "india" => Ok(Locale::In),
            "ca" | "canada" => Ok(Locale::Ca),
            "mx" | "mexico" => Ok(Locale::Mx),
            "br" | "brazil" => Ok(Locale::Br),
            "jp" | "japan" => Ok(Locale::Jp),
            "au" | "australia" => Ok(Locale::Au),
            "sg" | "singapore" => Ok(Locale::Sg),
            _ => Err(LocaleParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone)]
pub struct LocaleParseError(String);

impl fmt::Display for LocaleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<String> = Locale::all().iter().map(|l| l.to_string()).collect();
        write!(f, "Unknown locale '{}'. Valid locales: {}", self.0, valid.join(", "))
    }
}

impl std::error::Error for LocaleParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!(Locale::from_str("us").unwrap(), Locale::Us);
        assert_eq!(Locale::from_str("united states").unwrap(), Locale::Us);
        assert_eq!(Locale::from_str("gb").unwrap(), Locale::Uk);
        assert_eq!(Locale::from_str("germany").unwrap(), Locale::De);
        assert_eq!(Locale::from_str("uae").unwrap(), Locale::Ae);
        assert_eq!(Locale::from_str("singapore").unwrap(), Locale::Sg);

        // Case insensitive, surrounding whitespace ignored
        assert_eq!(Locale::from_str("JP").unwrap(), Locale::Jp);
        assert_eq!(Locale::from_str("  Brazil ").unwrap(), Locale::Br);

        assert!(Locale::from_str("invalid").is_err());
        assert!(Locale::from_str("").is_err());
    }

    #[test]
    fn test_locale_hosts() {
        assert_eq!(Locale::Us.host(), "webservices.amazon.com");
        assert_eq!(Locale::Uk.host(), "webservices.amazon.co.uk");
        assert_eq!(Locale::Jp.host(), "webservices.amazon.co.jp");
        assert_eq!(Locale::Tr.host(), "webservices.amazon.com.tr");
    }

    #[test]
    fn test_locale_marketplaces() {
        assert_eq!(Locale::Us.marketplace(), "www.amazon.com");
        assert_eq!(Locale::De.marketplace(), "www.amazon.de");
        assert_eq!(Locale::Au.marketplace(), "www.amazon.com.au");
    }

    #[test]
    fn test_locale_regions() {
        assert_eq!(Locale::Us.region(), "us-east-1");
        assert_eq!(Locale::Ca.region(), "us-east-1");
        assert_eq!(Locale::Br.region(), "us-east-1");
        assert_eq!(Locale::Uk.region(), "eu-west-1");
        assert_eq!(Locale::In.region(), "eu-west-1");
        assert_eq!(Locale::Ae.region(), "eu-west-1");
        assert_eq!(Locale::Jp.region(), "us-west-2");
        assert_eq!(Locale::Au.region(), "us-west-2");
        assert_eq!(Locale::Sg.region(), "us-west-2");
    }

    #[test]
    fn test_locale_display_roundtrip() {
        for locale in Locale::all() {
            let parsed: Locale = locale.to_string().parse().unwrap();
            assert_eq!(&parsed, locale);
        }
    }

    #[test]
    fn test_locale_all() {
        let all = Locale::all();
        assert_eq!(all.len(), 21);
        assert!(all.contains(&Locale::Us));
        assert!(all.contains(&Locale::Sg));
    }

    #[test]
    fn test_locale_parse_error_display() {
        let err = Locale::from_str("xyz").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("xyz"));
        assert!(msg.contains("Valid locales"));
        assert!(msg.contains("us, uk"));
    }

    #[test]
    fn test_locale_serde() {
        let json = serde_json::to_string(&Locale::Us).unwrap();
        assert_eq!(json, "\"us\"");

        let parsed: Locale = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Locale::Fr);
    }

    #[test]
    fn test_locale_deserializes_like_from_str() {
        let parsed: Locale = serde_json::from_str("\"Germany\"").unwrap();
        assert_eq!(parsed, Locale::De);
        let parsed: Locale = serde_json::from_str("\"UK\"").unwrap();
        assert_eq!(parsed, Locale::Uk);

        let err = serde_json::from_str::<Locale>("\"atlantis\"").unwrap_err();
        assert!(err.to_string().contains("Unknown locale 'atlantis'"));
    }
}
