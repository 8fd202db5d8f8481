//! Format validators for email addresses and phone numbers.
//!
//! Both checks are shape-only: they say nothing about whether an address
//! exists or a number is assigned.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("invalid regex")
});

/// Characters removed from a phone number before matching.
static PHONE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("invalid regex"));

static PHONE_CN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("invalid regex"));

static PHONE_US: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").expect("invalid regex"));

/// Country whose phone numbering plan [`validate_phone`] checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    /// China: 11-digit mobile numbers, `1` followed by `3`-`9`.
    #[default]
    Cn,
    /// United States: 10 digits.
    Us,
}

impl Country {
    /// Resolve a two-letter country code.
    ///
    /// Only the exact codes `"CN"` and `"US"` are recognised; anything else
    /// falls back to [`Country::Cn`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "CN" => Self::Cn,
            "US" => Self::Us,
            other => {
                debug!(code = other, "unknown country code, falling back to CN");
                Self::Cn
            }
        }
    }

    /// The two-letter code for this country.
    pub fn code(self) -> &'static str {
        match self {
            Self::Cn => "CN",
            Self::Us => "US",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Cn => &PHONE_CN,
            Self::Us => &PHONE_US,
        }
    }
}

impl FromStr for Country {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Check that `email` has the shape `local@domain.tld`.
///
/// The local part allows ASCII letters, digits and `._%+-`; the domain allows
/// letters, digits, `.` and `-`, and must end in a dot followed by at least
/// two ASCII letters.
///
/// # Examples
///
/// ```
/// use dataproc_core::validate_email;
///
/// assert!(validate_email("user@example.com"));
/// assert!(!validate_email("invalid-email"));
/// ```
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check that `phone` is a well-formed number for `country`.
///
/// Whitespace, hyphens and parentheses are stripped first, so
/// `"(555) 123-4567"` is checked as `"5551234567"`.
///
/// # Examples
///
/// ```
/// use dataproc_core::{validate_phone, Country};
///
/// assert!(validate_phone("13812345678", Country::Cn));
/// assert!(validate_phone("138-1234-5678", Country::Cn));
/// assert!(!validate_phone("12812345678", Country::Cn));
/// assert!(validate_phone("(555) 123-4567", Country::Us));
/// ```
pub fn validate_phone(phone: &str, country: Country) -> bool {
    let cleaned = PHONE_NOISE.replace_all(phone, "");
    country.pattern().is_match(&cleaned)
}
