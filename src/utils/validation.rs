use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

static WIKIPEDIA_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([a-z]{2,3}\.)?wikipedia\.org/wiki/.+").expect("valid wikipedia url pattern")
});

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Accepts `https://` article links on wikipedia.org, with an optional
/// two- or three-letter language subdomain. No network access.
pub fn is_valid_wikipedia_url(url: &str) -> bool {
    WIKIPEDIA_URL.is_match(url)
}
