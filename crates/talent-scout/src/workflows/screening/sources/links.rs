use std::sync::OnceLock;

use regex::Regex;

const CANONICAL_PREFIX: &str = "https://linkedin.com/in/";

/// Link prefixes on a GitHub profile that never point at the candidate's
/// own presence elsewhere.
const CODE_HOST_PREFIXES: [&str; 3] = [
    "https://github.com",
    "https://docs.github.com",
    "https://support.github.com",
];

/// Profile link forms, strongest first.
fn patterns() -> &'static [Regex; 4] {
    static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)https?://(?:www\.)?linkedin\.com/in/([a-z0-9\-_%]+)/?",
            r"(?i)linkedin\.com/in/([a-z0-9\-_%]+)/?",
            r"(?i)in/([a-z0-9\-_%]+)/?",
            r"(?i)@([a-z0-9\-_%]+)",
        ]
        .map(|pattern| Regex::new(pattern).expect("static link pattern compiles"))
    })
}

/// Finds a LinkedIn profile reference in free text and returns it as
/// `https://linkedin.com/in/<handle>`.
///
/// Each pattern is tried over the whole text before falling back to the next,
/// so a full URL anywhere wins over an `@handle` that appears earlier.
pub fn discover_linkedin_url(text: &str) -> Option<String> {
    patterns().iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|handle| canonical_profile_url(handle.as_str()))
    })
}

pub(crate) fn canonical_profile_url(handle: &str) -> String {
    format!("{CANONICAL_PREFIX}{}", handle.trim_end_matches('/'))
}

/// True for links that point back into GitHub itself.
pub fn is_code_host_link(href: &str) -> bool {
    CODE_HOST_PREFIXES
        .iter()
        .any(|prefix| href.starts_with(prefix))
}
