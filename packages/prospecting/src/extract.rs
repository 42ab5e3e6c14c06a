//! Heuristic text extraction from search-result titles and snippets.
//!
//! Everything here is a pure, total function: malformed input yields
//! "no information" (`None` / empty) rather than an error, because the
//! caller always has a sensible default. No I/O, no state.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::Language;

fn slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"linkedin\.com/in/([^/?#]+)").unwrap())
}

fn brand_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*[|–—]\s*LinkedIn\s*$").unwrap())
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*[-–—]\s*").unwrap())
}

fn ellipsis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\.{2,}\s*$").unwrap())
}

fn hex_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9a-f]{5,}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap())
}

/// Extract the canonical profile slug from a URL.
///
/// Returns `None` when the URL does not match the expected
/// `linkedin.com/in/<slug>` path shape.
pub fn parse_profile_slug(url: &str) -> Option<String> {
    slug_re()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

/// Remove trailing ellipsis left by search-engine title truncation.
fn clean_truncated(text: &str) -> Option<String> {
    let cleaned = ellipsis_re().replace(text, "");
    let cleaned = cleaned.trim_end_matches('…').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Identity fields parsed from a search-result title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTitle {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub organization: Option<String>,
}

/// Parse a search-result title into (name, job title, organization).
///
/// Typical shape: `"John Doe - Chief of Pathology - Hospital XYZ | LinkedIn"`.
/// The trailing brand suffix is stripped, then the title is split on
/// hyphen/en-dash/em-dash. With more than three segments the interior
/// ones are rejoined as the job title (titles legitimately contain
/// separators, e.g. "Senior Director - Oncology") and the last segment
/// is the organization.
pub fn parse_result_title(title: &str) -> ParsedTitle {
    if title.is_empty() {
        return ParsedTitle::default();
    }

    let stripped = brand_suffix_re().replace(title, "");
    let parts: Vec<&str> = separator_re()
        .split(&stripped)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut parsed = ParsedTitle {
        name: parts.first().and_then(|p| clean_truncated(p)),
        job_title: parts.get(1).and_then(|p| clean_truncated(p)),
        organization: parts.get(2).and_then(|p| clean_truncated(p)),
    };

    if parts.len() > 3 {
        parsed.job_title = clean_truncated(&parts[1..parts.len() - 1].join(" - "));
        parsed.organization = parts.last().and_then(|p| clean_truncated(p));
    }

    parsed
}

/// Infer a human name from a profile URL slug.
///
/// Splits on hyphens, drops purely-numeric and hex-looking tokens
/// (provider-generated id suffixes like `3f9a21`), capitalizes the rest.
/// Degrades to the raw slug when every token is filtered out.
pub fn infer_name_from_slug(slug: &str) -> String {
    let name_parts: Vec<String> = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .filter(|part| !hex_token_re().is_match(part))
        .filter(|part| !part.chars().all(|c| c.is_ascii_digit()))
        .map(capitalize)
        .collect();

    if name_parts.is_empty() {
        slug.to_string()
    } else {
        name_parts.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Geography keywords matched against the originating query.
/// Multi-word keywords first so the longest match wins.
const GEO_KEYWORDS: &[(&str, &str)] = &[
    ("south africa", "South Africa"),
    ("west africa", "West Africa"),
    ("latin america", "Latin America"),
    ("costa rica", "Costa Rica"),
    ("latam", "Latin America"),
    ("argentina", "Argentina"),
    ("brazil", "Brazil"),
    ("brasil", "Brazil"),
    ("nigeria", "Nigeria"),
    ("paraguay", "Paraguay"),
    ("uruguay", "Uruguay"),
    ("bolivia", "Bolivia"),
    ("peru", "Peru"),
    ("colombia", "Colombia"),
    ("méxico", "Mexico"),
    ("mexico", "Mexico"),
    ("chile", "Chile"),
    ("kenya", "Kenya"),
    ("ghana", "Ghana"),
    ("ethiopia", "Ethiopia"),
    ("tanzania", "Tanzania"),
];

/// Infer a geographic region from the search query that produced a hit.
///
/// First table match wins; no ambiguity resolution beyond table order.
pub fn infer_region(query: &str) -> Option<&'static str> {
    let query_lower = query.to_lowercase();
    GEO_KEYWORDS
        .iter()
        .find(|(keyword, _)| query_lower.contains(keyword))
        .map(|(_, region)| *region)
}

const BLOCKED_DOMAINS: &[&str] = &[
    "example.com",
    "email.com",
    "test.com",
    "sentry.io",
    "linkedin.com",
];

const BLOCKED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

/// Extract email-like strings from free text.
///
/// Filters placeholder/service domains and image filenames that match
/// the email shape. Results are lowercased and deduplicated; order
/// follows first occurrence.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in email_re().find_iter(text) {
        let email = m.as_str().to_lowercase();
        let domain = email.split('@').nth(1).unwrap_or("");
        if BLOCKED_DOMAINS.contains(&domain) {
            continue;
        }
        if BLOCKED_EXTENSIONS.iter().any(|ext| email.ends_with(ext)) {
            continue;
        }
        if !seen.contains(&email) {
            seen.push(email);
        }
    }
    seen
}

const SPANISH_REGIONS: &[&str] = &[
    "argentina",
    "paraguay",
    "uruguay",
    "bolivia",
    "peru",
    "mexico",
    "colombia",
    "chile",
    "ecuador",
    "venezuela",
    "costa rica",
    "panama",
    "guatemala",
];

/// Map a region to the outbound message language.
///
/// Brazil maps to Portuguese, the fixed Spanish-speaking list to
/// Spanish, everything else (including no region) to English.
pub fn detect_language(region: Option<&str>) -> Language {
    let Some(region) = region else {
        return Language::En;
    };
    let region_lower = region.to_lowercase();
    if region_lower.contains("brazil") || region_lower.contains("brasil") {
        return Language::Pt;
    }
    if SPANISH_REGIONS.iter().any(|r| region_lower.contains(r)) {
        return Language::Es;
    }
    Language::En
}

/// Recover job-title text truncated in the result title.
///
/// Snippets often begin with the full title text. When the parsed job
/// title appears as a prefix inside the snippet, extend it up to the
/// next sentence boundary and return the longer version.
pub fn extend_job_title_from_snippet(job_title: &str, snippet: &str) -> Option<String> {
    if job_title.is_empty() || snippet.is_empty() {
        return None;
    }
    let idx = find_ignore_case(snippet, &job_title.to_lowercase())?;

    let rest = &snippet[idx..];
    let end = rest.find(['.', '·', '|']).unwrap_or(rest.len());
    let fuller = clean_truncated(rest[..end].trim())?;

    if fuller.len() > job_title.len() {
        Some(fuller)
    } else {
        None
    }
}

/// Case-insensitive substring search returning a byte index into the
/// original string. Lowercasing can change byte lengths ('ẞ' shrinks,
/// 'İ' grows), so an index found in the lowered text cannot be used to
/// slice the original; each lowered byte is mapped back to the char
/// boundary it came from.
fn find_ignore_case(haystack: &str, needle_lower: &str) -> Option<usize> {
    if needle_lower.is_empty() {
        return None;
    }
    let mut lowered = String::with_capacity(haystack.len());
    let mut origin = Vec::with_capacity(haystack.len());
    for (i, ch) in haystack.char_indices() {
        for lc in ch.to_lowercase() {
            lowered.push(lc);
            origin.resize(lowered.len(), i);
        }
    }
    lowered.find(needle_lower).map(|pos| origin[pos])
}

/// Build the ordered query variants used to find a person's email.
///
/// Name + contact keywords, then name + organization + "@", then a
/// domain-restricted search of academic/institutional sites.
pub fn build_email_search_queries(name: &str, organization: Option<&str>) -> Vec<String> {
    let clean_name = name.trim().trim_matches('"');
    if clean_name.is_empty() || clean_name == "[NOMBRE]" {
        return Vec::new();
    }

    let mut queries = vec![format!("\"{clean_name}\" email OR correo OR mailto")];

    if let Some(org) = organization {
        let clean_org = org.trim().trim_matches('"');
        if !clean_org.is_empty() && clean_org != "[EMPRESA]" {
            queries.push(format!("\"{clean_name}\" \"{clean_org}\" email OR @"));
        }
    }

    queries.push(format!(
        "\"{clean_name}\" pathology OR patología \"@\" site:researchgate.net OR site:scholar.google.com OR site:orcid.org"
    ));

    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_canonical_url() {
        assert_eq!(
            parse_profile_slug("https://www.linkedin.com/in/jane-doe-123/"),
            Some("jane-doe-123".to_string())
        );
        assert_eq!(
            parse_profile_slug("https://linkedin.com/in/jdoe?trk=public"),
            Some("jdoe".to_string())
        );
    }

    #[test]
    fn slug_rejects_other_paths() {
        assert_eq!(parse_profile_slug("https://linkedin.com/company/acme"), None);
        assert_eq!(parse_profile_slug("https://example.com/in/jane"), None);
        assert_eq!(parse_profile_slug(""), None);
    }

    #[test]
    fn title_three_segments() {
        let parsed =
            parse_result_title("Jane Doe - Chief of Pathology - Hospital X | LinkedIn");
        assert_eq!(parsed.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.job_title.as_deref(), Some("Chief of Pathology"));
        assert_eq!(parsed.organization.as_deref(), Some("Hospital X"));
    }

    #[test]
    fn title_interior_segments_merge_into_job_title() {
        let parsed = parse_result_title(
            "Jane Doe - Senior Director - Oncology - Hospital X | LinkedIn",
        );
        assert_eq!(parsed.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.job_title.as_deref(), Some("Senior Director - Oncology"));
        assert_eq!(parsed.organization.as_deref(), Some("Hospital X"));
    }

    #[test]
    fn title_strips_truncation_ellipses() {
        let parsed = parse_result_title("Jane Doe - Chief of Patho... | LinkedIn");
        assert_eq!(parsed.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.job_title.as_deref(), Some("Chief of Patho"));
    }

    #[test]
    fn title_branding_only_yields_nothing() {
        assert_eq!(parse_result_title(""), ParsedTitle::default());
        let parsed = parse_result_title(" | LinkedIn");
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.job_title, None);
    }

    #[test]
    fn name_from_slug_drops_id_suffix() {
        assert_eq!(infer_name_from_slug("john-doe-3f9a21"), "John Doe");
        assert_eq!(infer_name_from_slug("john-doe-12345"), "John Doe");
    }

    #[test]
    fn name_from_slug_degrades_to_raw_slug() {
        assert_eq!(infer_name_from_slug("1234567"), "1234567");
    }

    #[test]
    fn region_longest_match_wins() {
        assert_eq!(
            infer_region("site:linkedin.com/in pathology \"South Africa\" OR Nigeria"),
            Some("South Africa")
        );
        assert_eq!(infer_region("pathology Argentina OR Brazil"), Some("Argentina"));
        assert_eq!(infer_region("global pharma oncology"), None);
    }

    #[test]
    fn emails_filter_blocked_domains() {
        let emails =
            extract_emails("contact me at a@example.com or b@realhospital.org");
        assert_eq!(emails, vec!["b@realhospital.org".to_string()]);
    }

    #[test]
    fn emails_filter_image_files() {
        let emails = extract_emails("logo@2x.header.png and dr.smith@clinic.co");
        assert_eq!(emails, vec!["dr.smith@clinic.co".to_string()]);
    }

    #[test]
    fn emails_lowercase_and_dedup() {
        let emails = extract_emails("A@Clinic.Org and a@clinic.org");
        assert_eq!(emails, vec!["a@clinic.org".to_string()]);
    }

    #[test]
    fn language_mapping() {
        assert_eq!(detect_language(Some("Brazil")), Language::Pt);
        assert_eq!(detect_language(Some("Argentina")), Language::Es);
        assert_eq!(detect_language(Some("Mexico")), Language::Es);
        assert_eq!(detect_language(Some("Nigeria")), Language::En);
        assert_eq!(detect_language(None), Language::En);
    }

    #[test]
    fn job_title_extended_from_snippet() {
        let fuller = extend_job_title_from_snippet(
            "Chief of Patho",
            "Chief of Pathology and Laboratory Medicine · Hospital X",
        );
        assert_eq!(fuller.as_deref(), Some("Chief of Pathology and Laboratory Medicine"));
    }

    #[test]
    fn job_title_extended_after_case_shifting_text() {
        // 'ẞ' lowercases to the shorter 'ß'; the match index must still
        // land on a char boundary of the original snippet.
        let fuller = extend_job_title_from_snippet(
            "Chief",
            "ẞẞ Chief of Pathology and Laboratory Medicine",
        );
        assert_eq!(
            fuller.as_deref(),
            Some("Chief of Pathology and Laboratory Medicine")
        );

        // 'İ' lowercases to the longer "i\u{307}".
        let fuller = extend_job_title_from_snippet("Director", "İİ Director of Oncology");
        assert_eq!(fuller.as_deref(), Some("Director of Oncology"));
    }

    #[test]
    fn job_title_not_extended_when_absent() {
        assert_eq!(
            extend_job_title_from_snippet("Chief of Pathology", "Completely unrelated text."),
            None
        );
    }

    #[test]
    fn email_queries_include_org_variant_when_known() {
        let queries = build_email_search_queries("Jane Doe", Some("Hospital X"));
        assert_eq!(queries.len(), 3);
        assert!(queries[1].contains("Hospital X"));
    }

    #[test]
    fn email_queries_empty_for_placeholder_name() {
        assert!(build_email_search_queries("[NOMBRE]", None).is_empty());
        assert!(build_email_search_queries("  ", None).is_empty());
    }
}
