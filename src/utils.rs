use std::borrow::Cow;

use any_ascii::any_ascii;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::types::{AlbumGroup, AlbumGroups, ArtistRecord, MatchPolicy};

pub const URL_TOKEN: &str = "<URL>";
pub const EMAIL_TOKEN: &str = "<EMAIL>";
pub const PHONE_TOKEN: &str = "<PHONE>";
pub const NUMBER_TOKEN: &str = "<NUMBER>";
pub const DIGIT_TOKEN: &str = "0";
pub const CURRENCY_TOKEN: &str = "<CUR>";

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>"]*[^\s<>".,;:!?')\]]"#).unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").unwrap()
});

// North American style numbers: "+1 (555) 123-4567", "555.123.4567", "5551234567"
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\b1[ .\-]?)?(?:\([0-9]{3}\)|\b[0-9]{3})[ .\-]?[0-9]{3}[ .\-]?[0-9]{4}\b")
        .unwrap()
});

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+(?:[.,][0-9]+)*\b").unwrap());

static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

static CURRENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$¢£¤¥֏؋৲৳৻૱௹฿៛\u{20A0}-\u{20C0}꠸﷼﹩＄￠￡￥￦]").unwrap()
});

static MULTI_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Switches for [`Normalizer`]. The default enables every replacement and
/// keeps case, line breaks and punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub fix_unicode: bool,
    pub to_ascii: bool,
    pub lower: bool,
    pub no_line_breaks: bool,
    pub no_urls: bool,
    pub no_emails: bool,
    pub no_phone_numbers: bool,
    pub no_numbers: bool,
    pub no_digits: bool,
    pub no_currency_symbols: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            fix_unicode: true,
            to_ascii: true,
            lower: false,
            no_line_breaks: false,
            no_urls: true,
            no_emails: true,
            no_phone_numbers: true,
            no_numbers: true,
            no_digits: true,
            no_currency_symbols: true,
        }
    }
}

/// Free-text cleaner for track, album and artist names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: CleanOptions,
}

impl Normalizer {
    pub fn new(options: CleanOptions) -> Self {
        Normalizer { options }
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Cleans `text`. The result of the default options is ASCII-only and
    /// cleaning it again returns it unchanged.
    pub fn clean(&self, text: &str) -> String {
        let opts = &self.options;
        let mut text: String = text.to_string();

        if opts.fix_unicode {
            text = fix_mojibake(&text).nfc().collect();
        }
        if opts.no_currency_symbols {
            text = replace(&CURRENCY_REGEX, &text, CURRENCY_TOKEN);
        }
        if opts.to_ascii {
            text = any_ascii(&text);
            // transliteration may itself produce a "$"
            if opts.no_currency_symbols {
                text = replace(&CURRENCY_REGEX, &text, CURRENCY_TOKEN);
            }
        }
        if opts.lower {
            text = text.to_lowercase();
        }
        if opts.no_urls {
            text = replace(&URL_REGEX, &text, URL_TOKEN);
        }
        if opts.no_emails {
            text = replace(&EMAIL_REGEX, &text, EMAIL_TOKEN);
        }
        if opts.no_phone_numbers {
            text = replace(&PHONE_REGEX, &text, PHONE_TOKEN);
        }
        if opts.no_numbers {
            text = replace(&NUMBER_REGEX, &text, NUMBER_TOKEN);
        }
        if opts.no_digits {
            text = replace(&DIGIT_REGEX, &text, DIGIT_TOKEN);
        }

        normalize_whitespace(&text, opts.no_line_breaks)
    }
}

/// Cleans `text` with the default [`CleanOptions`].
pub fn normalize(text: &str) -> String {
    Normalizer::default().clean(text)
}

fn replace(regex: &Regex, text: &str, token: &str) -> String {
    regex.replace_all(text, token).into_owned()
}

// Text that was UTF-8 but got decoded as Latin-1 ("CafÃ©") is re-decoded.
fn fix_mojibake(text: &str) -> Cow<'_, str> {
    let suspicious = text.chars().any(|c| ('\u{80}'..='\u{ff}').contains(&c));
    if !suspicious || text.chars().any(|c| c as u32 > 0xff) {
        return Cow::Borrowed(text);
    }

    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
    match String::from_utf8(bytes) {
        Ok(fixed) => Cow::Owned(fixed),
        Err(_) => Cow::Borrowed(text),
    }
}

fn normalize_whitespace(text: &str, no_line_breaks: bool) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| MULTI_WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect();

    let separator = if no_line_breaks { " " } else { "\n" };
    lines.join(separator)
}

/// Returns the bare id of a catalog uri such as `spotify:artist:<id>`.
/// Plain ids are returned unchanged.
pub fn id_from_uri(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// Picks the search result that best matches `name`.
pub fn choose_artist(
    name: &str,
    candidates: Vec<ArtistRecord>,
    policy: MatchPolicy,
) -> Option<ArtistRecord> {
    match policy {
        MatchPolicy::First => candidates.into_iter().next(),
        MatchPolicy::Exact => {
            let wanted = name.trim().to_lowercase();
            let exact = candidates
                .iter()
                .position(|c| c.name.trim().to_lowercase() == wanted);

            let index = exact.unwrap_or(0);
            candidates.into_iter().nth(index)
        }
    }
}

pub fn parse_artist_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse_match_policy(s: &str) -> Result<MatchPolicy, String> {
    match s.trim().to_lowercase().as_str() {
        "exact" => Ok(MatchPolicy::Exact),
        "first" => Ok(MatchPolicy::First),
        other => Err(format!(
            "unknown artist match policy {:?}, expected exact or first",
            other
        )),
    }
}

pub fn parse_album_group(s: &str) -> Result<AlbumGroup, String> {
    match s.trim().to_lowercase().as_str() {
        "album" => Ok(AlbumGroup::Album),
        "single" => Ok(AlbumGroup::Single),
        "appears_on" => Ok(AlbumGroup::AppearsOn),
        "compilation" => Ok(AlbumGroup::Compilation),
        other => Err(format!(
            "unknown album group {:?}, expected album, single, appears_on, compilation or all",
            other
        )),
    }
}

pub fn parse_album_groups(s: &str) -> Result<AlbumGroups, String> {
    let mut groups = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part.eq_ignore_ascii_case("all") {
            return Ok(AlbumGroups(vec![
                AlbumGroup::Album,
                AlbumGroup::Single,
                AlbumGroup::AppearsOn,
                AlbumGroup::Compilation,
            ]));
        }
        let group = parse_album_group(part)?;
        if !groups.contains(&group) {
            groups.push(group);
        }
    }

    if groups.is_empty() {
        return Err("no album group given".to_string());
    }
    Ok(AlbumGroups(groups))
}

pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected true or false, got {:?}", other)),
    }
}
