use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel used when a region or language cannot be determined
pub const UNKNOWN: &str = "Unknown";

static BRACKET_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("Invalid regex"));
static BRACKET_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("Invalid regex"));

/// Structured metadata extracted from an archive filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Title with all bracket groups removed
    pub title: String,
    /// Region string, stored verbatim (multi-region strings are not split)
    pub region: String,
    /// Language names in filename order, never empty
    pub languages: Vec<String>,
}

/// Rule tables driving the bracket-classification heuristic. Injectable so
/// archives with other naming conventions can be supported without code
/// change.
#[derive(Debug, Clone)]
pub struct ParserRules {
    /// Recognized archive-file extensions, matched case-insensitively
    pub extensions: Vec<String>,
    /// Two-letter language code to language name, in priority order
    pub language_codes: Vec<(String, String)>,
    /// Region string to inferred language set, in priority order
    pub region_languages: Vec<(String, Vec<String>)>,
}

impl Default for ParserRules {
    fn default() -> Self {
        let language_codes = LANGUAGE_CODES
            .iter()
            .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
            .collect();

        let region_languages = REGION_LANGUAGES
            .iter()
            .map(|(region, langs)| {
                (
                    (*region).to_string(),
                    langs.iter().map(|l| (*l).to_string()).collect(),
                )
            })
            .collect();

        Self {
            extensions: vec![".zip".to_string()],
            language_codes,
            region_languages,
        }
    }
}

impl ParserRules {
    /// Map a language code to its name; unmapped codes pass through verbatim
    fn language_name(&self, code: &str) -> String {
        self.language_codes
            .iter()
            .find(|(c, _)| c == code)
            .map_or_else(|| code.to_string(), |(_, name)| name.clone())
    }

    /// A bracket group is a language group if it contains a comma, or a token
    /// (delimited by comma, space, or string boundary) that exactly matches a
    /// known language code.
    fn is_language_group(&self, content: &str) -> bool {
        if content.contains(',') {
            return true;
        }
        content
            .split([',', ' '])
            .filter(|t| !t.is_empty())
            .any(|token| self.language_codes.iter().any(|(code, _)| code == token))
    }

    /// Split a language group on commas and map each code through the table
    fn parse_languages(&self, content: &str) -> Vec<String> {
        content
            .split(',')
            .map(|code| self.language_name(code.trim()))
            .collect()
    }

    /// Infer languages from a region string. The lookup accepts either the
    /// region containing a known key or a known key containing the region;
    /// compound regions ("USA, Europe") are matched as one literal string.
    fn infer_from_region(&self, region: &str) -> Option<Vec<String>> {
        self.region_languages
            .iter()
            .find(|(key, _)| region.contains(key.as_str()) || key.contains(region))
            .map(|(_, langs)| langs.clone())
    }
}

/// Heuristic filename parser for archive catalog entries
pub struct NameParser {
    rules: ParserRules,
}

impl Default for NameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NameParser {
    pub fn new() -> Self {
        Self::with_rules(ParserRules::default())
    }

    pub fn with_rules(rules: ParserRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ParserRules {
        &self.rules
    }

    /// Parse an archive filename into {title, region, languages}
    #[must_use]
    pub fn parse(&self, filename: &str) -> ParsedName {
        let stem = self.strip_extension(filename);

        let groups: Vec<&str> = BRACKET_GROUP
            .captures_iter(stem)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        let mut region = String::new();
        let mut languages: Vec<String> = Vec::new();

        let title = if groups.is_empty() {
            stem.to_string()
        } else {
            let last = groups[groups.len() - 1];
            let second_last = (groups.len() > 1).then(|| groups[groups.len() - 2]);

            if self.rules.is_language_group(last) {
                languages = self.rules.parse_languages(last);
                if let Some(prev) = second_last {
                    // The group before a language group is taken as the
                    // region verbatim, without further classification
                    region = prev.to_string();
                }
            } else {
                region = last.to_string();
                if let Some(prev) = second_last
                    && self.rules.is_language_group(prev)
                {
                    languages = self.rules.parse_languages(prev);
                }
            }

            collapse_whitespace(BRACKET_STRIP.replace_all(stem, "").trim())
        };

        if languages.is_empty()
            && !region.is_empty()
            && let Some(inferred) = self.rules.infer_from_region(&region)
        {
            languages = inferred;
        }

        if region.is_empty() {
            region = UNKNOWN.to_string();
        }
        if languages.is_empty() {
            languages = vec![UNKNOWN.to_string()];
        }

        ParsedName {
            title,
            region,
            languages,
        }
    }

    /// Strip the first matching known extension, case-insensitively
    fn strip_extension<'a>(&self, filename: &'a str) -> &'a str {
        let lower = filename.to_lowercase();
        for ext in &self.rules.extensions {
            if lower.ends_with(&ext.to_lowercase()) {
                return &filename[..filename.len() - ext.len()];
            }
        }
        filename
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("En", "English"),
    ("Ja", "Japanese"),
    ("Fr", "French"),
    ("De", "German"),
    ("Es", "Spanish"),
    ("It", "Italian"),
    ("Pt", "Portuguese"),
    ("Nl", "Dutch"),
    ("Sv", "Swedish"),
    ("Da", "Danish"),
    ("Fi", "Finnish"),
    ("No", "Norwegian"),
    ("Pl", "Polish"),
    ("Ru", "Russian"),
    ("Ko", "Korean"),
    ("Zh", "Chinese"),
    ("Ar", "Arabic"),
    ("Tr", "Turkish"),
    ("Cs", "Czech"),
    ("Hu", "Hungarian"),
    ("Ro", "Romanian"),
    ("Th", "Thai"),
    ("El", "Greek"),
    ("He", "Hebrew"),
];

const REGION_LANGUAGES: &[(&str, &[&str])] = &[
    ("USA", &["English"]),
    ("Europe", &["English", "French", "German", "Spanish", "Italian"]),
    ("Japan", &["Japanese"]),
    ("Korea", &["Korean"]),
    ("China", &["Chinese"]),
    ("Asia", &["English", "Chinese", "Japanese", "Korean"]),
    ("World", &["English"]),
    ("UK", &["English"]),
    ("Germany", &["German"]),
    ("France", &["French"]),
    ("Spain", &["Spanish"]),
    ("Italy", &["Italian"]),
    ("Netherlands", &["Dutch"]),
    ("Sweden", &["Swedish"]),
    ("Denmark", &["Danish"]),
    ("Finland", &["Finnish"]),
    ("Norway", &["Norwegian"]),
    ("Poland", &["Polish"]),
    ("Russia", &["Russian"]),
    ("Brazil", &["Portuguese"]),
    ("Australia", &["English"]),
    ("Canada", &["English", "French"]),
];
