use serde::{Deserialize, Serialize};

/// One parsed, queryable record for a single archive file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable identifier derived from platform name + filename
    pub id: String,
    /// Display title with bracket groups stripped
    pub title: String,
    /// Original archive filename
    pub filename: String,
    /// Region string, "Unknown" when undetermined
    pub region: String,
    /// Language names, never empty ("Unknown" sentinel when undetermined)
    pub languages: Vec<String>,
    /// Archive directory name of the owning platform
    pub platform: String,
    /// Ready-to-use, percent-encoded download URL
    pub download_url: String,
}

/// One hardware system's top-level archive directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Stable identifier derived from the directory name
    pub id: String,
    /// Exact archive directory name, used as the remote lookup key
    pub name: String,
    /// Name with the manufacturer prefix stripped
    pub display_name: String,
}

/// Manufacturer prefixes stripped from platform display names
const MANUFACTURER_PREFIXES: &[&str] = &[
    "Nintendo - ",
    "Sony - ",
    "Sega - ",
    "Atari - ",
    "Commodore - ",
    "Coleco - ",
];

impl Platform {
    /// Build a platform record from an archive directory name
    pub fn from_directory_name(name: &str) -> Self {
        Self {
            id: slug_id(name),
            name: name.to_string(),
            display_name: strip_manufacturer_prefix(name).to_string(),
        }
    }

    /// Static list of well-known platforms, usable without a live crawl
    pub fn builtin() -> Vec<Self> {
        BUILTIN_PLATFORMS
            .iter()
            .map(|(id, name, display_name)| Self {
                id: (*id).to_string(),
                name: (*name).to_string(),
                display_name: (*display_name).to_string(),
            })
            .collect()
    }
}

/// Derive a stable identifier by lower-casing and replacing every
/// non-alphanumeric character with an underscore
pub fn slug_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive a catalog entry id from platform name + filename. Distinct
/// filenames within a platform always yield distinct ids.
pub fn entry_id(platform: &str, filename: &str) -> String {
    slug_id(&format!("{platform}__{filename}"))
}

/// Strip the first matching manufacturer prefix, applied at most once
pub fn strip_manufacturer_prefix(name: &str) -> &str {
    for prefix in MANUFACTURER_PREFIXES {
        if let Some(stripped) = name.strip_prefix(prefix) {
            return stripped;
        }
    }
    name
}

const BUILTIN_PLATFORMS: &[(&str, &str, &str)] = &[
    ("nintendo-gba", "Nintendo - Game Boy Advance", "Game Boy Advance"),
    ("nintendo-gbc", "Nintendo - Game Boy Color", "Game Boy Color"),
    ("nintendo-gb", "Nintendo - Game Boy", "Game Boy"),
    ("nintendo-n64", "Nintendo - Nintendo 64", "Nintendo 64"),
    (
        "nintendo-snes",
        "Nintendo - Super Nintendo Entertainment System",
        "SNES",
    ),
    ("nintendo-nes", "Nintendo - Nintendo Entertainment System", "NES"),
    ("nintendo-3ds", "Nintendo - Nintendo 3DS", "Nintendo 3DS"),
    ("nintendo-ds", "Nintendo - Nintendo DS", "Nintendo DS"),
    ("nintendo-switch", "Nintendo - Nintendo Switch", "Nintendo Switch"),
    ("sony-ps1", "Sony - PlayStation", "PlayStation 1"),
    ("sony-ps2", "Sony - PlayStation 2", "PlayStation 2"),
    ("sony-psp", "Sony - PlayStation Portable", "PlayStation Portable"),
    ("sega-genesis", "Sega - Mega Drive / Genesis", "Mega Drive / Genesis"),
    ("sega-dreamcast", "Sega - Dreamcast", "Dreamcast"),
    ("sega-saturn", "Sega - Saturn", "Saturn"),
    ("atari-2600", "Atari - Atari 2600", "Atari 2600"),
    ("atari-7800", "Atari - Atari 7800 (BIN)", "Atari 7800"),
    ("commodore-64", "Commodore - Commodore 64", "Commodore 64"),
    ("coleco-vision", "Coleco - ColecoVision", "ColecoVision"),
    ("arcade-mame", "MAME", "Arcade (MAME)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_id_replaces_non_alphanumerics() {
        assert_eq!(
            slug_id("Nintendo - Game Boy Advance"),
            "nintendo___game_boy_advance"
        );
        assert_eq!(slug_id("MAME"), "mame");
    }

    #[test]
    fn test_entry_id_distinct_for_distinct_filenames() {
        let a = entry_id("Nintendo - Game Boy", "Tetris (World).zip");
        let b = entry_id("Nintendo - Game Boy", "Tetris (Japan).zip");
        assert_ne!(a, b);
        assert_eq!(a, "nintendo___game_boy__tetris__world__zip");
    }

    #[test]
    fn test_strip_manufacturer_prefix_first_match_once() {
        assert_eq!(
            strip_manufacturer_prefix("Nintendo - Game Boy Advance"),
            "Game Boy Advance"
        );
        assert_eq!(strip_manufacturer_prefix("Sony - PlayStation 2"), "PlayStation 2");
        assert_eq!(strip_manufacturer_prefix("MAME"), "MAME");
        // Only the leading prefix is stripped
        assert_eq!(
            strip_manufacturer_prefix("Sega - Sega - Saturn"),
            "Sega - Saturn"
        );
    }

    #[test]
    fn test_builtin_platforms_have_stable_ids() {
        let platforms = Platform::builtin();
        assert_eq!(platforms.len(), 20);
        assert!(platforms.iter().any(|p| p.id == "nintendo-gba"));
        assert!(
            platforms
                .iter()
                .all(|p| !p.id.is_empty() && !p.name.is_empty())
        );
    }
}
