//! Display helpers turning search results into prompt choices.

use crate::search::SearchResult;
use crate::tui::{Choice, sanitize_for_display};
use chrono::DateTime;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size with base-1024 units, e.g. `"1536"` -> `"1.50 KB"`.
/// Input that is not a number is returned unchanged.
pub fn format_bytes(raw: &str) -> String {
    let Ok(mut bytes) = raw.trim().parse::<f64>() else {
        return raw.to_string();
    };
    let mut unit = 0;
    while bytes >= 1024.0 && unit < UNITS.len() - 1 {
        bytes /= 1024.0;
        unit += 1;
    }
    format!("{bytes:.2} {}", UNITS[unit])
}

/// Unix timestamp (seconds) as `dd/mm/yyyy` in UTC; empty when invalid.
pub fn format_date(raw: &str) -> String {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Magnet URI for an info hash, with the name as display name.
pub fn magnet_uri(info_hash: &str, name: &str) -> String {
    format!(
        "magnet:?xt=urn:btih:{info_hash}&dn={}",
        urlencoding::encode(name)
    )
}

/// Build the list row for a result. The value is the magnet URI.
///
/// With `disable_dead`, results without seeders are rendered but cannot be
/// picked.
pub fn to_choice(result: &SearchResult, disable_dead: bool) -> Choice<String> {
    let name = sanitize_for_display(&result.name);
    let size = format_bytes(&result.size);
    let label = format!("{}/{} {name} {size}", result.seeders, result.leechers);
    let description = format!(
        "Seeds: {}, leechers: {}, {size}, added {}",
        result.seeders,
        result.leechers,
        format_date(&result.added)
    );

    let choice = Choice::named(magnet_uri(&result.info_hash, &result.name), label)
        .with_description(description);
    if disable_dead && result.seeder_count() == 0 {
        choice.disabled_because("(no seeders)")
    } else {
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> SearchResult {
        SearchResult {
            info_hash: "ABCDEF".to_string(),
            name: "Debian 12 DVD".to_string(),
            seeders: "120".to_string(),
            leechers: "4".to_string(),
            size: "3984588800".to_string(),
            added: "1686355200".to_string(),
            id: Some("1".to_string()),
            num_files: None,
            username: None,
            status: None,
            category: None,
            imdb: None,
        }
    }

    #[test]
    fn bytes() {
        assert_eq!(format_bytes("0"), "0.00 B");
        assert_eq!(format_bytes("1023"), "1023.00 B");
        assert_eq!(format_bytes("1536"), "1.50 KB");
        assert_eq!(format_bytes("1048576"), "1.00 MB");
        assert_eq!(format_bytes("3984588800"), "3.71 GB");
        // Largest unit caps the division
        assert_eq!(format_bytes("1125899906842624"), "1024.00 TB");
        assert_eq!(format_bytes("n/a"), "n/a");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("0"), "01/01/1970");
        assert_eq!(format_date("1686355200"), "10/06/2023");
        assert_eq!(format_date("soon"), "");
    }

    #[test]
    fn magnet_encodes_name() {
        assert_eq!(
            magnet_uri("ABC", "Debian 12 & more"),
            "magnet:?xt=urn:btih:ABC&dn=Debian%2012%20%26%20more"
        );
    }

    #[test]
    fn choice_from_result() {
        let choice = to_choice(&result(), false);
        assert_eq!(choice.name, "120/4 Debian 12 DVD 3.71 GB");
        assert_eq!(
            choice.description.as_deref(),
            Some("Seeds: 120, leechers: 4, 3.71 GB, added 10/06/2023")
        );
        assert_eq!(choice.value, "magnet:?xt=urn:btih:ABCDEF&dn=Debian%2012%20DVD");
        assert!(choice.disabled.is_none());
    }

    #[test]
    fn dead_results_can_be_disabled() {
        let mut dead = result();
        dead.seeders = "0".to_string();
        assert!(to_choice(&dead, false).disabled.is_none());
        assert_eq!(
            to_choice(&dead, true).disabled.as_ref().map(|d| d.label()),
            Some("(no seeders)")
        );
    }

    #[test]
    fn control_characters_are_stripped_from_names() {
        let mut noisy = result();
        noisy.name = "evil\x1b[2Jname".to_string();
        assert_eq!(to_choice(&noisy, false).name, "120/4 evil[2Jname 3.71 GB");
    }
}
