use super::FeedError;
use regex::Regex;

/// normalizes a trip headsign for display and comparison: all-caps labels are lowercased,
/// a leading "to " is dropped, whitespace is collapsed and words are capitalized.
pub fn clean_headsign(headsign: &str) -> String {
    let uppercase_only = headsign.chars().any(|c| c.is_alphabetic())
        && headsign
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase());
    let label = if uppercase_only {
        headsign.to_lowercase()
    } else {
        headsign.to_string()
    };
    let mut words: Vec<&str> = label.split_whitespace().collect();
    if words
        .first()
        .is_some_and(|w| w.eq_ignore_ascii_case("to") && words.len() > 1)
    {
        words.remove(0);
    }
    words
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// removes agency-specific decoration from stop ids (such as a "mi" prefix or "t" suffix).
#[derive(Debug, Clone, Default)]
pub struct StopIdCleaner {
    patterns: Vec<Regex>,
}

impl StopIdCleaner {
    pub fn new(patterns: &[String]) -> Result<Self, FeedError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| FeedError::InvalidStopIdPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// applies each pattern in order, removing every match
    pub fn clean(&self, stop_id: &str) -> String {
        self.patterns
            .iter()
            .fold(stop_id.to_string(), |id, re| re.replace_all(&id, "").into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_uppercase_headsign() {
        assert_eq!(clean_headsign("MILTON GO"), "Milton Go");
        assert_eq!(
            clean_headsign("REGIONAL RD 25 & BRITANNIA"),
            "Regional Rd 25 & Britannia"
        );
    }

    #[test]
    fn test_clean_leading_to() {
        assert_eq!(clean_headsign("to  Milton Go"), "Milton Go");
        assert_eq!(clean_headsign("TO HIGH PT"), "High Pt");
        // a lone "to" is a label, not a prefix
        assert_eq!(clean_headsign("to"), "To");
    }

    #[test]
    fn test_mixed_case_headsign_keeps_case() {
        assert_eq!(
            clean_headsign("Louis St. Laurent & 4th"),
            "Louis St. Laurent & 4th"
        );
        assert_eq!(clean_headsign(""), "");
    }

    #[test]
    fn test_stop_id_cleaner() {
        let patterns = vec![String::from("(?i)^mi"), String::from("(?i)t$")];
        let cleaner = StopIdCleaner::new(&patterns).expect("valid patterns");
        assert_eq!(cleaner.clean("MI2351"), "2351");
        assert_eq!(cleaner.clean("mi2017t"), "2017");
        assert_eq!(cleaner.clean("2123"), "2123");
        assert_eq!(StopIdCleaner::default().clean("mi2017t"), "mi2017t");
    }

    #[test]
    fn test_invalid_stop_id_pattern() {
        let result = StopIdCleaner::new(&[String::from("(unclosed")]);
        assert!(matches!(
            result,
            Err(FeedError::InvalidStopIdPattern { ref pattern, .. }) if pattern == "(unclosed"
        ));
    }
}
