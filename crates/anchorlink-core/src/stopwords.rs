use std::collections::HashSet;

use crate::config::SearchSettings;

const EN_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "he", "him", "his", "she", "her", "it", "its",
    "they", "them", "their", "what", "which", "who", "this", "that", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "a", "an", "the", "and", "but", "if", "or", "as", "of",
    "at", "by", "for", "with", "to", "from", "in", "out", "on", "off",
];

const KO_STOPWORDS: &[&str] = &[
    "이",
    "가",
    "은",
    "는",
    "을",
    "를",
    "의",
    "에",
    "에서",
    "와",
    "과",
    "도",
    "으로",
    "로",
    "만",
    "뿐",
    "그리고",
    "그래서",
    "그러나",
    "하지만",
    "그",
    "저",
    "것",
    "수",
    "때",
    "곳",
    "들",
];

/// The effective stopword set: the built-in English + Korean defaults (when
/// enabled) unioned with the user's custom entries. Custom entries are
/// trimmed and lowercased so they match tokens, which are always lowercase.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    entries: HashSet<String>,
}

impl StopwordSet {
    #[must_use]
    pub fn from_settings(settings: &SearchSettings) -> Self {
        let mut entries = HashSet::new();
        if settings.use_default_stopwords {
            for word in EN_STOPWORDS.iter().chain(KO_STOPWORDS) {
                entries.insert((*word).to_string());
            }
        }
        for word in &settings.custom_stopwords {
            let normalized = word.trim().to_lowercase();
            if !normalized.is_empty() {
                entries.insert(normalized);
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.entries.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
