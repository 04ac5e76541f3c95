//! Recognized section titles.
//!
//! A top-level heading only opens a section when its title is registered
//! here. The registry is a plain value handed to the parser, so different
//! title sets (per language, per template) can be used side by side.

/// Built-in titles, English and Japanese, keyed by canonical section id.
const DEFAULT_SECTIONS: &[(&str, &[&str])] = &[
    (
        "summary",
        &[
            "Summary",
            "Professional Summary",
            "Profile",
            "About",
            "About Me",
            "概要",
            "職務要約",
            "自己PR",
            "自己紹介",
        ],
    ),
    (
        "experience",
        &[
            "Experience",
            "Work Experience",
            "Professional Experience",
            "職歴",
            "職務経歴",
            "職務履歴",
        ],
    ),
    ("education", &["Education", "学歴"]),
    (
        "skills",
        &["Skills", "Technical Skills", "スキル", "技術スキル", "活かせる経験・知識・技術"],
    ),
    (
        "certifications",
        &[
            "Certifications",
            "Licenses & Certifications",
            "Licenses and Certifications",
            "資格",
            "免許・資格",
            "資格・免許",
        ],
    ),
    (
        "competencies",
        &[
            "Core Competencies",
            "Competencies",
            "Key Competencies",
            "得意分野",
            "コアコンピテンシー",
        ],
    ),
    ("languages", &["Languages", "Language Skills", "語学", "語学力", "言語"]),
    ("projects", &["Projects", "Personal Projects", "プロジェクト"]),
    ("motivation", &["Motivation", "Cover Letter", "志望動機"]),
];

/// One registered section: its id and normalized titles.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: String,
    titles: Vec<String>,
}

/// Immutable mapping from canonical section ids to recognized heading titles.
///
/// Lookups trim the heading and compare case-insensitively. When two ids
/// claim the same title, the one registered first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    entries: Vec<Entry>,
}

fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

impl SectionRegistry {
    /// A registry with exactly the given sections, in the given order.
    pub fn new<I, T, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: Into<String>,
    {
        let mut registry = Self {
            entries: Vec::new(),
        };
        for (id, titles) in sections {
            registry.add(id, titles);
        }
        registry
    }

    /// A registry with nothing in it; no heading will open a section.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns a copy with extra titles merged in. Unknown ids are appended.
    #[must_use]
    pub fn extend<I, T, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: Into<String>,
    {
        for (id, titles) in sections {
            self.add(id, titles);
        }
        self
    }

    fn add<T, S>(&mut self, id: S, titles: T)
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: Into<String>,
    {
        let id = id.into();
        let position = match self.entries.iter().position(|e| e.id == id) {
            Some(i) => i,
            None => {
                self.entries.push(Entry {
                    id,
                    titles: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[position];
        for title in titles {
            let title = normalize(title.as_ref());
            if !title.is_empty() && !entry.titles.contains(&title) {
                entry.titles.push(title);
            }
        }
    }

    /// Canonical id for a heading title, if it is recognized.
    pub fn resolve(&self, title: &str) -> Option<&str> {
        let wanted = normalize(title);
        self.entries
            .iter()
            .find(|e| e.titles.contains(&wanted))
            .map(|e| e.id.as_str())
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SECTIONS.iter().map(|(id, titles)| (*id, titles.iter())))
    }
}
