//! Learner state that outlives a single quiz: who they are, which tier they
//! picked, and the last score.

use std::collections::BTreeMap;

pub const STUDENT_NAME: &str = "studentName";
pub const STUDENT_GROUP: &str = "studentGroup";
pub const TEST_LEVEL: &str = "testLevel";
pub const SCORE: &str = "score";

/// Shown on the results view in place of a value that was never stored.
pub const NOT_PROVIDED: &str = "Не вказано";

/// String-keyed, string-valued storage.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub group: String,
}

impl Identity {
    /// Trims both fields; `None` unless both are non-empty.
    pub fn capture(name: &str, group: &str) -> Option<Self> {
        let name = name.trim();
        let group = group.trim();
        if name.is_empty() || group.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            group: group.to_string(),
        })
    }

    pub fn save<S: StateStore + ?Sized>(&self, store: &mut S) {
        store.set(STUDENT_NAME, self.name.clone());
        store.set(STUDENT_GROUP, self.group.clone());
    }

    pub fn load<S: StateStore + ?Sized>(store: &S) -> Option<Self> {
        Self::capture(
            &store.get(STUDENT_NAME).unwrap_or_default(),
            &store.get(STUDENT_GROUP).unwrap_or_default(),
        )
    }
}

/// Tier choice is only offered once both name and group are known.
pub fn can_choose_tier<S: StateStore + ?Sized>(store: &S) -> bool {
    Identity::load(store).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tier {
    A,
    B,
    C,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::A, Tier::B, Tier::C];

    pub fn id(&self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tier::A => "Легкий рівень",
            Tier::B => "Середній рівень",
            Tier::C => "Складний рівень",
        }
    }

    /// Accepts either the identifier or the title.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.id() == text || tier.title() == text)
    }

    pub fn save<S: StateStore + ?Sized>(&self, store: &mut S) {
        store.set(TEST_LEVEL, self.id().to_string());
    }
}

/// Suffix for the quiz heading, e.g. `— КН-21 | Іван Петренко`.
pub fn quiz_header<S: StateStore + ?Sized>(store: &S) -> String {
    format!(
        "— {} | {}",
        store.get(STUDENT_GROUP).unwrap_or_default(),
        store.get(STUDENT_NAME).unwrap_or_default()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Results {
    pub name: String,
    pub group: String,
    pub level: String,
    pub score: String,
}

impl Results {
    pub fn load<S: StateStore + ?Sized>(store: &S) -> Self {
        let or_placeholder = |key: &str| {
            store
                .get(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| NOT_PROVIDED.to_string())
        };
        Self {
            name: or_placeholder(STUDENT_NAME),
            group: or_placeholder(STUDENT_GROUP),
            level: or_placeholder(TEST_LEVEL),
            score: store
                .get(SCORE)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "0".to_string()),
        }
    }
}

impl std::fmt::Display for Results {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Результати тесту\nПІБ: {}\nГрупа: {}\nРівень: {}\nБали: {}",
            self.name, self.group, self.level, self.score
        )
    }
}
