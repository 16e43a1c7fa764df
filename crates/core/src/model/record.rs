use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::model::{CourseId, Grade};

/// Persisted shape of a single approved course.
///
/// Only approved courses are ever recorded; the `approved` flag is kept in the
/// wire format and is always `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    grade: Option<Grade>,
}

impl CourseRecord {
    #[must_use]
    pub fn approved(grade: Option<Grade>) -> Self {
        Self {
            approved: true,
            grade,
        }
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    #[must_use]
    pub fn grade(&self) -> Option<&Grade> {
        self.grade.as_ref()
    }
}

/// Full snapshot of every approved course, keyed by course id.
///
/// Courses without an entry are unapproved. The map is ordered so serialized
/// snapshots are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersistedState {
    records: BTreeMap<CourseId, CourseRecord>,
}

impl PersistedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as approved, replacing any previous record.
    pub fn approve(&mut self, id: CourseId, grade: Option<Grade>) {
        self.records.insert(id, CourseRecord::approved(grade));
    }

    pub fn remove(&mut self, id: &CourseId) -> Option<CourseRecord> {
        self.records.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&CourseRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn is_approved(&self, id: &CourseId) -> bool {
        self.records.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, &CourseRecord)> {
        self.records.iter()
    }
}

impl FromIterator<(CourseId, Option<Grade>)> for PersistedState {
    fn from_iter<T: IntoIterator<Item = (CourseId, Option<Grade>)>>(iter: T) -> Self {
        let mut state = Self::new();
        for (id, grade) in iter {
            state.approve(id, grade);
        }
        state
    }
}

//
// ─── LENIENT DECODING ──────────────────────────────────────────────────────────
//

/// One stored value, whatever its shape turned out to be.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Record(StoredRecord),
    /// A bare `true` counts as approved without a grade.
    Flag(bool),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    approved: Option<StoredFlag>,
    #[serde(default)]
    grade: Option<StoredGrade>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFlag {
    Bool(bool),
    Other(IgnoredAny),
}

impl StoredEntry {
    /// `Some(grade)` when the entry marks the course approved.
    fn into_approval(self) -> Option<Option<StoredGrade>> {
        match self {
            StoredEntry::Record(StoredRecord {
                approved: Some(StoredFlag::Bool(true)),
                grade,
            }) => Some(grade),
            StoredEntry::Flag(true) => Some(None),
            StoredEntry::Record(_) | StoredEntry::Flag(false) | StoredEntry::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGrade {
    Text(String),
    Number(f64),
    Other(IgnoredAny),
}

impl StoredGrade {
    fn normalize(self) -> Option<Grade> {
        match self {
            StoredGrade::Text(text) => Grade::parse(&text).ok(),
            StoredGrade::Number(value) => Grade::parse(&value.to_string()).ok(),
            StoredGrade::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for PersistedState {
    /// Decodes a stored snapshot, dropping what cannot be trusted.
    ///
    /// The outer shape must be a map. Each entry is judged on its own: entries
    /// that are not marked `approved: true` (or a bare `true`), or that carry a
    /// blank key, are skipped without affecting their siblings. Unparseable
    /// grades are discarded while the approval itself is kept. A key that only
    /// matches after trimming yields to the exact key.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, StoredEntry>::deserialize(deserializer)?;
        let mut state = Self::new();
        for (key, entry) in raw {
            let Ok(id) = CourseId::new(key.as_str()) else {
                warn!(key = %key, "skipping stored course with blank id");
                continue;
            };
            if id.as_str() != key {
                if state.is_approved(&id) {
                    warn!(
                        key = ?key,
                        course = %id,
                        "skipping duplicate of an already restored course"
                    );
                    continue;
                }
                warn!(key = ?key, course = %id, "trimmed whitespace around stored course id");
            }
            let Some(stored_grade) = entry.into_approval() else {
                warn!(course = %id, "skipping stored course not marked approved");
                continue;
            };
            let grade = match stored_grade {
                Some(raw_grade) => {
                    let grade = raw_grade.normalize();
                    if grade.is_none() {
                        warn!(course = %id, "discarding unparseable stored grade");
                    }
                    grade
                }
                None => None,
            };
            state.approve(id, grade);
        }
        Ok(state)
    }
}
