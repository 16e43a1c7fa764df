//! The fixed set of courses a board tracks.
//!
//! A catalog is supplied once at startup, either the built-in curriculum or a
//! TOML file, and never changes while the app runs.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{CourseId, CourseIdError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: CourseId,
    pub name: String,
    pub term: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no courses")]
    Empty,
    #[error("duplicate course id: {0}")]
    Duplicate(CourseId),
    #[error("invalid course id")]
    InvalidId(#[from] CourseIdError),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

const BUILTIN: &[(&str, &str, u8)] = &[
    ("algebra", "Álgebra", 1),
    ("calculo-1", "Cálculo I", 1),
    ("intro-programacion", "Introducción a la Programación", 1),
    ("comunicacion", "Comunicación Efectiva", 1),
    ("algebra-lineal", "Álgebra Lineal", 2),
    ("calculo-2", "Cálculo II", 2),
    ("fisica-1", "Física I", 2),
    ("programacion", "Programación", 2),
    ("calculo-3", "Cálculo III", 3),
    ("ecuaciones-diferenciales", "Ecuaciones Diferenciales", 3),
    ("fisica-2", "Física II", 3),
    ("estructuras-datos", "Estructuras de Datos", 3),
    ("probabilidad", "Probabilidad y Estadística", 4),
    ("bases-datos", "Bases de Datos", 4),
    ("algoritmos", "Análisis de Algoritmos", 4),
    ("economia", "Economía", 4),
];

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "course", default)]
    courses: Vec<CatalogFileEntry>,
}

#[derive(Deserialize)]
struct CatalogFileEntry {
    id: String,
    name: Option<String>,
    #[serde(default = "default_term")]
    term: u8,
}

fn default_term() -> u8 {
    1
}

impl Catalog {
    /// Build a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for no entries and
    /// `CatalogError::Duplicate` when an id appears twice.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(&entry.id) {
                return Err(CatalogError::Duplicate(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The curriculum compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|(id, name, term)| {
                CourseId::new(*id).ok().map(|id| CatalogEntry {
                    id,
                    name: (*name).to_owned(),
                    term: *term,
                })
            })
            .collect();
        Self { entries }
    }

    /// Parse a catalog from TOML text.
    ///
    /// ```toml
    /// [[course]]
    /// id = "algebra"
    /// name = "Álgebra"
    /// term = 1
    /// ```
    ///
    /// A missing `name` falls back to the id and a missing `term` to 1.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed TOML, blank or duplicate ids, or an
    /// empty course list.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        let entries = file
            .courses
            .into_iter()
            .map(|entry| -> Result<CatalogEntry, CatalogError> {
                let id = CourseId::new(entry.id)?;
                let name = entry
                    .name
                    .map(|name| name.trim().to_owned())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| id.to_string());
                Ok(CatalogEntry {
                    id,
                    name,
                    term: entry.term,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Read and parse a TOML catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise the
    /// errors of [`Catalog::from_toml_str`].
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &CourseId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), BUILTIN.len());
        Catalog::new(builtin.entries().to_vec()).expect("builtin ids are unique");
        assert!(builtin.contains(&CourseId::new("algebra").unwrap()));
    }

    #[test]
    fn parses_toml_with_defaults() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[course]]
            id = "algebra"
            name = "Álgebra"
            term = 2

            [[course]]
            id = "fisica"
            "#,
        )
        .unwrap();

        let entries = catalog.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Álgebra");
        assert_eq!(entries[0].term, 2);
        assert_eq!(entries[1].name, "fisica");
        assert_eq!(entries[1].term, 1);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let err = Catalog::from_toml_str(
            r#"
            [[course]]
            id = "algebra"
            [[course]]
            id = " algebra "
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(id) if id.as_str() == "algebra"));

        assert!(matches!(
            Catalog::from_toml_str(""),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_toml_str("[[course]]\nid = \"  \""),
            Err(CatalogError::InvalidId(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        let err = Catalog::load_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
