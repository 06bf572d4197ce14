use std::{collections::HashMap, path::Path};

use serde::Deserialize;

/// Café names per city, in the order they are served.
#[derive(Debug)]
pub struct CafeTable {
    cities: HashMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed cafe table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cafe table has no cities")]
    Empty,
    #[error("cafe table contains a city with an empty name")]
    EmptyCityName,
}

#[derive(Deserialize)]
struct TableFile {
    #[serde(default)]
    cities: HashMap<String, Vec<String>>,
}

impl CafeTable {
    pub fn new<I, C, N>(cities: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<N>)>,
        C: Into<String>,
        N: Into<String>,
    {
        let cities = cities
            .into_iter()
            .map(|(city, cafes)| (city.into(), cafes.into_iter().map(Into::into).collect()))
            .collect();
        Self { cities }
    }

    pub fn builtin() -> Self {
        Self::new([(
            "moscow",
            vec!["Мир кофе", "Сладкоежка", "Кофе и завтраки", "Сытый студент"],
        )])
    }

    pub fn from_toml_str(s: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(s)?;
        if file.cities.is_empty() {
            return Err(TableError::Empty);
        }
        if file.cities.keys().any(|city| city.is_empty()) {
            return Err(TableError::EmptyCityName);
        }
        Ok(Self {
            cities: file.cities,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn get(&self, city: &str) -> Option<&[String]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}
