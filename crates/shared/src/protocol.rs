use std::{collections::HashSet, fmt};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{domain::Activity, error::CatalogException};

/// Per-activity payload of `GET /activities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Decoded `GET /activities` body: activity name to details, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    entries: Vec<(String, ActivityDetails)>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, details: ActivityDetails) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = details,
            None => self.entries.push((name, details)),
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActivityDetails> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, details)| details)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActivityDetails)> {
        self.entries
            .iter()
            .map(|(name, details)| (name.as_str(), details))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_activities(self) -> Vec<Activity> {
        self.entries
            .into_iter()
            .map(|(name, details)| Activity::from_details(name, details))
            .collect()
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, details) in &self.entries {
            map.serialize_entry(name, details)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = ActivityCatalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of activity name to activity details")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, details)) = access.next_entry::<String, ActivityDetails>()? {
            if !seen.insert(name.clone()) {
                return Err(de::Error::custom(CatalogException::new(format!(
                    "duplicate activity name '{name}'"
                ))));
            }
            entries.push((name, details));
        }
        Ok(ActivityCatalog { entries })
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Success body of the signup and unregister endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
