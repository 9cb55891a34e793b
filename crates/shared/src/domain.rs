use crate::protocol::ActivityDetails;

/// A named event with a capacity and a participant roster, owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Server order, duplicates kept.
    pub participants: Vec<String>,
}

impl Activity {
    pub fn from_details(name: impl Into<String>, details: ActivityDetails) -> Self {
        Self {
            name: name.into(),
            description: details.description,
            schedule: details.schedule,
            max_participants: details.max_participants,
            participants: details.participants,
        }
    }

    /// Capacity minus roster size. Not clamped: an over-full roster goes negative.
    pub fn spots_left(&self) -> i64 {
        spots_left(self.max_participants, &self.participants)
    }
}

pub fn spots_left(max_participants: u32, participants: &[String]) -> i64 {
    i64::from(max_participants) - participants.len() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Class name the status banner carries for this kind.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spots_left_counts_duplicates_and_passes_negative_through() {
        let roster = vec![
            "a@mergington.edu".to_string(),
            "a@mergington.edu".to_string(),
            "b@mergington.edu".to_string(),
        ];
        assert_eq!(spots_left(12, &roster), 9);
        assert_eq!(spots_left(2, &roster), -1);
        assert_eq!(spots_left(0, &[]), 0);
    }
}
