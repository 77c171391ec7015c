use crate::core::MatchError;
use crate::models::CandidateProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading profiles
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<DirectoryError> for MatchError {
    fn from(err: DirectoryError) -> Self {
        MatchError::Unavailable(format!("profile directory: {}", err))
    }
}

/// Student profile with free-text interests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Mentor profile with expertise tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl From<&MentorProfile> for CandidateProfile {
    fn from(mentor: &MentorProfile) -> Self {
        CandidateProfile {
            id: mentor.id.clone(),
            tags: mentor.expertise.clone(),
        }
    }
}

/// Source of requester and candidate profiles
pub trait ProfileDirectory: Send + Sync {
    /// Interests of a student, `None` when the student is unknown
    fn student_interests(&self, student_id: &str) -> Result<Option<Vec<String>>, DirectoryError>;

    /// All mentors, in a stable order
    fn mentors(&self) -> Result<Vec<MentorProfile>, DirectoryError>;
}

/// Seed file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub students: Vec<StudentProfile>,
    #[serde(default)]
    pub mentors: Vec<MentorProfile>,
}

/// Read-only profile directory held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    students: HashMap<String, Vec<String>>,
    mentors: Vec<MentorProfile>,
}

impl InMemoryDirectory {
    pub fn new(students: Vec<StudentProfile>, mentors: Vec<MentorProfile>) -> Self {
        Self {
            students: students.into_iter().map(|s| (s.id, s.interests)).collect(),
            mentors,
        }
    }

    pub fn from_seed(seed: DirectorySeed) -> Self {
        Self::new(seed.students, seed.mentors)
    }

    /// Load a JSON seed file
    ///
    /// A missing file yields an empty directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Seed file {} not found, starting with an empty directory", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let seed: DirectorySeed = serde_json::from_str(&raw)?;

        tracing::info!(
            "Loaded {} students and {} mentors from {}",
            seed.students.len(),
            seed.mentors.len(),
            path.display()
        );

        Ok(Self::from_seed(seed))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn mentor_count(&self) -> usize {
        self.mentors.len()
    }
}

impl ProfileDirectory for InMemoryDirectory {
    fn student_interests(&self, student_id: &str) -> Result<Option<Vec<String>>, DirectoryError> {
        Ok(self.students.get(student_id).cloned())
    }

    fn mentors(&self) -> Result<Vec<MentorProfile>, DirectoryError> {
        Ok(self.mentors.clone())
    }
}
