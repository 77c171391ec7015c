use crate::models::domain::CandidateProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to match a stored student against all mentors
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "studentId")]
    pub student_id: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank a caller-supplied candidate pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMatchRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
    #[serde(default)]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_request_validation() {
        let ok: MatchRequest = serde_json::from_str(r#"{"student_id": "s1"}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.limit, None);

        let camel: MatchRequest = serde_json::from_str(r#"{"studentId": "s1", "limit": 3}"#).unwrap();
        assert_eq!(camel.student_id, "s1");
        assert_eq!(camel.limit, Some(3));

        let empty: MatchRequest = serde_json::from_str(r#"{"student_id": ""}"#).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_profile_match_request_parses_expertise() {
        let json = r#"{
            "interests": ["react", "frontend"],
            "candidates": [{"id": "m1", "expertise": ["react"]}]
        }"#;
        let req: ProfileMatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.candidates[0].tags, vec!["react"]);
    }
}
