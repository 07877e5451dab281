//! Profile input and generated output for the message generator.

use serde::{Deserialize, Serialize};

/// LinkedIn profile details a personalized message is generated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedInProfile {
    pub name: String,
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
}

impl Default for LinkedInProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            job_title: "Software Engineer".to_string(),
            company: "TechCorp".to_string(),
            location: "San Francisco, CA".to_string(),
            summary: "Experienced in AI & ML with 5+ years of experience in developing scalable applications."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedMessage {
    pub message: String,
}
