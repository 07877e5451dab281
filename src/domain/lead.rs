use serde::{Deserialize, Serialize};

/// A single outreach lead captured through the lead form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Lead {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, rename = "jobTitle")]
    pub job_title: String,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_job_title_rename() {
        let lead = Lead {
            job_title: "CTO".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["jobTitle"], "CTO");
    }
}
