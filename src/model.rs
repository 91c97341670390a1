use serde::{Deserialize, Serialize};

/// One parsed candidate profile.
///
/// Field order is the export order: the CSV header and JSON keys follow the
/// declaration below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    /// First comma-separated segment of the profile subtitle.
    pub position: String,
    pub ready_to_work: String,
    pub education: bool,
    pub additional_education: bool,
    /// Number of skill tags on the profile.
    pub skills: u32,
    pub english: bool,
    /// Absolute URL of the detail page.
    pub url: String,
}

/// Two records describe the same candidate when name, position and url agree.
/// The remaining fields are derived data and do not take part in identity.
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.position == other.position && self.url == other.url
    }
}

impl Eq for Candidate {}
