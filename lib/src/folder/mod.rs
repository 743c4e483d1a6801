//! Resources to manipulate Grafana folders

pub mod delete;
pub mod list;

/// The folder Grafana creates by default, it cannot be deleted.
pub const GENERAL: &str = "General";

/// A structure representing a folder on Grafana
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Folder {
    /// Numerical identifier, omitted by some Grafana versions
    #[serde(default)]
    pub id: Option<u64>,
    /// Stable identifier used to address the folder in the API
    pub uid: String,
    /// Display name
    pub title: String,
}

impl Folder {
    pub fn new<U: Into<String>, T: Into<String>>(uid: U, title: T) -> Self {
        Self {
            id: None,
            uid: uid.into(),
            title: title.into(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.title == GENERAL
    }
}
