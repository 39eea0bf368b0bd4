use crate::domain::{PaneVisibility, ViewMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// View preferences stored in meta.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub pane_visibility: PaneVisibility,
    /// Projects filtered out of the calendar and agenda
    #[serde(default)]
    pub hidden_projects: Vec<String>,
}

impl AppMetadata {
    pub fn toggle_project(&mut self, project_id: &str) {
        if let Some(pos) = self.hidden_projects.iter().position(|id| id == project_id) {
            self.hidden_projects.remove(pos);
        } else {
            self.hidden_projects.push(project_id.to_string());
        }
    }
}

/// Load app metadata, `None` if meta.json doesn't exist yet
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<Option<AppMetadata>> {
    let path = path.as_ref();
    let Some(content) = crate::persistence::read_file(path)? else {
        return Ok(None);
    };
    let metadata = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metadata: {}", path.display()))?;
    Ok(Some(metadata))
}

pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
