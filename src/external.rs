//! Configuration belonging to other content tools found in the repository.
//!
//! Only Decap CMS (formerly Netlify CMS) is recognised. Its config is hosted
//! alongside the site, so it can live in any `admin/` folder.

use crate::data::{ReadFile, parse_data_file, string_at};
use crate::paths::{join, normalise_path};
use crate::types::Paths;
use serde_json::Value;
use tracing::debug;

const DECAP_CONFIG_SUFFIX: &str = "admin/config.yml";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalConfig {
    pub decap: Option<Value>,
}

impl ExternalConfig {
    /// Parses the Decap config if exactly one candidate file exists.
    ///
    /// Several candidates are ambiguous and yield nothing, as do unreadable or
    /// malformed files.
    pub fn parse(file_paths: &[String], reader: Option<&dyn ReadFile>) -> Self {
        let Some(reader) = reader else {
            return Self::default();
        };

        let candidates: Vec<&String> = file_paths
            .iter()
            .filter(|path| path.ends_with(DECAP_CONFIG_SUFFIX))
            .collect();
        let [config_path] = candidates.as_slice() else {
            return Self::default();
        };

        match parse_data_file(config_path, reader) {
            Ok(decap) => Self { decap },
            Err(e) => {
                debug!(path = %config_path, error = %e, "skipping malformed Decap config");
                Self::default()
            }
        }
    }

    /// Folder paths of Decap folder collections, normalised.
    pub fn decap_folders(&self) -> Vec<String> {
        let Some(collections) = self
            .decap
            .as_ref()
            .and_then(|decap| decap.get("collections"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        collections
            .iter()
            .filter_map(|collection| collection.get("folder")?.as_str())
            .map(normalise_path)
            .collect()
    }

    /// Static and upload paths implied by Decap's media settings.
    ///
    /// `public_folder` defaults to `media_folder`. When the media folder ends
    /// with the public folder, whatever comes before it is the static folder.
    pub fn decap_paths(&self) -> Option<Paths> {
        let decap = self.decap.as_ref();
        let media_folder = normalise_path(string_at(decap, &["media_folder"]).unwrap_or(""));
        if media_folder.is_empty() {
            return None;
        }

        let public_folder = match normalise_path(string_at(decap, &["public_folder"]).unwrap_or(""))
        {
            folder if folder.is_empty() => media_folder.clone(),
            folder => folder,
        };

        if media_folder != public_folder && !media_folder.ends_with(&format!("/{public_folder}")) {
            return None;
        }

        let static_len = media_folder
            .len()
            .saturating_sub(public_folder.len() + 1);
        let static_path = media_folder[..static_len].to_string();
        let uploads = join(&[static_path.as_str(), public_folder.as_str()]);

        Some(Paths {
            static_path,
            uploads,
        })
    }
}
