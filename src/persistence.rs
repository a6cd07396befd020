//! Reading and writing the JSON files of the tracker.
//!
//! Files are always rewritten entirely: the content goes to a temporary
//! file next to the target, which is then renamed over it.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::TrackerError;

/// Reads a JSON file.
/// Returns `None` if the file doesn't exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, TrackerError> {
    trace!("Running persistence::load_json() on {}", path.display());
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} doesn't exist yet", path.display());
            return Ok(None);
        }
        Err(e) => return Err(TrackerError::persistence(path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| TrackerError::Serialization {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes a value as pretty printed JSON, replacing the file if any.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TrackerError> {
    trace!("Running persistence::save_json() on {}", path.display());
    let content =
        serde_json::to_string_pretty(value).map_err(|source| TrackerError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    save_text(path, &content)
}

/// Writes a text file, replacing it if any.
pub fn save_text(path: &Path, content: &str) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| TrackerError::persistence(parent, e))?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut file = File::create(tmp_path).map_err(|e| TrackerError::persistence(tmp_path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| TrackerError::persistence(tmp_path, e))?;
    fs::rename(tmp_path, path).map_err(|e| TrackerError::persistence(path, e))
}
