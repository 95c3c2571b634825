use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs;

/// What a request URI names on disk, computed fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    RegularFile {
        path: PathBuf,
        last_modified: SystemTime,
        size: u64,
    },
    /// Immediate children as raw path strings, sorted
    Directory { children: Vec<String> },
    Missing,
}

/// Joins `root` and `uri` by plain string concatenation.
///
/// No normalization happens here: `..` segments and symlinks are followed as
/// the filesystem resolves them, so a crafted URI can reach files outside
/// `root`. Only expose the server to trusted clients.
pub fn resource_path(root: &Path, uri: &str) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push(uri);
    PathBuf::from(joined)
}

/// Resolves a URI against the served root.
///
/// A path that does not exist is `Missing`, including one that descends
/// through a regular file. Any other filesystem error is returned to the
/// caller.
pub async fn resolve(root: &Path, uri: &str) -> io::Result<Resource> {
    let path = resource_path(root, uri);

    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Ok(Resource::Missing);
        }
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        let mut children = Vec::new();
        let mut entries = fs::read_dir(&path).await?;
        while let Some(entry) = entries.next_entry().await? {
            children.push(entry.path().display().to_string());
        }
        children.sort();
        return Ok(Resource::Directory { children });
    }

    Ok(Resource::RegularFile {
        path,
        last_modified: metadata.modified()?,
        size: metadata.len(),
    })
}
