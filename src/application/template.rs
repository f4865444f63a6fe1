//! New schema files from a template

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::path::SCHEMA_EXTENSION;
use crate::error::{ProtosyncError, ProtosyncResult};

/// Default file name (without extension) for new schemas
pub const DEFAULT_SCHEMA_NAME: &str = "NewProtobuf";

/// Boilerplate written into new schema files
pub const PROTOBUF_TEMPLATE: &str = "\
syntax = \"proto3\";
option optimize_for = LITE_RUNTIME;

package main;

message NewMessege
{
   string NewField = 1;
}
";

const MAX_ATTEMPTS: usize = 10_000;

/// Write the template to `<dir>/<name>.proto`.
///
/// Existing files are never overwritten: if the name is taken, `<name> 1`,
/// `<name> 2`, ... are tried in turn. Returns the path written.
pub fn create_schema_file(dir: &Path, name: Option<&str>) -> ProtosyncResult<PathBuf> {
    if !dir.is_dir() {
        return Err(ProtosyncError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let name = name.unwrap_or(DEFAULT_SCHEMA_NAME);
    let stem = name
        .strip_suffix(&format!(".{}", SCHEMA_EXTENSION))
        .unwrap_or(name);

    for attempt in 0..MAX_ATTEMPTS {
        let path = dir.join(candidate_name(stem, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(PROTOBUF_TEMPLATE.as_bytes())?;
                tracing::info!("created {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(ProtosyncError::FileExists {
        path: dir.join(candidate_name(stem, 0)),
    })
}

fn candidate_name(stem: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{}.{}", stem, SCHEMA_EXTENSION)
    } else {
        format!("{} {}.{}", stem, attempt, SCHEMA_EXTENSION)
    }
}
