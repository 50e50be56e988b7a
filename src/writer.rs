use crate::error::{LangError, LangResult};
use crate::types::Dictionary;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

/// How dictionaries are written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub atomic: bool,
    pub create_dirs: bool,
    pub pretty: bool,
}

/// Serialize a dictionary. Compact by default; non-ASCII stays literal.
pub fn to_json(dict: &Dictionary, pretty: bool) -> LangResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(dict)?
    } else {
        serde_json::to_string(dict)?
    };
    Ok(json)
}

/// Write the dictionaries of one sheet, overwriting existing files.
///
/// With `atomic`, every file is staged next to its target first and the
/// renames only start once all of them are written.
pub fn write_dictionaries(
    files: &[(PathBuf, &Dictionary)],
    options: WriteOptions,
) -> LangResult<Vec<PathBuf>> {
    let mut rendered = Vec::with_capacity(files.len());
    for (path, dict) in files {
        rendered.push((path, to_json(dict, options.pretty)?));
    }

    if options.create_dirs {
        for (path, _) in &rendered {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    if !options.atomic {
        for (path, json) in &rendered {
            fs::write(path, json).map_err(|e| with_path(e, path))?;
            info!(path = %path.display(), "wrote dictionary");
        }
        return Ok(files.iter().map(|(p, _)| p.clone()).collect());
    }

    let mut staged = Vec::with_capacity(rendered.len());
    for (path, json) in &rendered {
        staged.push((*path, stage(path, json)?));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (path, temp) in staged {
        temp.persist(path).map_err(|e| with_path(e.error, path))?;
        info!(path = %path.display(), "wrote dictionary");
        written.push(path.clone());
    }
    Ok(written)
}

/// Write `json` to a temp file in the target's directory
fn stage(path: &Path, json: &str) -> LangResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Same mode a plain `fs::write` would give: the target's current mode,
    // or 0666 minus the umask for a new file.
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp = builder.tempfile_in(dir).map_err(|e| with_path(e, path))?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| with_path(e, path))?;
    }

    temp.write_all(json.as_bytes())?;
    temp.flush()?;
    Ok(temp)
}

fn with_path(e: std::io::Error, path: &Path) -> LangError {
    LangError::Io(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}
