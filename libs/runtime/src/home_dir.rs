use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Resolve the application home directory.
///
/// - `None` → `<user home>/<default_subdir>`
/// - `~` / `~/rest` → expanded against the user home
/// - relative paths → joined to the current working directory
///
/// The result is always absolute; with `create` the directory is created.
pub fn resolve_home_dir(raw: Option<String>, default_subdir: &str, create: bool) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home directory"));

    let path = match raw.as_deref().map(str::trim) {
        None | Some("") => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(p) if p.starts_with("~/") || p.starts_with("~\\") => user_home()?.join(&p[2..]),
        Some(p) => absolute(Path::new(p))?,
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home dir '{}'", path.display()))?;
    }
    Ok(path)
}

fn absolute(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(p))
}
