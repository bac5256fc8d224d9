//! Post-session naming: ask for a category and a title, then move the file
//! into `<documents>/<category>/<title>.txt`.

use chrono::{DateTime, Local};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Category used when the writer gives none.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// File name of a fresh session: `2026-10-19_14-03-52.txt`.
pub fn session_file_name(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S.txt").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub category: String,
    pub title: String,
}

impl Naming {
    /// Default category, keeping the given title.
    pub fn unsorted(title: impl Into<String>) -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            title: title.into(),
        }
    }
}

/// Lowercase, ASCII alphanumerics kept, every other run collapsed to `-`.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Subdirectories of the documents directory, sorted. Hidden ones (such as
/// `.git`) are skipped. A missing directory has no categories.
pub fn existing_categories(documents_dir: &Path) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(documents_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut categories = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with('.') {
                categories.push(name.to_string());
            }
        }
    }
    categories.sort();
    Ok(categories)
}

/// Ask for a category and a title on a line-oriented terminal.
///
/// Blank answers fall back to [`DEFAULT_CATEGORY`] and `default_title`.
/// End of input counts as a blank answer.
pub fn prompt_naming<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    categories: &[String],
    default_title: &str,
) -> io::Result<Naming> {
    if !categories.is_empty() {
        writeln!(output, "Existing categories: {}", categories.join(", "))?;
    }
    let category = ask(input, output, &format!("Category [{}]: ", DEFAULT_CATEGORY))?;
    let title = ask(input, output, &format!("Title [{}]: ", default_title))?;

    let category = slugify(&category);
    let title = slugify(&title);
    Ok(Naming {
        category: if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        },
        title: if title.is_empty() {
            default_title.to_string()
        } else {
            title
        },
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Move `file` to `<documents>/<category>/<title>.txt`.
///
/// An existing file is never replaced: the title gets `-2`, `-3`, ...
/// until the name is free. Returns the final path.
pub fn relocate(file: &Path, documents_dir: &Path, naming: &Naming) -> io::Result<PathBuf> {
    let dir = documents_dir.join(&naming.category);
    fs::create_dir_all(&dir)?;
    let target = free_path(&dir, &naming.title);
    if target == file {
        return Ok(target);
    }

    if let Err(err) = fs::rename(file, &target) {
        // Cross-device moves cannot rename.
        tracing::debug!(error = %err, "rename failed, copying instead");
        fs::copy(file, &target)?;
        fs::remove_file(file)?;
    }
    tracing::info!(from = %file.display(), to = %target.display(), "session file relocated");
    Ok(target)
}

fn free_path(dir: &Path, title: &str) -> PathBuf {
    let first = dir.join(format!("{}.txt", title));
    if !first.exists() {
        return first;
    }
    (2u32..)
        .map(|n| dir.join(format!("{}-{}.txt", title, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}
