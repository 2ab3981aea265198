//! Filename splitting with compound extension support.

/// Path separator recognized by the splitter.
pub const SEPARATOR: char = '/';

/// Multi-part extensions that are matched as a whole, in priority order.
pub const SPECIAL_EXTENSIONS: &[&str] = &[".nii.gz", ".tar.gz"];

/// A path broken into directory, base name and extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilenameParts {
    pub directory: String,
    pub stem: String,
    pub extension: String,
}

impl FilenameParts {
    /// Base filename including the extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.stem, self.extension)
    }

    /// Naively rejoin the parts into a path.
    pub fn join(&self) -> String {
        if self.directory.is_empty() {
            self.file_name()
        } else if self.directory.ends_with(SEPARATOR) {
            format!("{}{}", self.directory, self.file_name())
        } else {
            format!("{}{}{}", self.directory, SEPARATOR, self.file_name())
        }
    }
}

/// Filename splitter with a configurable list of compound extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    special_extensions: Vec<String>,
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(SPECIAL_EXTENSIONS.iter().map(|ext| ext.to_string()))
    }
}

impl Splitter {
    /// Create a splitter that checks the given extensions in order.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(special_extensions: I) -> Self {
        Self {
            special_extensions: special_extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Extensions checked before falling back to a last-dot split.
    pub fn special_extensions(&self) -> &[String] {
        &self.special_extensions
    }

    /// Split a path into directory, stem and extension.
    ///
    /// One trailing separator is ignored. Special extensions match
    /// case-insensitively but keep the casing of the input, and only when
    /// something remains for the stem.
    pub fn split(&self, path: &str) -> FilenameParts {
        let path = path.strip_suffix(SEPARATOR).unwrap_or(path);
        let (directory, name) = split_directory(path);

        for special in &self.special_extensions {
            if let Some(stem_len) = special_suffix_start(name, special) {
                let (stem, extension) = name.split_at(stem_len);
                return FilenameParts {
                    directory: directory.to_string(),
                    stem: stem.to_string(),
                    extension: extension.to_string(),
                };
            }
        }

        let (stem, extension) = split_extension(name);
        FilenameParts {
            directory: directory.to_string(),
            stem: stem.to_string(),
            extension: extension.to_string(),
        }
    }
}

/// Split a path using the default special extensions.
///
/// ```
/// use statmap_vault::fs::split_filename;
///
/// let parts = split_filename("/home/data/subject.nii.gz");
/// assert_eq!(parts.directory, "/home/data");
/// assert_eq!(parts.stem, "subject");
/// assert_eq!(parts.extension, ".nii.gz");
/// ```
pub fn split_filename(path: &str) -> FilenameParts {
    Splitter::default().split(path)
}

/// Split off the last path component.
///
/// Trailing separators are trimmed from the directory unless it is made of
/// separators only (the root).
fn split_directory(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(pos) => {
            let head = &path[..=pos];
            let name = &path[pos + 1..];
            let trimmed = head.trim_end_matches(SEPARATOR);
            if trimmed.is_empty() {
                (head, name)
            } else {
                (trimmed, name)
            }
        }
        None => ("", path),
    }
}

/// Byte offset where `special` starts in `name`, if `name` ends with it and is longer.
fn special_suffix_start(name: &str, special: &str) -> Option<usize> {
    if name.len() <= special.len() {
        return None;
    }
    let start = name.len() - special.len();
    if !name.is_char_boundary(start) {
        return None;
    }
    name[start..]
        .eq_ignore_ascii_case(special)
        .then_some(start)
}

/// Split at the last dot, treating leading dots as part of the stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if name[..pos].chars().any(|c| c != '.') => name.split_at(pos),
        _ => (name, ""),
    }
}
