//! Output path resolution
//!
//! Turns whatever the user typed (or dragged into the terminal) at the output prompt
//! into a concrete `.png` file path. Resolution never fails and never touches the
//! filesystem beyond checking whether the path is an existing directory; parent
//! directories are created by the pipeline at save time.

pub mod shell;

pub use shell::{ShellSplitError, split, unquote};

use chrono::{DateTime, Local, TimeZone};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Prefix of automatically generated output file names
pub const FILE_PREFIX: &str = "qr_";

/// Extension every output path is forced to
pub const PNG_EXTENSION: &str = "png";

/// Resolve raw user input into an output file path, using the current directory and clock.
pub fn resolve(raw_input: &str) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_with(raw_input, &cwd, &Local::now())
}

/// Resolve raw user input against an explicit working directory and timestamp.
pub fn resolve_with<Tz>(raw_input: &str, cwd: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return cwd.join(timestamped_name(now));
    }

    let word = unquote(trimmed)
        .into_iter()
        .next()
        .unwrap_or_else(|| trimmed.to_string());

    // `''` or `""` names the empty path, i.e. the current directory
    if word.is_empty() {
        return cwd.join(timestamped_name(now));
    }

    if ends_with_separator(&word) || Path::new(&word).is_dir() {
        return PathBuf::from(word).join(timestamped_name(now));
    }

    with_png_extension(PathBuf::from(word))
}

/// `qr_<YYYYMMDD_HHMMSS>.png` for the given instant.
pub fn timestamped_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{FILE_PREFIX}{}.{PNG_EXTENSION}",
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Whether a file name looks like one produced by [`timestamped_name`].
pub fn is_timestamped_name(name: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(".png"))
    else {
        return false;
    };

    let bytes = stamp.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(MAIN_SEPARATOR)
}

fn with_png_extension(mut path: PathBuf) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PNG_EXTENSION));

    if !is_png {
        path.set_extension(PNG_EXTENSION);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn fixed_now() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn timestamped_name_format() {
        let name = timestamped_name(&fixed_now());
        assert_eq!(name, "qr_20240309_070542.png");
        assert!(is_timestamped_name(&name));
        assert!(!is_timestamped_name("qr_2024_0309.png"));
        assert!(!is_timestamped_name("logo.png"));
    }

    #[test]
    fn empty_input_lands_in_cwd() {
        let cwd = Path::new("/work");
        let now = fixed_now();
        assert_eq!(
            resolve_with("", cwd, &now),
            PathBuf::from("/work/qr_20240309_070542.png")
        );
        assert_eq!(
            resolve_with("  \t ", cwd, &now),
            PathBuf::from("/work/qr_20240309_070542.png")
        );
    }

    #[test]
    fn existing_directory_gets_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_str().unwrap();
        let resolved = resolve_with(raw, Path::new("/unused"), &fixed_now());

        assert_eq!(resolved.parent(), Some(dir.path()));
        let name = resolved.file_name().unwrap().to_str().unwrap();
        assert!(is_timestamped_name(name));
    }

    #[test]
    fn quoted_directory_is_unquoted() {
        let dir = tempfile::tempdir().unwrap();
        let spaced = dir.path().join("my qr codes");
        std::fs::create_dir(&spaced).unwrap();

        let raw = format!("'{}' ", spaced.display());
        let resolved = resolve_with(&raw, Path::new("/unused"), &fixed_now());
        assert_eq!(resolved, spaced.join("qr_20240309_070542.png"));
    }

    #[test]
    fn trailing_separator_means_directory() {
        let resolved = resolve_with("/not/yet/there/", Path::new("/work"), &fixed_now());
        assert_eq!(
            resolved,
            PathBuf::from("/not/yet/there/qr_20240309_070542.png")
        );
    }

    #[test]
    fn extension_is_replaced_or_appended() {
        let now = fixed_now();
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_with("/tmp/code.jpg", cwd, &now),
            PathBuf::from("/tmp/code.png")
        );
        assert_eq!(
            resolve_with("/tmp/code", cwd, &now),
            PathBuf::from("/tmp/code.png")
        );
        assert_eq!(
            resolve_with("\"/tmp/my code.v2\"", cwd, &now),
            PathBuf::from("/tmp/my code.png")
        );
    }

    #[test]
    fn png_paths_are_unchanged() {
        let now = fixed_now();
        let cwd = Path::new("/work");
        for raw in ["/tmp/a.png", "/tmp/b.PNG", "relative/c.Png"] {
            assert_eq!(resolve_with(raw, cwd, &now), PathBuf::from(raw));
        }
    }

    #[test]
    fn empty_quotes_mean_current_directory() {
        let cwd = tempfile::tempdir().unwrap();
        let now = fixed_now();
        for raw in ["''", "\"\"", "  '' "] {
            assert_eq!(
                resolve_with(raw, cwd.path(), &now),
                cwd.path().join("qr_20240309_070542.png"),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn malformed_quoting_falls_back_to_raw() {
        let resolved = resolve_with("  /tmp/it's.png ", Path::new("/work"), &fixed_now());
        assert_eq!(resolved, PathBuf::from("/tmp/it's.png"));
    }

    #[test]
    fn resolve_uses_current_directory() {
        let resolved = resolve("");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolved.parent(), Some(cwd.as_path()));
        assert!(is_timestamped_name(
            resolved.file_name().unwrap().to_str().unwrap()
        ));
    }
}
