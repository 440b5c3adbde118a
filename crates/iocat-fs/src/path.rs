//! Path name validation
//!
//! Filesystem names are slash-separated and relative to the filesystem root,
//! whatever the host platform uses.

/// Reports whether `name` is a valid filesystem name.
///
/// Valid names are unrooted, slash-separated sequences of elements, where no
/// element is empty, `.` or `..`. The name `.` alone denotes the root.
///
/// ```
/// use iocat_fs::is_valid_path;
///
/// assert!(is_valid_path("."));
/// assert!(is_valid_path("dir/file.txt"));
/// assert!(!is_valid_path("/etc/passwd"));
/// assert!(!is_valid_path("dir/../file.txt"));
/// ```
pub fn is_valid_path(name: &str) -> bool {
    if name == "." {
        return true;
    }
    name.split('/')
        .all(|element| !element.is_empty() && element != "." && element != "..")
}

/// Reports whether `s` contains characters that Windows treats as path
/// separators or drive markers.
pub(crate) fn contains_deny_win(s: &str) -> bool {
    s.contains(['\\', ':'])
}

/// Validity of names resolved against a host directory.
pub(crate) fn is_valid_host_path(name: &str) -> bool {
    is_valid_path(name) && !(cfg!(windows) && contains_deny_win(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        for name in [".", "x", "x/y", "x/y/z.txt", "..x", "x..", "a b/c"] {
            assert!(is_valid_path(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_paths() {
        for name in ["", "/", "/x", "x/", "x//y", "./x", "x/.", "x/./y", "..", "../x", "x/.."] {
            assert!(!is_valid_path(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_contains_deny_win() {
        assert!(contains_deny_win(r"dir\file"));
        assert!(contains_deny_win("c:file"));
        assert!(!contains_deny_win("dir/file"));
    }

    #[test]
    fn test_host_paths_follow_platform() {
        assert!(is_valid_host_path("dir/file"));
        assert!(is_valid_host_path("*.txt"));
        assert!(!is_valid_host_path("../file"));
        assert!(!is_valid_host_path("../*"));
        assert_eq!(is_valid_host_path(r"dir\file"), !cfg!(windows));
        assert_eq!(is_valid_host_path(r"a\..\x"), !cfg!(windows));
        assert_eq!(is_valid_host_path("c:x"), !cfg!(windows));
    }
}
