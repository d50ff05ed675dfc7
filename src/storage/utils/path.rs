// Path mapping between the local filesystem and the remote key namespace
use std::path::Path;

/// Map a local path to its remote key under the configured bucket.
///
/// Ambient process state (`cwd`, `home`) is passed in as parameters so the
/// mapping stays pure and testable. The rules are:
/// - empty `local_path` means the current working directory
/// - a leading `~` is replaced with `home`
/// - a leading `/` is taken as already absolute
/// - anything else is joined onto `cwd`
///
/// The configured `prefix` is then removed as a literal substring, first
/// occurrence only and not anchored to a path boundary. A prefix that matches
/// mid-name corrupts the key; that behavior is intentional and pinned by
/// tests rather than fixed. When the prefix does not occur at all, the
/// absolute path passes through unchanged, which yields a double slash after
/// the bucket.
pub fn map_path(
    local_path: &str,
    cwd: &str,
    home: &str,
    prefix: &str,
    scheme: &str,
    bucket: &str,
) -> String {
    let absolute = resolve_local_path(local_path, cwd, home);
    format!("{scheme}://{bucket}/{}", strip_prefix_once(&absolute, prefix))
}

/// Resolve a CLI path argument to an absolute path string.
pub fn resolve_local_path(local_path: &str, cwd: &str, home: &str) -> String {
    if local_path.is_empty() {
        cwd.to_string()
    } else if let Some(rest) = local_path.strip_prefix('~') {
        format!("{home}{rest}")
    } else if local_path.starts_with('/') {
        local_path.to_string()
    } else {
        format!("{cwd}/{local_path}")
    }
}

/// In-bucket key for operator calls: the cleaned path with any leading `/`
/// trimmed, since operator paths are bucket-relative.
pub fn bucket_key(absolute: &str, prefix: &str) -> String {
    strip_prefix_once(absolute, prefix)
        .trim_start_matches('/')
        .to_string()
}

fn strip_prefix_once(absolute: &str, prefix: &str) -> String {
    absolute.replacen(prefix, "", 1)
}

/// Build a remote path by joining base and file name.
pub fn build_remote_path(base: &str, file_name: &str) -> String {
    Path::new(base)
        .join(file_name)
        .to_string_lossy()
        .to_string()
}

/// Return a new String that guarantees a trailing '/'.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Get relative path string considering the root directory between a full path and base path.
pub fn get_root_relative_path(full_path: &str, base_path: &str) -> String {
    let full_path = Path::new(full_path.trim_start_matches('/'));
    let base_path = Path::new(base_path.trim_start_matches('/'));

    if full_path == base_path {
        // For single-file case, return the file name to avoid empty relative path
        return Path::new(full_path)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    full_path
        .strip_prefix(base_path)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| {
            full_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        })
}
