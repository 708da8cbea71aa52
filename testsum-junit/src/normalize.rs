// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

static PATH_SEPARATOR: char = '/';

/// Converts a path-style package name into the `.`-separated form JUnit consumers expect.
///
/// The first `strip` path segments of `name` are removed, then `prefix` is prepended. If `strip`
/// exceeds the number of segments, nothing of `name` is kept.
///
/// JUnit assumes Java-style package names, and Jenkins renders them as a hierarchy split on `.`.
/// A package like `github.com/foo/bar` would otherwise show up as `github` → `com/foo/bar`. To
/// avoid this every `.` becomes `-`, and then every `/` becomes `.`: `github.com/foo/bar` turns
/// into `github-com.foo.bar`.
///
/// The conversion is one-way: distinct names such as `a.b/c` and `a-b/c` map to the same output.
///
/// ```
/// use testsum_junit::normalize_package_name;
///
/// assert_eq!(normalize_package_name("github.com/foo/bar", 0, ""), "github-com.foo.bar");
/// assert_eq!(normalize_package_name("github.com/foo/bar", 1, "corp"), "corp.foo.bar");
/// ```
pub fn normalize_package_name(name: &str, strip: usize, prefix: &str) -> String {
    let stripped = strip_path_segments(name, strip);
    let joined = join_path([prefix, stripped]);
    joined.replace('.', "-").replace(PATH_SEPARATOR, ".")
}

/// Removes the first `strip` `/`-separated segments of `name`.
///
/// Returns an empty string if `name` has `strip` or fewer segments.
pub fn strip_path_segments(name: &str, strip: usize) -> &str {
    if strip == 0 {
        return name;
    }
    match name.match_indices(PATH_SEPARATOR).nth(strip - 1) {
        Some((index, _)) => &name[index + 1..],
        None => "",
    }
}

// Joins the non-empty parts with `/` and cleans the result lexically: empty and `.` segments are
// dropped, `..` removes the segment before it, and a leading `/` is kept. A result that cleans
// away to nothing is `.`, or `/` if rooted. If every part is empty the result is empty.
fn join_path<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = parts.into_iter().filter(|part| !part.is_empty()).collect();
    let Some(first) = parts.first() else {
        return String::new();
    };
    let rooted = first.starts_with(PATH_SEPARATOR);

    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|part| part.split(PATH_SEPARATOR)) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` at the root stays at the root.
                _ if rooted => {}
                _ => segments.push(".."),
            },
            segment => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("{PATH_SEPARATOR}{joined}"),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}
