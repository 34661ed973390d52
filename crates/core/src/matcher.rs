//! Filename suffix matching

/// Return the first suffix in `suffixes` that `name` ends with
///
/// List order decides ties: with `[".txt", "file.txt"]` a file named
/// `file.txt` matches on `.txt`.
pub fn match_suffix<'a, S>(name: &str, suffixes: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    suffixes
        .iter()
        .map(AsRef::as_ref)
        .find(|suffix| name.ends_with(*suffix))
}

/// Check whether `name` ends with any of `suffixes`
pub fn matches_any<S: AsRef<str>>(name: &str, suffixes: &[S]) -> bool {
    match_suffix(name, suffixes).is_some()
}
