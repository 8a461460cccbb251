const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// Moves a leading English article to the end, library sort style:
/// "The Hobbit" becomes "Hobbit, The". Only the first word is considered and
/// words are split on single spaces, so runs of spaces are kept as-is.
pub fn normalize_title(title: Option<&str>) -> Option<String> {
    let title = title?;
    let (first, rest) = title.split_once(' ').unwrap_or((title, ""));
    if ARTICLES.iter().any(|a| first.eq_ignore_ascii_case(a)) {
        Some(format!("{}, {}", rest, first))
    } else {
        Some(title.to_string())
    }
}
