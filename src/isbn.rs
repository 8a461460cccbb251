/// Strips hyphens and spaces from user input and checks the result has the
/// shape of an ISBN-10 (nine digits and a digit or `X`) or an ISBN-13.
/// Check digits are not verified; the catalogs are the judge of that.
pub fn clean_isbn(input: &str) -> Option<String> {
    let isbn: String = input
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let valid = match isbn.len() {
        10 => {
            let (body, check) = isbn.split_at(9);
            body.chars().all(|c| c.is_ascii_digit())
                && check.chars().all(|c| c.is_ascii_digit() || c == 'X')
        }
        13 => isbn.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    };
    if valid {
        Some(isbn)
    } else {
        None
    }
}
