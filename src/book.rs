#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Splits a full name on spaces and keeps the first two words. Anything
    /// past the second word is dropped; a one-word name has an empty last name.
    pub fn from_full_name(name: &str) -> Author {
        let mut names = name.split(' ');
        Author {
            first_name: names.next().unwrap_or_default().to_string(),
            last_name: names.next().unwrap_or_default().to_string(),
        }
    }
}

/// The reconciled record for one ISBN.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalBook {
    pub title: String,
    pub subtitle: String,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub isbn10: Option<String>,
    pub isbn13: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author: Option<Author>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_keeps_first_two_names() {
        let author = Author::from_full_name("F. Scott Fitzgerald");
        assert_eq!(author.first_name, "F.");
        assert_eq!(author.last_name, "Scott");
    }

    #[test]
    fn single_name_author() {
        let author = Author::from_full_name("Homer");
        assert_eq!(author.first_name, "Homer");
        assert_eq!(author.last_name, "");
    }
}
