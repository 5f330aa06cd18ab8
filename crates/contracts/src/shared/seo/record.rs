/// Borrowed view of a scored entity (collection, category or CMS page).
///
/// Every field may be absent; `None` and an empty string score the same.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentRecord<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub keywords: &'a [String],
    pub content: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub is_published: bool,
}

impl<'a> ContentRecord<'a> {
    pub fn title_len(&self) -> usize {
        char_len(self.title)
    }

    pub fn description_len(&self) -> usize {
        char_len(self.description)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn content_len(&self) -> usize {
        char_len(self.content)
    }

    pub fn slug(&self) -> &'a str {
        self.slug.unwrap_or("")
    }
}

fn char_len(value: Option<&str>) -> usize {
    value.map(|s| s.chars().count()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_have_same_length() {
        let absent = ContentRecord::default();
        let empty = ContentRecord {
            title: Some(""),
            content: Some(""),
            slug: Some(""),
            ..Default::default()
        };
        assert_eq!(absent.title_len(), empty.title_len());
        assert_eq!(absent.content_len(), 0);
        assert_eq!(empty.slug(), "");
    }

    #[test]
    fn test_length_counts_characters() {
        let record = ContentRecord {
            title: Some("Обувь"),
            ..Default::default()
        };
        assert_eq!(record.title_len(), 5);
    }
}
