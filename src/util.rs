use time::OffsetDateTime;

pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// Single-line content excerpt for the details panel.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_label(&flattened, max_chars)
}

pub fn format_date(timestamp: OffsetDateTime) -> String {
    timestamp.date().to_string()
}

#[cfg(test)]
mod tests {
    use super::{excerpt, truncate_label};

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_label("weekly plan", 18), "weekly plan");
    }

    #[test]
    fn long_labels_get_an_ellipsis() {
        assert_eq!(truncate_label("abcdefgh", 4), "abcd…");
    }

    #[test]
    fn excerpt_flattens_whitespace() {
        assert_eq!(excerpt("first\nsecond\t third", 40), "first second third");
    }
}
