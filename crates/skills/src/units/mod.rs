pub mod linkedin;
pub mod report;
pub mod smart_home;

pub use linkedin::LinkedInPostSkill;
pub use report::ReportSkill;
pub use smart_home::SmartHomeSkill;

/// Strip known trigger phrases and filler from user input to recover the
/// subject of the request. Falls back to the given default when nothing
/// meaningful remains.
pub(crate) fn extract_topic(input: &str, triggers: &[String], fallback: &str) -> String {
    let mut topic = input.to_lowercase();
    for trigger in triggers {
        topic = topic.replace(&trigger.to_lowercase(), " ");
    }
    let topic = topic
        .split_whitespace()
        .filter(|w| !matches!(*w, "about" | "on" | "please" | "a" | "an" | "the" | "for" | "me"))
        .collect::<Vec<_>>()
        .join(" ");
    if topic.is_empty() {
        fallback.to_string()
    } else {
        topic
    }
}

/// Keep only filename-safe characters, truncated to `max_chars`.
pub(crate) fn safe_file_stem(topic: &str, max_chars: usize) -> String {
    topic
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .take(max_chars)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_topic_strips_trigger() {
        let triggers = vec!["write report".to_string()];
        assert_eq!(
            extract_topic("write report about quarterly sales", &triggers, "notes"),
            "quarterly sales"
        );
    }

    #[test]
    fn test_extract_topic_fallback() {
        let triggers = vec!["write report".to_string()];
        assert_eq!(extract_topic("write report", &triggers, "notes"), "notes");
    }

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("q3: sales / growth!", 30), "q3_sales_growth");
        assert_eq!(safe_file_stem("a very long topic name here", 10), "a_very_lon");
    }
}
