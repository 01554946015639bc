//! Slack `mrkdwn` helpers.
//!
//! Every helper leaves an empty string untouched so optional parts of a
//! message can be formatted unconditionally.

/// Wraps `s` in `*...*`.
///
/// ```
/// assert_eq!(slackbot_core::markup::bold("hi"), "*hi*");
/// assert_eq!(slackbot_core::markup::bold(""), "");
/// ```
pub fn bold(s: &str) -> String {
    enclose(s, '*')
}

/// Wraps `s` in `_..._`.
pub fn italic(s: &str) -> String {
    enclose(s, '_')
}

/// Wraps `s` in parentheses.
pub fn parenthesize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    format!("({s})")
}

fn enclose(s: &str, marker: char) -> String {
    if s.is_empty() {
        return String::new();
    }
    format!("{marker}{s}{marker}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesize() {
        assert_eq!(parenthesize("test"), "(test)");
        assert_eq!(parenthesize(""), "");
    }

    #[test]
    fn test_nested_markers() {
        assert_eq!(bold(&italic("message")), "*_message_*");
        assert_eq!(italic(""), "");
    }
}
