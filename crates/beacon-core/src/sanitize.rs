// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input sanitization for attacker-controlled text fields

/// Maximum accepted length of a queued command
pub const MAX_COMMAND_LEN: usize = 100;

/// Maximum accepted length of a client descriptor
pub const MAX_DESCRIPTOR_LEN: usize = 500;

/// Maximum accepted length of a declared data type tag
pub const MAX_TYPE_TAG_LEN: usize = 50;

/// Neutralize markup characters in a free-text field and cap its length.
///
/// The value may be rendered by downstream tooling, so angle brackets are
/// escaped rather than dropped. Escaping happens first: `max_len` is a
/// storage bound and must hold for the string that is actually stored.
pub fn sanitize_text(value: &str, max_len: usize) -> String {
    value
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .chars()
        .take(max_len)
        .collect()
}

/// Sanitize a command string before it is queued for a device.
///
/// Control characters are stripped so a command can never smuggle line breaks
/// or escape sequences into the agent-side dispatcher.
pub fn sanitize_command(command: &str) -> String {
    command
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_COMMAND_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_caps_length() {
        let long = "x".repeat(2 * MAX_DESCRIPTOR_LEN);
        assert_eq!(sanitize_text(&long, MAX_DESCRIPTOR_LEN).len(), MAX_DESCRIPTOR_LEN);
    }

    #[test]
    fn test_sanitize_text_escapes_markup() {
        assert_eq!(sanitize_text("<script>", 100), "&lt;script&gt;");
    }

    #[test]
    fn test_sanitize_text_cap_holds_after_escaping() {
        // Every bracket expands to a four-char entity; the cap must bound the
        // escaped form, not the input.
        let hostile = "<".repeat(MAX_DESCRIPTOR_LEN);
        let out = sanitize_text(&hostile, MAX_DESCRIPTOR_LEN);
        assert_eq!(out.chars().count(), MAX_DESCRIPTOR_LEN);
        assert!(out.starts_with("&lt;"));
    }

    #[test]
    fn test_sanitize_command_strips_control_characters() {
        assert_eq!(sanitize_command("status\r\n; rm\x07"), "status; rm");
    }

    #[test]
    fn test_sanitize_command_caps_length() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_command(&long).len(), MAX_COMMAND_LEN);
    }
}
