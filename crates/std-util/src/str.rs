/// Truncates `src` to at most `max` characters, never splitting a character.
pub fn truncate(src: &str, max: usize) -> &str {
    match src.char_indices().nth(max) {
        Some((end, _)) => &src[..end],
        None => src,
    }
}

/// Replaces `{key}` placeholders in `template` with the matching value.
///
/// Placeholders without a matching key are left in place.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();

    for (key, value) in vars {
        out = out.replace(&format!("{{{key}}}"), value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("straße", 5), "straß");
        assert_eq!(truncate("road", 63), "road");
        assert_eq!(truncate("road", 0), "");
    }

    #[test]
    fn fill_template_replaces_known_keys() {
        let out = fill_template("{class}_{property}", &[("class", "road"), ("property", "tags")]);
        assert_eq!(out, "road_tags");

        let out = fill_template("{class}_{other}", &[("class", "road")]);
        assert_eq!(out, "road_{other}");
    }
}
