use std::sync::OnceLock;

use regex::Regex;

/// Substitute `{{ env.VAR }}` placeholders in raw config text
///
/// An optional fallback can ride along as
/// `{{ env.VAR | default("fallback") }}`; it is used when the variable is
/// unset instead of failing the load. Substitution happens on the raw TOML
/// before deserialization, so the config structs stay plain
/// String/SecretString. Comment lines (leading `#`) are left alone, which
/// keeps commented-out keys from demanding variables nobody set.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1 is the scoped key (`env.VAR_NAME`), group 2 the optional
        // fallback inside default("...")
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (line_no, line) in input.lines().enumerate() {
        if line_no > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut expanded = String::with_capacity(line.len());
        let mut cursor = 0;

        for captures in placeholder().captures_iter(line) {
            let whole = captures.get(0).unwrap();
            let key = captures.get(1).unwrap().as_str();
            let fallback = captures.get(2).map(|m| m.as_str());

            expanded.push_str(&line[cursor..whole.start()]);

            let mut segments = key.split('.');
            match (segments.next(), segments.next(), segments.next()) {
                (Some("env"), Some(var_name), None) => match std::env::var(var_name) {
                    Ok(value) => expanded.push_str(&value),
                    Err(_) => match fallback {
                        Some(default) => expanded.push_str(default),
                        None => {
                            return Err(format!("environment variable not found: `{var_name}`"));
                        }
                    },
                },
                _ => {
                    return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
                }
            }

            cursor = whole.end();
        }

        expanded.push_str(&line[cursor..]);
        output.push_str(&expanded);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
