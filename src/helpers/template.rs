use crate::config::constants::FILE_PATH_PLACEHOLDER;

/// Replaces every literal `{filePath}` in `template` with `file_path`.
pub fn fill_file_path(template: &str, file_path: &str) -> String {
    template.replace(FILE_PATH_PLACEHOLDER, file_path)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitutes `{{NAME}}` markers in one pass, so substituted values are
/// never scanned for further markers. Unknown markers are left as they are.
pub fn render_markers(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after_open[..end];
        match values.iter().find(|(marker, _)| *marker == name) {
            Some((_, value)) => rendered.push_str(value),
            None => {
                rendered.push_str("{{");
                rendered.push_str(name);
                rendered.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    rendered.push_str(rest);
    rendered
}
