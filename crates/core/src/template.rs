//! Minimal prompt-template rendering.
//!
//! Templates use `{name}` placeholders. `{{` and `}}` escape literal braces.
//! Rendering fails on a placeholder with no matching variable and on an
//! unterminated placeholder, so malformed templates surface as
//! [`TemplateError`] instead of silently producing a broken prompt.

use crate::error::TemplateError;

/// Render `template`, substituting each `{name}` with its value from `vars`.
pub fn render_template(
    template: &str,
    vars: &[(&str, &str)],
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnclosedPlaceholder { offset });
                }
                let value = vars
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or(TemplateError::UnknownPlaceholder { name })?;
                out.push_str(value);
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}
