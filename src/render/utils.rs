use crate::OutputDialect;

/**
 * Insert the dialect's line break element before every newline sequence.
 * `\r\n`, `\n\r`, `\n` and `\r` each count as one sequence and are kept in
 * the output.
 */
pub fn convert_line_breaks(text: &str, dialect: OutputDialect) -> String {
  let line_break = dialect.line_break();
  let mut answer = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      '\r' | '\n' => {
        answer.push_str(line_break);
        answer.push(c);
        if let Some(&next) = chars.peek() {
          if (next == '\r' || next == '\n') && next != c {
            answer.push(next);
            chars.next();
          }
        }
      }
      _ => answer.push(c),
    }
  }
  answer
}

/**
 * Escape `&`, `<`, `>` and both quote characters.
 */
pub fn escape_entities(text: &str) -> String {
  html_escape::encode_quoted_attribute(text).into_owned()
}

pub fn format_attributes(attributes: &[(String, String)]) -> String {
  attributes
    .iter()
    .map(|(name, value)| format!(" {}=\"{}\"", name, value))
    .collect()
}

/**
 * Replace the value of `name` in place, or append it.
 */
pub fn set_attribute(attributes: &mut Vec<(String, String)>, name: &str, value: String) {
  match attributes.iter_mut().find(|(key, _)| key == name) {
    Some(entry) => entry.1 = value,
    None => attributes.push((name.to_owned(), value)),
  }
}
