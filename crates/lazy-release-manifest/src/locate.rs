//! Byte spans of the values the writer edits.
//!
//! Only the top-level object and the objects directly below it are walked;
//! deeper values are skipped. Input is expected to be valid JSON, which the
//! writer checks with `serde_json` first.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StringValue {
    /// `["version"]` or `["dependencies", "react"]`.
    pub path: Vec<String>,
    /// Span between the quotes.
    pub span: Range<usize>,
}

pub(crate) fn string_values(text: &str) -> Option<Vec<StringValue>> {
    let mut scanner = Scanner {
        text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    let mut out = Vec::new();
    scanner.skip_whitespace();
    scanner.object(&[], 1, &mut out)?;
    Some(out)
}

pub(crate) fn find<'a>(values: &'a [StringValue], path: &[&str]) -> Option<&'a StringValue> {
    values
        .iter()
        .find(|value| value.path.iter().map(String::as_str).eq(path.iter().copied()))
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        (self.peek()? == byte).then(|| self.pos += 1)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn string(&mut self) -> Option<Range<usize>> {
        self.expect(b'"')?;
        let start = self.pos;
        loop {
            match self.peek()? {
                b'\\' => self.pos += 2,
                b'"' => {
                    let end = self.pos;
                    self.pos += 1;
                    return Some(start..end);
                }
                _ => self.pos += 1,
            }
        }
    }

    fn key(&mut self) -> Option<String> {
        let span = self.string()?;
        let quoted = &self.text[span.start - 1..=span.end];
        serde_json::from_str(quoted).ok()
    }

    fn skip_value(&mut self) -> Option<()> {
        match self.peek()? {
            b'"' => self.string().map(|_| ()),
            b'{' | b'[' => {
                let mut depth = 0usize;
                loop {
                    match self.peek()? {
                        b'"' => {
                            self.string()?;
                            continue;
                        }
                        b'{' | b'[' => depth += 1,
                        b'}' | b']' => {
                            depth -= 1;
                            if depth == 0 {
                                self.pos += 1;
                                return Some(());
                            }
                        }
                        _ => {}
                    }
                    self.pos += 1;
                }
            }
            _ => {
                while !matches!(
                    self.peek(),
                    None | Some(b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r')
                ) {
                    self.pos += 1;
                }
                Some(())
            }
        }
    }

    fn object(&mut self, prefix: &[String], descend: usize, out: &mut Vec<StringValue>) -> Option<()> {
        self.expect(b'{')?;
        loop {
            self.skip_whitespace();
            if self.peek()? == b'}' {
                self.pos += 1;
                return Some(());
            }

            let key = self.key()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();

            let mut path = prefix.to_vec();
            path.push(key);

            match self.peek()? {
                b'"' => {
                    let span = self.string()?;
                    out.push(StringValue { path, span });
                }
                b'{' if descend > 0 => self.object(&path, descend - 1, out)?,
                _ => self.skip_value()?,
            }

            self.skip_whitespace();
            match self.peek()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    return Some(());
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_top_level_and_nested_strings() {
        let text = r#"{"name":"a","version": "1.0.0","dependencies":{"b":"^1.0.0"}}"#;
        let values = string_values(text).expect("valid json");

        let version = find(&values, &["version"]).expect("version");
        assert_eq!(&text[version.span.clone()], "1.0.0");

        let dep = find(&values, &["dependencies", "b"]).expect("dependency");
        assert_eq!(&text[dep.span.clone()], "^1.0.0");
    }

    #[test]
    fn skips_arrays_and_deep_objects() {
        let text = r#"{
  "files": ["dist", "{not an object}"],
  "exports": { ".": { "version": "nested" } },
  "count": 3,
  "flag": true,
  "version": "2.0.0"
}"#;
        let values = string_values(text).expect("valid json");

        let version = find(&values, &["version"]).expect("version");
        assert_eq!(&text[version.span.clone()], "2.0.0");
        assert!(find(&values, &["exports", ".", "version"]).is_none());
    }

    #[test]
    fn handles_escaped_quotes() {
        let text = r#"{"description":"say \"hi\"","version":"1.0.0"}"#;
        let values = string_values(text).expect("valid json");
        let version = find(&values, &["version"]).expect("version");
        assert_eq!(&text[version.span.clone()], "1.0.0");
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(string_values("[1, 2]").is_none());
    }
}
