use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed '{{' in url template")]
    UnclosedField,
    #[error("single '}}' encountered in url template")]
    UnmatchedClosingBrace,
    #[error("unsupported replacement field '{{{0}}}' in url template")]
    UnsupportedField(String),
    #[error("cannot mix automatic '{{}}' and numbered '{{N}}' fields in url template")]
    MixedNumbering,
    #[error("replacement index {index} out of range for {available} token(s)")]
    MissingToken { index: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(usize),
}

/// A url with positional `{}` / `{N}` replacement fields. `{{` and `}}` are
/// literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = vec![];
        let mut literal = String::new();
        let mut next_auto = 0;
        let mut numbering: Option<bool> = None; // Some(true) => automatic

        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => field.push(ch),
                            None => return Err(TemplateError::UnclosedField),
                        }
                    }

                    let automatic = field.is_empty();
                    if *numbering.get_or_insert(automatic) != automatic {
                        return Err(TemplateError::MixedNumbering);
                    }

                    let index = match automatic {
                        true => {
                            next_auto += 1;
                            next_auto - 1
                        }
                        false => field
                            .parse::<usize>()
                            .map_err(|_| TemplateError::UnsupportedField(field.clone()))?,
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(index));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClosingBrace),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(UrlTemplate { segments })
    }

    /// Number of positional values the template needs.
    pub fn slot_count(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(i) => Some(i.saturating_add(1)),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Surplus tokens are ignored; a slot without a token is an error.
    pub fn render<S: AsRef<str>>(&self, tokens: &[S]) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(index) => {
                    let token = tokens.get(*index).ok_or(TemplateError::MissingToken {
                        index: *index,
                        available: tokens.len(),
                    })?;
                    out.push_str(token.as_ref());
                }
            }
        }
        Ok(out)
    }
}
