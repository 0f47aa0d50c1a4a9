//! Property path parsing and resolution (`Owner.Pets[0].Name`).

use crate::data_types::{Bindable, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
}

/// A parsed binding path. A path that fails to parse resolves to `None` for every item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyPath {
    text: String,
    segments: Option<Vec<PathSegment>>,
}

impl PropertyPath {
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            segments: parse_segments(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_deref().unwrap_or(&[])
    }

    pub fn is_valid(&self) -> bool {
        self.segments.is_some()
    }

    /// Dotted or indexed paths need the iterative resolver.
    pub fn is_complex(&self) -> bool {
        is_complex_path(&self.text)
    }

    /// Walks the path on `item`. Any missing member, null intermediate, bad
    /// index or raw-array leaf yields `None`.
    pub fn resolve<T: Bindable + ?Sized>(&self, item: &T) -> Option<Value> {
        let segments = self.segments.as_deref()?;
        let (first, rest) = segments.split_first()?;

        let mut current = step(item.member(&first.name)?, first.index)?;
        for segment in rest {
            if current.is_null() {
                return None;
            }
            current = step(current.member(&segment.name)?, segment.index)?;
        }

        if current.is_array() {
            return None;
        }
        Some(current)
    }

    /// Samples resolution: like [`PropertyPath::resolve`] but accepts a raw array leaf.
    pub fn resolve_samples<T: Bindable + ?Sized>(&self, item: &T) -> Option<Value> {
        let segments = self.segments.as_deref()?;
        let (first, rest) = segments.split_first()?;

        let mut current = step(item.member(&first.name)?, first.index)?;
        for segment in rest {
            current = step(current.member(&segment.name)?, segment.index)?;
        }
        Some(current)
    }
}

pub fn is_complex_path(text: &str) -> bool {
    text.contains('.') || text.contains('[')
}

fn step(value: Value, index: Option<usize>) -> Option<Value> {
    match index {
        None => Some(value),
        Some(i) => value.element(i).cloned(),
    }
}

fn parse_segments(text: &str) -> Option<Vec<PathSegment>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    text.split('.').map(parse_segment).collect()
}

fn parse_segment(part: &str) -> Option<PathSegment> {
    let part = part.trim();
    match part.find('[') {
        None => {
            if part.is_empty() || part.contains(']') {
                return None;
            }
            Some(PathSegment {
                name: part.to_string(),
                index: None,
            })
        }
        Some(open) => {
            let name = &part[..open];
            let inner = part[open + 1..].strip_suffix(']')?;
            if name.is_empty() || inner.contains('[') {
                return None;
            }
            let index = inner.trim().parse::<usize>().ok()?;
            Some(PathSegment {
                name: name.to_string(),
                index: Some(index),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_indexed() {
        let path = PropertyPath::parse("Owner.Pets[2].Name");
        assert!(path.is_valid());
        assert!(path.is_complex());
        assert_eq!(
            path.segments(),
            &[
                PathSegment {
                    name: "Owner".into(),
                    index: None
                },
                PathSegment {
                    name: "Pets".into(),
                    index: Some(2)
                },
                PathSegment {
                    name: "Name".into(),
                    index: None
                },
            ]
        );
    }

    #[test]
    fn test_parse_malformed() {
        for text in ["", "a..b", "a[", "a[x]", "[0]", "a]b", "a[1][2]"] {
            assert!(!PropertyPath::parse(text).is_valid(), "{text} should be invalid");
        }
        assert!(!PropertyPath::parse("Value").is_complex());
    }
}
