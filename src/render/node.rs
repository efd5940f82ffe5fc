use std::fmt::Display;

use indexmap::IndexMap;

use crate::core::format::format_number;
use crate::error::{ChartError, ChartResult};

/// One element of the retained scene a component paints.
///
/// Attribute order is insertion order so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgNode {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<SvgNode>,
    pub text: Option<String>,
}

impl SvgNode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group() -> Self {
        Self::new("g")
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Numeric attribute rendered without float noise.
    #[must_use]
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_number(name, value);
        self
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    #[must_use]
    pub fn with_attrs<'a>(mut self, attributes: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (name, value) in attributes {
            self.set_attr(name.clone(), value);
        }
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SvgNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Display) {
        self.attributes.insert(name.into(), value.to_string());
    }

    pub fn set_number(&mut self, name: impl Into<String>, value: f64) {
        self.attributes.insert(name.into(), format_number(value));
    }

    pub fn push_child(&mut self, child: SvgNode) {
        self.children.push(child);
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Parses a numeric attribute.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attr(name)?.parse().ok()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|item| item == class))
    }

    /// First descendant (or self) matching `selector`, depth first.
    ///
    /// Selectors are `tag`, `.class`, `#id` or `tag.class`.
    #[must_use]
    pub fn select(&self, selector: &str) -> Option<&SvgNode> {
        let selector = Selector::parse(selector);
        self.walk().find(|node| selector.matches(node))
    }

    #[must_use]
    pub fn select_all(&self, selector: &str) -> Vec<&SvgNode> {
        let selector = Selector::parse(selector);
        self.walk().filter(|node| selector.matches(node)).collect()
    }

    /// Depth-first pre-order traversal including `self`.
    pub fn walk(&self) -> impl Iterator<Item = &SvgNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Rejects trees a backend could not paint.
    pub fn validate(&self) -> ChartResult<()> {
        for node in self.walk() {
            if node.tag.is_empty() || !node.tag.chars().all(is_name_char) {
                return Err(ChartError::InvalidInput(format!(
                    "invalid element name `{}`",
                    node.tag
                )));
            }
            if let Some(name) = node.attributes.keys().find(|name| {
                name.is_empty() || !name.chars().all(is_name_char)
            }) {
                return Err(ChartError::InvalidInput(format!(
                    "invalid attribute name `{name}` on `{}`",
                    node.tag
                )));
            }
        }
        Ok(())
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ':' | '.')
}

struct Selector<'a> {
    tag: Option<&'a str>,
    class: Option<&'a str>,
    id: Option<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        if let Some(id) = selector.strip_prefix('#') {
            return Self {
                tag: None,
                class: None,
                id: Some(id),
            };
        }
        let (tag, class) = match selector.split_once('.') {
            Some((tag, class)) => (tag, Some(class)),
            None => (selector, None),
        };
        Self {
            tag: (!tag.is_empty()).then_some(tag),
            class,
            id: None,
        }
    }

    fn matches(&self, node: &SvgNode) -> bool {
        self.tag.is_none_or(|tag| node.tag == tag)
            && self.class.is_none_or(|class| node.has_class(class))
            && self.id.is_none_or(|id| node.attr("id") == Some(id))
    }
}
