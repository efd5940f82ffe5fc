use std::fmt::Write;

use crate::render::SvgNode;

/// Serializes `node` as compact SVG markup.
#[must_use]
pub fn to_svg_string(node: &SvgNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &SvgNode) {
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attributes {
        // Writing into a String cannot fail.
        let _ = write!(out, " {name}=\"{}\"", escape(value, true));
    }
    if node.children.is_empty() && node.text.is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if let Some(text) = &node.text {
        out.push_str(&escape(text, false));
    }
    for child in &node.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", node.tag);
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::to_svg_string;
    use crate::render::SvgNode;

    #[test]
    fn writes_nested_markup_with_escaping() {
        let node = SvgNode::group()
            .with_attr("class", "tick")
            .with_child(SvgNode::new("text").with_text("A & \"B\" <C>"))
            .with_child(SvgNode::new("line").with_attr("title", "\"q\""));
        assert_eq!(
            to_svg_string(&node),
            "<g class=\"tick\"><text>A &amp; \"B\" &lt;C&gt;</text><line title=\"&quot;q&quot;\"/></g>"
        );
    }
}
