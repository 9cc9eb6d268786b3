use crate::ast::{Combinator, Element, Selector, Span};

/// Builds the `.label &` selector of a synthesized rule.
pub struct SelectorSynthesizer;

impl SelectorSynthesizer {
    /// `label` may carry a leading `.`; compound labels such as
    /// `sizes.colors` become `.sizes.colors &`.
    pub fn build(label: &str, span: Span) -> Selector {
        let class = label.strip_prefix('.').unwrap_or(label);
        Selector::new(vec![
            Element::new(Combinator::Descendant, format!(".{class}")),
            Element::new(Combinator::Descendant, "&"),
        ])
        .with_span(span)
    }
}
