// src/core/html.rs
// Markup -> DomNode.
//
// Tokenizing is html5ever's job; the tree is built here with a plain open-element
// stack, the way a lenient parser does it: start tags push, end tags pop back to the
// nearest open element of the same name, stray end tags are ignored. There are no
// HTML5 tree-construction fix-ups, so `<thead><th>..</th></thead>` stays without a
// `<tr>` and tables keep exactly the sections the page wrote.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::dom::{AttrValue, DOCUMENT_TAG, DomNode, Element};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Parse a whole page. The returned root is an element named [`DOCUMENT_TAG`].
pub fn parse(markup: &str) -> DomNode {
    let mut queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(markup));

    let mut tok = Tokenizer::new(TreeBuilder::new(), TokenizerOpts::default());
    let _ = tok.feed(&mut queue);
    tok.end();

    DomNode::Element(tok.sink.finish())
}

struct TreeBuilder {
    // stack[0] is the document root and is never popped before `finish`
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self { stack: vec![Element::new(DOCUMENT_TAG)] }
    }

    fn top(&mut self) -> &mut Element {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_text(&mut self, text: &str) {
        let top = self.top();
        match top.children.last_mut() {
            Some(DomNode::Text(prev)) => prev.push_str(text),
            _ => top.children.push(DomNode::Text(s!(text))),
        }
    }

    /// Close the innermost open element named `name`, together with anything
    /// still open inside it.
    fn close(&mut self, name: &str) {
        let Some(pos) = self.stack.iter().rposition(|e| e.name == name) else {
            return;
        };
        if pos == 0 {
            return;
        }
        while self.stack.len() > pos {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(done) = self.stack.pop() {
            self.top().children.push(DomNode::Element(done));
        }
    }

    fn finish(mut self) -> Element {
        while self.stack.len() > 1 {
            self.pop();
        }
        self.stack.pop().unwrap_or_else(|| Element::new(DOCUMENT_TAG))
    }
}

impl TokenSink for TreeBuilder {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let mut el = Element::new(&name);
                        for attr in &tag.attrs {
                            let key = attr.name.local.to_string();
                            // first occurrence wins on duplicates
                            if !el.attrs.contains_key(&key) {
                                let value = AttrValue::parse(&key, &attr.value);
                                el.attrs.insert(key, value);
                            }
                        }
                        if tag.self_closing || VOID_TAGS.contains(&name.as_str()) {
                            self.top().children.push(DomNode::Element(el));
                            return TokenSinkResult::Continue;
                        }
                        self.stack.push(el);
                        match name.as_str() {
                            "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
                            "style" => return TokenSinkResult::RawData(RawKind::Rawtext),
                            "title" | "textarea" => {
                                return TokenSinkResult::RawData(RawKind::Rcdata);
                            }
                            _ => {}
                        }
                    }
                    TagKind::EndTag => self.close(&name),
                }
            }
            Token::CharacterTokens(text) => self.push_text(&text),
            Token::NullCharacterToken => self.push_text("\u{FFFD}"),
            // comments, doctype, parse errors and EOF carry nothing we keep
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(markup: &str) -> Element {
        match parse(markup) {
            DomNode::Element(e) => e,
            DomNode::Text(_) => panic!("root must be an element"),
        }
    }

    #[test]
    fn keeps_header_cells_without_rows() {
        let doc = root("<table><thead><th>Status</th></thead><tbody><tr><td>ok</td></tr></tbody></table>");
        let thead = doc.find("thead").unwrap();
        assert_eq!(thead.find_all("tr").count(), 0);
        assert_eq!(thead.find_all("th").count(), 1);
        assert_eq!(doc.find("tbody").unwrap().find_all("tr").count(), 1);
    }

    #[test]
    fn decodes_entities_and_attributes() {
        let doc = root(r#"<ul><li class="next"><a href="/list?p=2&amp;s=1">Next &raquo;</a></li></ul>"#);
        let a = doc.find("a").unwrap();
        assert_eq!(a.get_attr("href").and_then(AttrValue::as_str), Some("/list?p=2&s=1"));
        assert_eq!(a.direct_text(), Some("Next \u{bb}"));
        let li = doc.find("li").unwrap();
        assert!(li.get_attr("class").unwrap().is_single_token("next"));
    }

    #[test]
    fn void_and_unclosed_elements() {
        let doc = root("<div><p>a<br>b<img src=x.png></div><span>c");
        let div = doc.find("div").unwrap();
        let p = div.find("p").unwrap();
        // <br> and <img> do not swallow what follows
        assert_eq!(p.children.len(), 4);
        // unclosed <span> is still attached at the end
        assert_eq!(doc.find("span").unwrap().direct_text(), Some("c"));
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let doc = root("<div>x</b></div>");
        assert_eq!(doc.find("div").unwrap().direct_text(), Some("x"));
    }

    #[test]
    fn script_body_is_text() {
        let doc = root("<script>if (a < b) { document.write('<td>') }</script><td>real</td>");
        assert_eq!(doc.find_all("td").count(), 1);
    }
}
