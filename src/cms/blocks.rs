// src/cms/blocks.rs

//! Converts pasted HTML into rich-text blocks for the content store's
//! block editor.
//!
//! Headings (`h1`–`h3`), paragraphs (`p`, `div`) and list items each start
//! a block. Bold/italic/underline/strike-through become decorators; inline
//! `color` and `font-size` styles become per-block mark definitions. Line
//! breaks split blocks, so every visual line ends up as its own block.

use ego_tree::NodeRef;
use rand::Rng;
use scraper::{Html, Node};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub text: String,
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItem {
    Bullet,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    Base,
    Lg,
    Xl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorValue {
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub enum MarkDef {
    #[serde(rename = "textColor")]
    TextColor {
        #[serde(rename = "_key")]
        key: String,
        color: ColorValue,
    },
    #[serde(rename = "fontSize")]
    FontSize {
        #[serde(rename = "_key")]
        key: String,
        size: FontSize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub style: String,
    pub children: Vec<Span>,
    pub mark_defs: Vec<MarkDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl Block {
    /// Concatenated span text; handy for previews.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
struct Active {
    decorators: Vec<&'static str>,
    color: Option<String>,
    font_size: Option<FontSize>,
}

impl Active {
    fn decorate(&mut self, decorator: &'static str) {
        if !self.decorators.contains(&decorator) {
            self.decorators.push(decorator);
        }
    }

    fn decorator_marks(&self) -> Vec<String> {
        self.decorators.iter().map(|d| d.to_string()).collect()
    }
}

pub fn convert_html_to_blocks(html: &str) -> Vec<Block> {
    convert_with_rng(html, &mut rand::thread_rng())
}

pub fn convert_with_rng<R: Rng>(html: &str, rng: &mut R) -> Vec<Block> {
    let document = Html::parse_document(html);
    let mut converter = Converter {
        rng,
        blocks: Vec::new(),
    };

    let body = document.root_element().children().find(|n| {
        n.value()
            .as_element()
            .is_some_and(|e| e.name().eq_ignore_ascii_case("body"))
    });

    if let Some(body) = body {
        for child in body.children() {
            converter.walk(child, &Active::default(), None);
        }
    }
    if converter.blocks.is_empty() {
        converter.new_block("normal");
    }

    converter.split_lines()
}

struct Converter<'r, R: Rng> {
    rng: &'r mut R,
    blocks: Vec<Block>,
}

impl<'r, R: Rng> Converter<'r, R> {
    fn key(&mut self, prefix: &str) -> String {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let suffix: String = (0..8)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        format!("{prefix}_{suffix}")
    }

    fn empty_block(&mut self, style: &str) -> Block {
        Block {
            kind: "block",
            key: self.key("blk"),
            style: style.to_string(),
            children: Vec::new(),
            mark_defs: Vec::new(),
            list_item: None,
            level: None,
        }
    }

    fn new_block(&mut self, style: &str) -> usize {
        let block = self.empty_block(style);
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    fn push_text(&mut self, block: usize, text: &str, marks: Vec<String>) {
        if text.is_empty() {
            return;
        }
        let key = self.key("spn");
        self.blocks[block].children.push(Span {
            kind: "span",
            key,
            text: text.to_string(),
            marks,
        });
    }

    fn color_def(&mut self, block: usize, hex: &str) -> String {
        let existing = self.blocks[block].mark_defs.iter().find_map(|d| match d {
            MarkDef::TextColor { key, color } if color.hex.eq_ignore_ascii_case(hex) => {
                Some(key.clone())
            }
            _ => None,
        });
        if let Some(key) = existing {
            return key;
        }
        let key = self.key("mark");
        self.blocks[block].mark_defs.push(MarkDef::TextColor {
            key: key.clone(),
            color: ColorValue {
                hex: hex.to_string(),
            },
        });
        key
    }

    fn font_size_def(&mut self, block: usize, size: FontSize) -> String {
        let existing = self.blocks[block].mark_defs.iter().find_map(|d| match d {
            MarkDef::FontSize { key, size: s } if *s == size => Some(key.clone()),
            _ => None,
        });
        if let Some(key) = existing {
            return key;
        }
        let key = self.key("mark");
        self.blocks[block].mark_defs.push(MarkDef::FontSize {
            key: key.clone(),
            size,
        });
        key
    }

    fn walk(&mut self, node: NodeRef<'_, Node>, active: &Active, block: Option<usize>) {
        match node.value() {
            Node::Text(text) => {
                let text: &str = text;
                match block {
                    Some(b) => {
                        let mut marks = active.decorator_marks();
                        if let Some(color) = &active.color {
                            marks.push(self.color_def(b, color));
                        }
                        if let Some(size) = active.font_size {
                            marks.push(self.font_size_def(b, size));
                        }
                        self.push_text(b, text, marks);
                    }
                    // Whitespace between top-level elements is layout, not content.
                    None if text.trim().is_empty() => {}
                    None => {
                        let b = self.new_block("normal");
                        self.push_text(b, text, active.decorator_marks());
                    }
                }
            }
            Node::Element(element) => {
                let tag = element.name().to_ascii_lowercase();

                if tag == "br" {
                    if let Some(b) = block {
                        self.push_text(b, "\n", active.decorator_marks());
                    }
                    return;
                }

                let next_block = match tag.as_str() {
                    "h1" | "h2" | "h3" => Some(self.new_block(&tag)),
                    "p" | "div" => Some(self.new_block("normal")),
                    "li" => {
                        let ordered = node
                            .parent()
                            .and_then(|p| p.value().as_element().map(|e| e.name() == "ol"))
                            .unwrap_or(false);
                        let b = self.new_block("normal");
                        self.blocks[b].list_item = Some(if ordered {
                            ListItem::Number
                        } else {
                            ListItem::Bullet
                        });
                        self.blocks[b].level = Some(1);
                        Some(b)
                    }
                    _ => block,
                };

                let mut next = active.clone();
                if let Some(style) = element.attr("style") {
                    apply_inline_style(&mut next, style);
                }
                match tag.as_str() {
                    "strong" | "b" => next.decorate("strong"),
                    "em" | "i" => next.decorate("em"),
                    "u" => next.decorate("underline"),
                    "s" | "strike" => next.decorate("strike-through"),
                    _ => {}
                }

                for child in node.children() {
                    self.walk(child, &next, next_block);
                }
            }
            _ => {
                for child in node.children() {
                    self.walk(child, active, block);
                }
            }
        }
    }

    /// Split every block on its line breaks. Empty lines survive as
    /// blocks holding a single empty span.
    fn split_lines(mut self) -> Vec<Block> {
        let blocks = std::mem::take(&mut self.blocks);
        let mut out = Vec::with_capacity(blocks.len());

        for block in blocks {
            let mut current = self.line_of(&block);
            for span in &block.children {
                let parts: Vec<&str> = span.text.split('\n').collect();
                for (i, part) in parts.iter().enumerate() {
                    if !part.is_empty() {
                        let key = self.key("spn");
                        current.children.push(Span {
                            key,
                            text: part.to_string(),
                            ..span.clone()
                        });
                    }
                    if i + 1 < parts.len() {
                        let mut finished = std::mem::replace(&mut current, self.line_of(&block));
                        self.fill_empty(&mut finished);
                        out.push(finished);
                    }
                }
            }
            self.fill_empty(&mut current);
            out.push(current);
        }

        out
    }

    /// A block always carries at least one span.
    fn fill_empty(&mut self, block: &mut Block) {
        if block.children.is_empty() {
            let key = self.key("spn");
            block.children.push(Span {
                kind: "span",
                key,
                text: String::new(),
                marks: Vec::new(),
            });
        }
    }

    fn line_of(&mut self, block: &Block) -> Block {
        Block {
            key: self.key("blk"),
            children: Vec::new(),
            ..block.clone()
        }
    }
}

fn apply_inline_style(active: &mut Active, style: &str) {
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match property.trim().to_ascii_lowercase().as_str() {
            "color" => {
                if let Some(hex) = parse_color(value) {
                    active.color = Some(hex);
                }
            }
            "font-size" => {
                if let Some(size) = value
                    .strip_suffix("px")
                    .and_then(|px| leading_int(px.trim()))
                    .and_then(map_font_size)
                {
                    active.font_size = Some(size);
                }
            }
            "font-weight" => {
                let bold = value.eq_ignore_ascii_case("bold")
                    || leading_int(value).is_some_and(|w| w >= 600);
                if bold {
                    active.decorate("strong");
                }
            }
            _ => {}
        }
    }
}

/// `#rgb`, `#rrggbb` or `rgb(r, g, b)`; everything normalised to lowercase hex.
fn parse_color(value: &str) -> Option<String> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
        return valid.then(|| format!("#{hex}"));
    }

    let inner = value.strip_prefix("rgb(")?.strip_suffix(')')?;
    let channels = inner
        .split(',')
        .map(|c| c.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        _ => None,
    }
}

fn map_font_size(px: u32) -> Option<FontSize> {
    match px {
        0 => None,
        1..=13 => Some(FontSize::Sm),
        14..=16 => Some(FontSize::Base),
        17..=19 => Some(FontSize::Lg),
        _ => Some(FontSize::Xl),
    }
}

fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
