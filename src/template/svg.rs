//! SVG templates with discoverable text placeholders
//!
//! A template keeps its source text untouched. Discovery records where each
//! placeholder's text lives in that source, and filling splices new text into
//! a fresh copy, so plates never see each other's substitutions.

use std::collections::HashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use super::placeholder::{Marking, Placeholder, Substitution, WORDS_ID};
use super::registry::TemplateError;

/// Which family of placeholders a template is searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Line slots for lyric chunks
    Words,
    /// Title, author and CCLI fields
    Title,
}

/// Where substituted text goes in the source document
#[derive(Debug, Clone, PartialEq, Eq)]
enum SiteRange {
    /// Raw text already present in the source
    Text(Range<usize>),
    /// Empty element; text is inserted before its closing tag
    Insert(usize),
    /// Self-closing element; its `/>` is rewritten into `>text</tag>`
    SelfClosing { close: Range<usize>, tag: String },
}

impl SiteRange {
    fn start(&self) -> usize {
        match self {
            SiteRange::Text(range) => range.start,
            SiteRange::Insert(pos) => *pos,
            SiteRange::SelfClosing { close, .. } => close.start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    /// The whole text belongs to one placeholder
    Whole(Placeholder),
    /// Sentinel tokens inside the text, replaced in place
    Tokens(Vec<Placeholder>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextSite {
    range: SiteRange,
    /// Unescaped text found at the site
    original: String,
    binding: Binding,
}

/// A parsed SVG template, shared read-only between plates
#[derive(Debug, Clone)]
pub struct SvgTemplate {
    name: String,
    path: Option<PathBuf>,
    kind: TemplateKind,
    source: String,
    sites: Vec<TextSite>,
}

impl SvgTemplate {
    /// Load and scan a template file
    pub fn from_file(path: &Path, kind: TemplateKind) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut template = Self::parse(path.display().to_string(), source, kind)?;
        template.path = Some(path.to_path_buf());
        Ok(template)
    }

    /// Scan SVG source held in memory; `name` is used in error messages
    pub fn parse(
        name: impl Into<String>,
        source: impl Into<String>,
        kind: TemplateKind,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let source = source.into();
        let sites = {
            let options = ParsingOptions {
                allow_dtd: true,
                ..ParsingOptions::default()
            };
            let doc = Document::parse_with_options(&source, options).map_err(|e| {
                TemplateError::InvalidSvg {
                    template: name.clone(),
                    message: e.to_string(),
                }
            })?;
            discover_sites(&doc, &source, kind)
        };
        debug!(template = %name, sites = sites.len(), "scanned template");

        Ok(Self {
            name,
            path: None,
            kind,
            source,
            sites,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory relative resources of the template resolve against.
    ///
    /// A template loaded by a bare file name lives in the working directory.
    pub fn resources_dir(&self) -> Option<&Path> {
        self.path.as_deref().map(parent_dir)
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// The unmodified document text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholders found in the document, in discovery order
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for site in &self.sites {
            let found: &[Placeholder] = match &site.binding {
                Binding::Whole(p) => std::slice::from_ref(p),
                Binding::Tokens(ps) => ps,
            };
            for p in found {
                if !seen.contains(p) {
                    seen.push(*p);
                }
            }
        }
        seen
    }

    pub fn has_placeholder(&self, placeholder: Placeholder) -> bool {
        self.placeholders().contains(&placeholder)
    }

    /// Number of word line slots
    pub fn slot_count(&self) -> usize {
        self.placeholders()
            .iter()
            .filter(|p| matches!(p, Placeholder::Words(_)))
            .count()
    }

    /// Produce a new document with the given substitutions applied.
    ///
    /// Attribute-marked sites without a value keep their template text;
    /// token sites drop tokens that have no value.
    pub fn fill(&self, substitutions: &[Substitution]) -> String {
        let lookup = |placeholder: Placeholder| {
            substitutions
                .iter()
                .rev()
                .find(|s| s.placeholder == placeholder)
                .map(|s| s.text.as_str())
        };

        let mut edits: Vec<(Range<usize>, String)> = Vec::with_capacity(self.sites.len());
        for site in &self.sites {
            let text = match &site.binding {
                Binding::Whole(p) => match lookup(*p) {
                    Some(value) => p.decorate(value, Marking::Attribute),
                    None => continue,
                },
                Binding::Tokens(placeholders) => replace_tokens(&site.original, placeholders, |p| {
                    lookup(p)
                        .map(|v| p.decorate(v, Marking::Token))
                        .unwrap_or_default()
                }),
            };
            let escaped = escape_xml(&text);
            edits.push(match &site.range {
                SiteRange::Text(range) => (range.clone(), escaped),
                SiteRange::Insert(pos) => (*pos..*pos, escaped),
                SiteRange::SelfClosing { close, tag } => {
                    (close.clone(), format!(">{}</{}>", escaped, tag))
                }
            });
        }

        // Later edits first so earlier offsets stay valid
        edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
        let mut out = self.source.clone();
        for (range, text) in edits {
            out.replace_range(range, &text);
        }
        out
    }
}

fn discover_sites(doc: &Document, source: &str, kind: TemplateKind) -> Vec<TextSite> {
    let mut sites = Vec::new();
    let mut claimed = HashSet::new();
    let mut next_slot = 0;

    for node in doc.root().descendants() {
        if node.is_element() {
            let Some(id) = node.attribute("id") else {
                continue;
            };
            let targets: Vec<(Node, Placeholder)> = match kind {
                TemplateKind::Words if id == WORDS_ID => {
                    let children: Vec<Node> = node.children().filter(|n| n.is_element()).collect();
                    let slots = if children.is_empty() { vec![node] } else { children };
                    slots
                        .into_iter()
                        .map(|slot| {
                            let p = Placeholder::Words(next_slot);
                            next_slot += 1;
                            (slot, p)
                        })
                        .collect()
                }
                TemplateKind::Title => match Placeholder::from_sentinel_id(id) {
                    Some(p) => vec![(node, p)],
                    None => Vec::new(),
                },
                _ => Vec::new(),
            };

            for (element, placeholder) in targets {
                let (range, original) = element_site(element, source, &claimed);
                if !claimed.insert(range.start()) {
                    debug!(%placeholder, "placeholder shares its text with another; skipped");
                    continue;
                }
                sites.push(TextSite {
                    range,
                    original,
                    binding: Binding::Whole(placeholder),
                });
            }
        } else if node.is_text() {
            let range = text_range(node, source);
            if claimed.contains(&range.start) {
                continue;
            }
            let text = node.text().unwrap_or_default();
            let found: Vec<Placeholder> = match kind {
                TemplateKind::Words if text.contains(Placeholder::Words(0).token()) => {
                    let p = Placeholder::Words(next_slot);
                    next_slot += 1;
                    vec![p]
                }
                TemplateKind::Words => Vec::new(),
                TemplateKind::Title => Placeholder::TITLE_SLOTS
                    .into_iter()
                    .filter(|p| text.contains(p.token()))
                    .collect(),
            };
            if found.is_empty() {
                continue;
            }
            claimed.insert(range.start);
            sites.push(TextSite {
                range: SiteRange::Text(range),
                original: text.to_string(),
                binding: Binding::Tokens(found),
            });
        }
    }

    sites
}

/// Directory holding `path`, `.` for a bare file name
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Raw source range of a text node, CDATA delimiters included
fn text_range(node: Node, source: &str) -> Range<usize> {
    const CDATA_OPEN: &str = "<![CDATA[";
    const CDATA_CLOSE: &str = "]]>";

    let range = node.range();
    if source[..range.start].ends_with(CDATA_OPEN) && source[range.end..].starts_with(CDATA_CLOSE) {
        return range.start - CDATA_OPEN.len()..range.end + CDATA_CLOSE.len();
    }
    range
}

/// Locate the text an attribute-marked element displays.
///
/// Prefers the first non-blank text inside the element. Without one, the
/// first leaf element receives the text.
fn element_site(element: Node, source: &str, claimed: &HashSet<usize>) -> (SiteRange, String) {
    let visible = element.descendants().find(|n| {
        n.is_text()
            && n.text().is_some_and(|t| !t.trim().is_empty())
            && !claimed.contains(&text_range(*n, source).start)
    });
    if let Some(text) = visible {
        let original = text.text().unwrap_or_default().to_string();
        return (SiteRange::Text(text_range(text, source)), original);
    }

    let leaf = element
        .descendants()
        .filter(|n| n.is_element())
        .find(|n| !n.children().any(|c| c.is_element()))
        .unwrap_or(element);

    if let Some(blank) = leaf.children().find(|n| n.is_text()) {
        let original = blank.text().unwrap_or_default().to_string();
        return (SiteRange::Text(text_range(blank, source)), original);
    }

    let range = leaf.range();
    let raw = &source[range.clone()];
    if raw.ends_with("/>") {
        let tag: String = raw[1..]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
            .collect();
        return (
            SiteRange::SelfClosing {
                close: range.end - 2..range.end,
                tag,
            },
            String::new(),
        );
    }
    let insert = raw
        .rfind("</")
        .map(|offset| range.start + offset)
        .unwrap_or(range.end);
    (SiteRange::Insert(insert), String::new())
}

/// Replace every token in one left-to-right pass; inserted values are never rescanned
fn replace_tokens(
    text: &str,
    placeholders: &[Placeholder],
    value: impl Fn(Placeholder) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next = placeholders
            .iter()
            .filter_map(|p| rest.find(p.token()).map(|at| (at, *p)))
            .min_by_key(|(at, _)| *at);
        let Some((at, placeholder)) = next else {
            break;
        };
        out.push_str(&rest[..at]);
        out.push_str(&value(placeholder));
        rest = &rest[at + placeholder.token().len()..];
    }
    out.push_str(rest);
    out
}

/// Escape special XML characters in text content
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
