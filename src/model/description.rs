//! Description trees: Doxygen's mixed-content markup (`docCmdGroup` and
//! friends) turned into a closed sum type.
//!
//! Block-level nodes (paragraphs, lists, tables, ...) and inline nodes
//! (text runs, styles, links) share one enum; [`DocNode::is_block`] tells
//! the renderer which contract applies.

use crate::error::Result;
use crate::xml::{Content, Element, XmlParser};

/// `briefdescription`, `detaileddescription`, `inbodydescription` and the
/// other `descriptionType` elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub title: Option<String>,
    pub children: Vec<DocNode>,
}

impl Description {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &[]);

        let title = element.first_inner_element("title").map(|t| t.text());
        let children = parse_blocks(xml, element)?;
        Ok(Self { title, children })
    }

    /// True when there is nothing but whitespace to render.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(DocNode::is_blank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Bold,
    Emphasis,
    ComputerOutput,
    Underline,
    Strike,
    Subscript,
    Superscript,
    Small,
    Center,
    Cite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Compound,
    Member,
}

impl RefKind {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        match value {
            "compound" => Some(Self::Compound),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocRef {
    pub refid: String,
    pub kind: RefKind,
    pub external: Option<String>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleSectKind {
    See,
    Return,
    Author,
    Authors,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Pre,
    Post,
    Copyright,
    Invariant,
    Remark,
    Attention,
    Important,
    Par,
    Rcs,
}

impl SimpleSectKind {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        let kind = match value {
            "see" => Self::See,
            "return" => Self::Return,
            "author" => Self::Author,
            "authors" => Self::Authors,
            "version" => Self::Version,
            "since" => Self::Since,
            "date" => Self::Date,
            "note" => Self::Note,
            "warning" => Self::Warning,
            "pre" => Self::Pre,
            "post" => Self::Post,
            "copyright" => Self::Copyright,
            "invariant" => Self::Invariant,
            "remark" => Self::Remark,
            "attention" => Self::Attention,
            "important" => Self::Important,
            "par" => Self::Par,
            "rcs" => Self::Rcs,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSect {
    pub kind: SimpleSectKind,
    pub title: Option<String>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterListKind {
    Param,
    RetVal,
    Exception,
    TemplateParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterName {
    pub direction: Option<Direction>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterItem {
    pub names: Vec<ParameterName>,
    pub types: Vec<Vec<DocNode>>,
    pub description: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub kind: ParameterListKind,
    pub items: Vec<ParameterItem>,
}

/// One token inside a `<highlight>` run.
#[derive(Debug, Clone, PartialEq)]
pub enum CodePiece {
    Text(String),
    Space(usize),
    Ref {
        refid: String,
        kind: RefKind,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub class: String,
    pub pieces: Vec<CodePiece>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeLine {
    pub lineno: Option<u32>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramListing {
    pub filename: Option<String>,
    pub lines: Vec<CodeLine>,
}

impl ProgramListing {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["filename"]);

        let mut listing = Self {
            filename: element.attribute("filename").map(str::to_string),
            lines: Vec::new(),
        };
        for child in element.child_elements() {
            if child.name() == "codeline" {
                listing.lines.push(parse_codeline(xml, child)?);
            } else {
                xml.unknown_element(&element, &child);
            }
        }
        Ok(listing)
    }
}

fn parse_codeline(xml: &XmlParser, element: Element<'_, '_>) -> Result<CodeLine> {
    // refid/refkind/external point at the definition a line belongs to;
    // links are taken from the inner <ref> tokens instead.
    xml.check_attributes(&element, &["lineno", "refid", "refkind", "external"]);

    let mut line = CodeLine {
        lineno: element.optional_attribute_number("lineno")?,
        highlights: Vec::new(),
    };
    for child in element.child_elements() {
        if child.name() != "highlight" {
            xml.unknown_element(&element, &child);
            continue;
        }
        let class = child.attribute_string("class")?;
        let mut pieces = Vec::new();
        for item in child.content() {
            match item {
                Content::Text(text) => pieces.push(CodePiece::Text(text.to_string())),
                Content::Element(e) => match e.name() {
                    "sp" => {
                        let count = e.optional_attribute_number("value")?.unwrap_or(1);
                        pieces.push(CodePiece::Space(count));
                    }
                    "ref" => {
                        let kindref = e.attribute_string("kindref")?;
                        match RefKind::from_doxygen(&kindref) {
                            Some(kind) => pieces.push(CodePiece::Ref {
                                refid: e.attribute_string("refid")?,
                                kind,
                                text: e.text(),
                            }),
                            None => {
                                xml.unknown_value(&e, "kindref", &kindref);
                                pieces.push(CodePiece::Text(e.text()));
                            }
                        }
                    }
                    _ => xml.unknown_element(&child, &e),
                },
            }
        }
        line.highlights.push(Highlight { class, pieces });
    }
    Ok(line)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub header: bool,
    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub width: Option<String>,
    pub class: Option<String>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: u32,
    pub cols: u32,
    pub width: Option<String>,
    pub caption: Option<Vec<DocNode>>,
    pub body: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub kind: String,
    pub name: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub alt: Option<String>,
    pub inline: bool,
    pub caption: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarListEntry {
    pub term: Vec<DocNode>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocSection {
    pub level: u8,
    pub id: Option<String>,
    pub title: Vec<DocNode>,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocItem {
    pub id: String,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Text(String),
    Para(Vec<DocNode>),
    Style {
        style: TextStyle,
        children: Vec<DocNode>,
    },
    Ref(DocRef),
    Ulink {
        url: String,
        children: Vec<DocNode>,
    },
    Anchor(String),
    LineBreak,
    Symbol(&'static str),
    Emoji {
        name: String,
        unicode: Option<String>,
    },
    Formula(String),
    Image(Image),
    RawHtml(String),
    Ruler,
    List {
        ordered: bool,
        /// First number of an ordered list.
        start: Option<u32>,
        items: Vec<Vec<DocNode>>,
    },
    VariableList(Vec<VarListEntry>),
    SimpleSect(SimpleSect),
    ParameterList(ParameterList),
    ProgramListing(ProgramListing),
    Verbatim(String),
    Preformatted(Vec<DocNode>),
    Table(Table),
    Heading {
        level: u8,
        children: Vec<DocNode>,
    },
    Section(DocSection),
    XRefSect {
        id: String,
        title: String,
        children: Vec<DocNode>,
    },
    BlockQuote(Vec<DocNode>),
    Details {
        summary: Vec<DocNode>,
        children: Vec<DocNode>,
    },
    TocList(Vec<TocItem>),
}

impl DocNode {
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Para(_)
                | Self::Ruler
                | Self::List { .. }
                | Self::VariableList(_)
                | Self::SimpleSect(_)
                | Self::ParameterList(_)
                | Self::ProgramListing(_)
                | Self::Verbatim(_)
                | Self::Preformatted(_)
                | Self::Table(_)
                | Self::Heading { .. }
                | Self::Section(_)
                | Self::XRefSect { .. }
                | Self::BlockQuote(_)
                | Self::Details { .. }
                | Self::TocList(_)
        )
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Para(children) => children.iter().all(Self::is_blank),
            _ => false,
        }
    }
}

// -- Builders -----------------------------------------------------------------

/// Parse element-only content (whitespace between elements is dropped).
pub fn parse_blocks(xml: &XmlParser, parent: Element<'_, '_>) -> Result<Vec<DocNode>> {
    parse_children(xml, parent, false)
}

/// Parse mixed content, keeping every text run in document order.
pub fn parse_mixed(xml: &XmlParser, parent: Element<'_, '_>) -> Result<Vec<DocNode>> {
    parse_children(xml, parent, true)
}

fn parse_children(xml: &XmlParser, parent: Element<'_, '_>, mixed: bool) -> Result<Vec<DocNode>> {
    let mut out = Vec::new();
    for item in parent.content() {
        match item {
            Content::Text(text) => {
                if mixed || !text.trim().is_empty() {
                    out.push(DocNode::Text(text.to_string()));
                }
            }
            Content::Element(child) => parse_node(xml, parent, child, &mut out)?,
        }
    }
    Ok(out)
}

fn style(xml: &XmlParser, element: Element<'_, '_>, style: TextStyle) -> Result<DocNode> {
    Ok(DocNode::Style {
        style,
        children: parse_mixed(xml, element)?,
    })
}

fn parse_node(
    xml: &XmlParser,
    parent: Element<'_, '_>,
    element: Element<'_, '_>,
    out: &mut Vec<DocNode>,
) -> Result<()> {
    let name = element.name();
    if let Some(symbol) = symbol_for(name) {
        out.push(DocNode::Symbol(symbol));
        return Ok(());
    }

    let node = match name {
        "para" => DocNode::Para(parse_mixed(xml, element)?),
        "bold" => style(xml, element, TextStyle::Bold)?,
        "emphasis" => style(xml, element, TextStyle::Emphasis)?,
        "computeroutput" | "javadoccode" => style(xml, element, TextStyle::ComputerOutput)?,
        "underline" | "ins" => style(xml, element, TextStyle::Underline)?,
        "s" | "strike" | "del" => style(xml, element, TextStyle::Strike)?,
        "subscript" => style(xml, element, TextStyle::Subscript)?,
        "superscript" => style(xml, element, TextStyle::Superscript)?,
        "small" => style(xml, element, TextStyle::Small)?,
        "center" => style(xml, element, TextStyle::Center)?,
        "cite" => style(xml, element, TextStyle::Cite)?,
        "ulink" => DocNode::Ulink {
            url: element.attribute_string("url")?,
            children: parse_mixed(xml, element)?,
        },
        "ref" => {
            xml.check_attributes(&element, &["refid", "kindref", "external"]);
            let kindref = element.attribute_string("kindref")?;
            let Some(kind) = RefKind::from_doxygen(&kindref) else {
                xml.unknown_value(&element, "kindref", &kindref);
                out.extend(parse_mixed(xml, element)?);
                return Ok(());
            };
            DocNode::Ref(DocRef {
                refid: element.attribute_string("refid")?,
                kind,
                external: element.attribute("external").map(str::to_string),
                children: parse_mixed(xml, element)?,
            })
        }
        "anchor" => DocNode::Anchor(element.attribute_string("id")?),
        "linebreak" => DocNode::LineBreak,
        "hruler" => DocNode::Ruler,
        "emoji" => DocNode::Emoji {
            name: element.attribute_string("name")?,
            unicode: element.attribute("unicode").map(str::to_string),
        },
        "formula" => DocNode::Formula(element.text()),
        "image" => DocNode::Image(parse_image(xml, element)?),
        "htmlonly" => DocNode::RawHtml(element.text()),
        "latexonly" | "manonly" | "rtfonly" | "xmlonly" | "docbookonly" | "indexentry" => {
            return Ok(());
        }
        "javadocliteral" => DocNode::Text(element.text()),
        "itemizedlist" | "orderedlist" => {
            xml.check_attributes(&element, &["start"]);
            let mut items = Vec::new();
            for item in element.child_elements() {
                if item.name() == "listitem" {
                    items.push(parse_blocks(xml, item)?);
                } else {
                    xml.unknown_element(&element, &item);
                }
            }
            DocNode::List {
                ordered: name == "orderedlist",
                start: element.optional_attribute_number("start")?,
                items,
            }
        }
        "variablelist" => DocNode::VariableList(parse_variable_list(xml, element)?),
        "simplesect" => {
            let kind = element.attribute_string("kind")?;
            let Some(kind) = SimpleSectKind::from_doxygen(&kind) else {
                xml.unknown_value(&element, "kind", &kind);
                return Ok(());
            };
            let title = element.first_inner_element("title").map(|t| t.text());
            let mut children = Vec::new();
            for child in element.child_elements() {
                if child.name() != "title" {
                    parse_node(xml, element, child, &mut children)?;
                }
            }
            DocNode::SimpleSect(SimpleSect {
                kind,
                title,
                children,
            })
        }
        "parameterlist" => match parse_parameter_list(xml, element)? {
            Some(list) => DocNode::ParameterList(list),
            None => return Ok(()),
        },
        "programlisting" => DocNode::ProgramListing(ProgramListing::parse(xml, element, name)?),
        "verbatim" => DocNode::Verbatim(element.text()),
        "preformatted" => DocNode::Preformatted(parse_mixed(xml, element)?),
        "table" => DocNode::Table(parse_table(xml, element)?),
        "heading" => DocNode::Heading {
            level: element.attribute_number("level")?,
            children: parse_mixed(xml, element)?,
        },
        "sect1" | "sect2" | "sect3" | "sect4" | "sect5" | "sect6" => {
            let level = name[4..].parse().unwrap_or(1);
            DocNode::Section(parse_section(xml, element, level)?)
        }
        "xrefsect" => {
            let title = element.inner_text("xreftitle")?;
            let children = match element.first_inner_element("xrefdescription") {
                Some(d) => parse_blocks(xml, d)?,
                None => Vec::new(),
            };
            DocNode::XRefSect {
                id: element.attribute_string("id")?,
                title,
                children,
            }
        }
        "blockquote" => DocNode::BlockQuote(parse_blocks(xml, element)?),
        "details" => {
            let summary = match element.first_inner_element("summary") {
                Some(s) => parse_mixed(xml, s)?,
                None => Vec::new(),
            };
            let mut children = Vec::new();
            for child in element.child_elements() {
                if child.name() != "summary" {
                    parse_node(xml, element, child, &mut children)?;
                }
            }
            DocNode::Details { summary, children }
        }
        "toclist" => {
            let mut items = Vec::new();
            for item in element.child_elements() {
                if item.name() == "tocitem" {
                    items.push(TocItem {
                        id: item.attribute_string("id")?,
                        children: parse_mixed(xml, item)?,
                    });
                } else {
                    xml.unknown_element(&element, &item);
                }
            }
            DocNode::TocList(items)
        }
        // Transparent wrappers: their content belongs to the parent.
        "parblock" | "internal" => {
            out.extend(parse_blocks(xml, element)?);
            return Ok(());
        }
        "copydoc" | "language" => {
            out.extend(parse_mixed(xml, element)?);
            return Ok(());
        }
        // Title elements are read by the container that owns them.
        "title" => return Ok(()),
        _ => {
            xml.unknown_element(&parent, &element);
            return Ok(());
        }
    };
    out.push(node);
    Ok(())
}

fn parse_image(xml: &XmlParser, element: Element<'_, '_>) -> Result<Image> {
    xml.check_attributes(
        &element,
        &["type", "name", "width", "height", "alt", "inline", "caption"],
    );
    let attr = |name: &str| element.attribute(name).map(str::to_string);
    Ok(Image {
        kind: element.attribute_string("type")?,
        name: attr("name"),
        width: attr("width"),
        height: attr("height"),
        alt: attr("alt"),
        inline: element.flag("inline")?,
        caption: parse_mixed(xml, element)?,
    })
}

fn parse_variable_list(xml: &XmlParser, element: Element<'_, '_>) -> Result<Vec<VarListEntry>> {
    // <varlistentry> and <listitem> alternate as siblings.
    let mut entries: Vec<VarListEntry> = Vec::new();
    for child in element.child_elements() {
        match child.name() {
            "varlistentry" => {
                let term = match child.first_inner_element("term") {
                    Some(t) => parse_mixed(xml, t)?,
                    None => Vec::new(),
                };
                entries.push(VarListEntry {
                    term,
                    children: Vec::new(),
                });
            }
            "listitem" => {
                let body = parse_blocks(xml, child)?;
                match entries.last_mut() {
                    Some(entry) => entry.children.extend(body),
                    None => xml.unknown_element(&element, &child),
                }
            }
            _ => xml.unknown_element(&element, &child),
        }
    }
    Ok(entries)
}

fn parse_parameter_list(
    xml: &XmlParser,
    element: Element<'_, '_>,
) -> Result<Option<ParameterList>> {
    let kind = element.attribute_string("kind")?;
    let kind = match kind.as_str() {
        "param" => ParameterListKind::Param,
        "retval" => ParameterListKind::RetVal,
        "exception" => ParameterListKind::Exception,
        "templateparam" => ParameterListKind::TemplateParam,
        other => {
            xml.unknown_value(&element, "kind", other);
            return Ok(None);
        }
    };

    let mut items = Vec::new();
    for item in element.child_elements() {
        if item.name() != "parameteritem" {
            xml.unknown_element(&element, &item);
            continue;
        }
        let mut names = Vec::new();
        let mut types = Vec::new();
        let mut description = Vec::new();
        for part in item.child_elements() {
            match part.name() {
                "parameternamelist" => {
                    for entry in part.child_elements() {
                        match entry.name() {
                            "parametername" => names.push(ParameterName {
                                direction: parse_direction(xml, entry),
                                children: parse_mixed(xml, entry)?,
                            }),
                            "parametertype" => types.push(parse_mixed(xml, entry)?),
                            _ => xml.unknown_element(&part, &entry),
                        }
                    }
                }
                "parameterdescription" => description = parse_blocks(xml, part)?,
                _ => xml.unknown_element(&item, &part),
            }
        }
        items.push(ParameterItem {
            names,
            types,
            description,
        });
    }
    Ok(Some(ParameterList { kind, items }))
}

fn parse_direction(xml: &XmlParser, element: Element<'_, '_>) -> Option<Direction> {
    let value = element.attribute("direction")?;
    match value {
        "in" => Some(Direction::In),
        "out" => Some(Direction::Out),
        "inout" => Some(Direction::InOut),
        other => {
            xml.unknown_value(&element, "direction", other);
            None
        }
    }
}

fn parse_table(xml: &XmlParser, element: Element<'_, '_>) -> Result<Table> {
    xml.check_attributes(&element, &["rows", "cols", "width"]);

    let mut table = Table {
        rows: element.attribute_number("rows")?,
        cols: element.attribute_number("cols")?,
        width: element.attribute("width").map(str::to_string),
        caption: None,
        body: Vec::new(),
    };
    for child in element.child_elements() {
        match child.name() {
            "caption" => table.caption = Some(parse_mixed(xml, child)?),
            "row" => {
                let mut row = Vec::new();
                for entry in child.child_elements() {
                    if entry.name() != "entry" {
                        xml.unknown_element(&child, &entry);
                        continue;
                    }
                    xml.check_attributes(
                        &entry,
                        &["thead", "colspan", "rowspan", "align", "valign", "width", "class"],
                    );
                    let attr = |name: &str| entry.attribute(name).map(str::to_string);
                    row.push(TableCell {
                        header: entry.flag("thead")?,
                        colspan: entry.optional_attribute_number("colspan")?,
                        rowspan: entry.optional_attribute_number("rowspan")?,
                        align: attr("align"),
                        valign: attr("valign"),
                        width: attr("width"),
                        class: attr("class"),
                        children: parse_blocks(xml, entry)?,
                    });
                }
                table.body.push(row);
            }
            _ => xml.unknown_element(&element, &child),
        }
    }
    Ok(table)
}

fn parse_section(xml: &XmlParser, element: Element<'_, '_>, level: u8) -> Result<DocSection> {
    let title = match element.first_inner_element("title") {
        Some(t) => parse_mixed(xml, t)?,
        None => Vec::new(),
    };
    Ok(DocSection {
        level,
        id: element.attribute("id").map(str::to_string),
        title,
        children: parse_blocks(xml, element)?,
    })
}

/// Character entities Doxygen emits as empty elements.
fn symbol_for(name: &str) -> Option<&'static str> {
    let symbol = match name {
        "nonbreakablespace" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "sbquo" => "\u{201a}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trademark" | "tm" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "minus" => "\u{2212}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "infin" => "\u{221e}",
        "micro" => "\u{b5}",
        "sect" => "\u{a7}",
        "zwj" => "\u{200d}",
        "zwnj" => "\u{200c}",
        "lrm" => "\u{200e}",
        "rlm" => "\u{200f}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "cent" => "\u{a2}",
        "pound" => "\u{a3}",
        "euro" => "\u{20ac}",
        "yen" => "\u{a5}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "permil" => "\u{2030}",
        "prime" => "\u{2032}",
        "alpha" => "\u{3b1}",
        "beta" => "\u{3b2}",
        "gamma" => "\u{3b3}",
        "delta" => "\u{3b4}",
        "epsilon" => "\u{3b5}",
        "lambda" => "\u{3bb}",
        "mu" => "\u{3bc}",
        "pi" => "\u{3c0}",
        "sigma" => "\u{3c3}",
        "tau" => "\u{3c4}",
        "phi" => "\u{3c6}",
        "omega" => "\u{3c9}",
        "Delta" => "\u{394}",
        "Sigma" => "\u{3a3}",
        "Omega" => "\u{3a9}",
        _ => return None,
    };
    Some(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, Diagnostics};
    use crate::xml::parse_document;

    fn parse(xml_text: &str, diagnostics: &Diagnostics) -> Description {
        let doc = parse_document(xml_text).unwrap();
        let root = Element::root(&doc);
        let parser = XmlParser::new(diagnostics);
        Description::parse(&parser, root, "detaileddescription").unwrap()
    }

    #[test]
    fn paragraph_keeps_mixed_order() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            "<detaileddescription><para>Use <ref refid=\"classAB\" kindref=\"compound\">B</ref> here.</para></detaileddescription>",
            &diagnostics,
        );
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], DocNode::Text("Use ".to_string()));
        assert!(matches!(&children[1], DocNode::Ref(r) if r.refid == "classAB" && r.kind == RefKind::Compound));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn whitespace_between_blocks_is_dropped() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            "<detaileddescription>\n  <para>one</para>\n  <para>two</para>\n</detaileddescription>",
            &diagnostics,
        );
        assert_eq!(desc.children.len(), 2);
    }

    #[test]
    fn simplesect_note() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            "<detaileddescription><para><simplesect kind=\"note\"><para>Careful.</para></simplesect></para></detaileddescription>",
            &diagnostics,
        );
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        match &children[0] {
            DocNode::SimpleSect(sect) => {
                assert_eq!(sect.kind, SimpleSectKind::Note);
                assert_eq!(sect.children.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_simplesect_kind_is_dropped() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            "<detaileddescription><para><simplesect kind=\"mystery\"><para>x</para></simplesect></para></detaileddescription>",
            &diagnostics,
        );
        assert_eq!(desc.children, vec![DocNode::Para(Vec::new())]);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedConstruct), 1);
    }

    #[test]
    fn unknown_elements_are_logged_not_fatal() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            "<detaileddescription><para>a<dot>digraph{}</dot>b</para></detaileddescription>",
            &diagnostics,
        );
        assert_eq!(
            desc.children,
            vec![DocNode::Para(vec![
                DocNode::Text("a".to_string()),
                DocNode::Text("b".to_string())
            ])]
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn parameter_list_with_directions() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            r#"<detaileddescription><para><parameterlist kind="param">
  <parameteritem>
    <parameternamelist><parametername direction="in">x</parametername></parameternamelist>
    <parameterdescription><para>The value.</para></parameterdescription>
  </parameteritem>
</parameterlist></para></detaileddescription>"#,
            &diagnostics,
        );
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        let list = children
            .iter()
            .find_map(|c| match c {
                DocNode::ParameterList(l) => Some(l),
                _ => None,
            })
            .unwrap();
        assert_eq!(list.kind, ParameterListKind::Param);
        assert_eq!(list.items[0].names[0].direction, Some(Direction::In));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn program_listing_tokens() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            r#"<detaileddescription><para><programlisting filename=".cpp"><codeline><highlight class="normal">int<sp/>x<sp/>=<sp/></highlight><highlight class="normal"><ref refid="classAB" kindref="compound">B</ref></highlight></codeline></programlisting></para></detaileddescription>"#,
            &diagnostics,
        );
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        let DocNode::ProgramListing(listing) = &children[0] else {
            panic!("expected listing");
        };
        assert_eq!(listing.filename.as_deref(), Some(".cpp"));
        let pieces = &listing.lines[0].highlights[0].pieces;
        assert_eq!(pieces[0], CodePiece::Text("int".to_string()));
        assert_eq!(pieces[1], CodePiece::Space(1));
        assert!(matches!(
            &listing.lines[0].highlights[1].pieces[0],
            CodePiece::Ref { refid, .. } if refid == "classAB"
        ));
    }

    #[test]
    fn table_cells_carry_spans() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            r#"<detaileddescription><para><table rows="1" cols="2"><row><entry thead="yes" colspan="2" align="center"><para>H</para></entry></row></table></para></detaileddescription>"#,
            &diagnostics,
        );
        let DocNode::Para(children) = &desc.children[0] else {
            panic!("expected para");
        };
        let DocNode::Table(table) = &children[0] else {
            panic!("expected table");
        };
        let cell = &table.body[0][0];
        assert!(cell.header);
        assert_eq!(cell.colspan, Some(2));
        assert_eq!(cell.align.as_deref(), Some("center"));
    }

    #[test]
    fn symbols_and_sections() {
        let diagnostics = Diagnostics::new();
        let desc = parse(
            r#"<detaileddescription><sect1 id="s1"><title>Intro</title><para>a<ndash/>b</para></sect1></detaileddescription>"#,
            &diagnostics,
        );
        let DocNode::Section(section) = &desc.children[0] else {
            panic!("expected section");
        };
        assert_eq!(section.level, 1);
        assert_eq!(section.id.as_deref(), Some("s1"));
        assert_eq!(section.title, vec![DocNode::Text("Intro".to_string())]);
        assert_eq!(
            section.children,
            vec![DocNode::Para(vec![
                DocNode::Text("a".to_string()),
                DocNode::Symbol("\u{2013}"),
                DocNode::Text("b".to_string()),
            ])]
        );
    }

    #[test]
    fn empty_description() {
        let diagnostics = Diagnostics::new();
        let desc = parse("<detaileddescription>\n</detaileddescription>", &diagnostics);
        assert!(desc.is_empty());
    }
}
