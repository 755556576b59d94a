//! Tables render as HTML so cells can span rows and columns.

use super::description::{render_blocks, render_inline};
use super::escape::escape_attribute;
use super::RenderContext;
use crate::model::description::{Table, TableCell};

pub fn render_table(ctx: &RenderContext, table: &Table) -> Vec<String> {
    let cell_ctx = ctx.in_html();
    let mut out = vec!["<table>".to_string()];
    if let Some(caption) = &table.caption {
        out.push(format!(
            "<caption>{}</caption>",
            render_inline(&cell_ctx, caption).trim()
        ));
    }
    for row in &table.body {
        out.push("<tr>".to_string());
        for cell in row {
            out.push(render_cell(&cell_ctx, cell));
        }
        out.push("</tr>".to_string());
    }
    out.push("</table>".to_string());
    out
}

fn render_cell(ctx: &RenderContext, cell: &TableCell) -> String {
    let tag = if cell.header { "th" } else { "td" };
    let format = ctx.format();
    let mut attributes = String::new();
    if let Some(n) = cell.colspan.filter(|&n| n > 1) {
        attributes.push_str(&format!(r#" {}="{n}""#, format.span_attribute("colspan")));
    }
    if let Some(n) = cell.rowspan.filter(|&n| n > 1) {
        attributes.push_str(&format!(r#" {}="{n}""#, format.span_attribute("rowspan")));
    }
    if let Some(align) = &cell.align {
        attributes.push_str(&format!(r#" align="{}""#, escape_attribute(align)));
    }
    let content = render_blocks(ctx, &cell.children)
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("<br/>");
    format!("<{tag}{attributes}>{content}</{tag}>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::model::description::DocNode;
    use crate::options::Options;
    use crate::render::PageFormat;
    use crate::view::test_support::{build, compound};

    fn cell(header: bool, colspan: Option<u32>, text: &str) -> TableCell {
        TableCell {
            header,
            colspan,
            rowspan: None,
            align: None,
            valign: None,
            width: None,
            class: None,
            children: vec![DocNode::Para(vec![DocNode::Text(text.to_string())])],
        }
    }

    fn table() -> Table {
        Table {
            rows: 2,
            cols: 2,
            width: None,
            caption: None,
            body: vec![
                vec![cell(true, None, "Name"), cell(true, None, "Value")],
                vec![cell(false, Some(2), "a < b")],
            ],
        }
    }

    #[test]
    fn mdx_spans_are_camel_case() {
        let (model, diagnostics) = build(&[&compound("classAB", "class", "A::B", "")]);
        let options = Options::default();
        let ctx = RenderContext::new(&model, &options, &diagnostics);
        assert_eq!(
            render_table(&ctx, &table()),
            vec![
                "<table>",
                "<tr>",
                "<th>Name</th>",
                "<th>Value</th>",
                "</tr>",
                "<tr>",
                r#"<td colSpan="2">a &lt; b</td>"#,
                "</tr>",
                "</table>",
            ]
        );
    }

    #[test]
    fn markdown_spans_and_links() {
        let (model, _) = build(&[&compound("classAB", "class", "A::B", "")]);
        let options = Options {
            format: PageFormat::Md,
            ..Options::default()
        };
        let diagnostics = Diagnostics::new();
        let ctx = RenderContext::new(&model, &options, &diagnostics);
        let mut t = table();
        t.body[1][0].children = vec![DocNode::Ref(crate::model::description::DocRef {
            refid: "classAB".to_string(),
            kind: crate::model::description::RefKind::Compound,
            external: None,
            children: vec![DocNode::Text("B".to_string())],
        })];
        let out = render_table(&ctx, &t);
        assert_eq!(out[6], r#"<td colspan="2"><a href="/api/classes/a/b">B</a></td>"#);
    }

    #[test]
    fn cell_text_stays_literal() {
        let (model, diagnostics) = build(&[]);
        let options = Options::default();
        let ctx = RenderContext::new(&model, &options, &diagnostics);
        let mut t = table();
        t.body[1][0] = cell(false, Some(2), "operator* (_a)");
        let out = render_table(&ctx, &t);
        assert_eq!(out[6], r#"<td colSpan="2">operator&#42; (&#95;a)</td>"#);
    }
}
