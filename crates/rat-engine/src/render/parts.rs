use rat_types::{NodeAstPart, TodoHint, view_path};
use regex::Regex;
use std::sync::LazyLock;

use crate::kanban::card_name;

use super::{Fragment, FragmentKind, LinkTarget, PartHandler, PartKind, RenderPass};

/// Scheme-qualified or protocol-relative URL.
static EXTERNAL_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*:)?//").unwrap());

pub(super) const KNOWN: &[(PartKind<'static>, PartHandler)] = &[
    (PartKind::Document, document),
    (PartKind::Heading, heading),
    (PartKind::Paragraph, paragraph),
    (PartKind::Text, text),
    (PartKind::Span, span),
    (PartKind::Strong, strong),
    (PartKind::Emphasis, emphasis),
    (PartKind::Code, code),
    (PartKind::CodeBlock, code_block),
    (PartKind::HorizontalRule, horizontal_rule),
    (PartKind::Link, link),
    (PartKind::GraphLink, graph_link),
    (PartKind::List, list),
    (PartKind::ListItem, list_item),
    (PartKind::Todo, todo),
    (PartKind::TodoEntry, todo_entry),
    (PartKind::HtmlBlock, html_block),
    (PartKind::Kanban, kanban),
    (PartKind::KanbanColumn, kanban_column),
    (PartKind::KanbanCard, kanban_card),
    (PartKind::Graphviz, graphviz),
    (PartKind::Image, image),
    (PartKind::Embed, embed),
    (PartKind::ParseError, parse_error),
    (PartKind::Table, table),
    (PartKind::TableHeader, table_header),
    (PartKind::TableBody, table_body),
    (PartKind::TableRow, table_row),
    (PartKind::TableCell, table_cell),
    (PartKind::ServerUnknown, server_unknown),
];

fn wrap(pass: &RenderPass<'_>, kind: FragmentKind, part: &NodeAstPart) -> Fragment {
    Fragment::with_children(kind, pass.children(part))
}

fn attr_text(part: &NodeAstPart) -> String {
    part.attr_str("text").unwrap_or_default()
}

/// Fallback for tags without a handler.
pub(super) fn unimplemented(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(
        pass,
        FragmentKind::Diagnostic {
            message: format!("unimplemented parser for {}", part.part_type),
            text: part.attr_str("text"),
        },
        part,
    )
}

fn server_unknown(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let message = if part.children.is_some() {
        "unknown container"
    } else {
        "unknown leaf"
    };
    wrap(
        pass,
        FragmentKind::Diagnostic {
            message: message.to_string(),
            text: part.attr_str("text"),
        },
        part,
    )
}

fn document(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Document, part)
}

fn heading(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let kind = match part.attr_i64("level") {
        Some(level @ 1..=6) => FragmentKind::Heading {
            tier: level as u8,
            diagnostic: None,
        },
        _ => FragmentKind::Heading {
            tier: 1,
            diagnostic: Some("unknown heading level".to_string()),
        },
    };
    wrap(pass, kind, part)
}

fn paragraph(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Paragraph, part)
}

fn text(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Text(attr_text(part)))
}

fn span(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Span(attr_text(part)))
}

fn strong(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Strong, part)
}

fn emphasis(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Emphasis, part)
}

fn code(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Code(attr_text(part)))
}

fn code_block(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let language = part
        .attr_str_any(&["language", "info"])
        .filter(|lang| !lang.is_empty())
        .map(|lang| if lang == "sh" { "bash".to_string() } else { lang });
    Fragment::new(FragmentKind::CodeBlock {
        language,
        text: attr_text(part),
    })
}

fn horizontal_rule(_: &RenderPass<'_>, _: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::HorizontalRule)
}

/// Link label: rendered children, else `title`, else the destination itself.
fn link_body(pass: &RenderPass<'_>, part: &NodeAstPart, destination: &str) -> Vec<Fragment> {
    if part.has_children() {
        return pass.children(part);
    }
    let label = part
        .attr_str("title")
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| destination.to_string());
    vec![Fragment::text(label)]
}

fn link(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let destination = part.attr_str("destination").unwrap_or_default();
    let target = if EXTERNAL_URL.is_match(&destination) {
        LinkTarget::External(destination.clone())
    } else {
        LinkTarget::Internal(view_path(&destination))
    };
    Fragment::with_children(
        FragmentKind::Link { target },
        link_body(pass, part, &destination),
    )
}

fn graph_link(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let destination = part.attr_str("destination").unwrap_or_default();
    let path = view_path(&destination);
    let body = link_body(pass, part, &path);
    Fragment::with_children(
        FragmentKind::Link {
            target: LinkTarget::Internal(path),
        },
        body,
    )
}

fn list(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let ordered = part.attr_str("type").as_deref() == Some("ordered")
        || part.attr_bool("ordered").unwrap_or(false);
    wrap(pass, FragmentKind::List { ordered }, part)
}

fn list_item(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::ListItem, part)
}

fn todo(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let hints = TodoHint::from_attr(part.attr("hints"));
    wrap(pass, FragmentKind::Todo { hints }, part)
}

fn todo_entry(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let done = part.attr_bool("done").unwrap_or(false);
    let children = if part.has_children() {
        pass.children(part)
    } else {
        vec![Fragment::text(attr_text(part))]
    };
    Fragment::with_children(FragmentKind::TodoEntry { done }, children)
}

fn html_block(_: &RenderPass<'_>, _: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Empty)
}

fn kanban(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Kanban, part)
}

fn kanban_column(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let kind = FragmentKind::KanbanColumn {
        id: part.attr_str("id").unwrap_or_default(),
        name: part.attr_str_any(&["name", "title"]).unwrap_or_default(),
        path: part.attr_str("path").unwrap_or_default(),
    };
    wrap(pass, kind, part)
}

fn kanban_card(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let kind = FragmentKind::KanbanCard {
        id: part.attr_str("id").unwrap_or_default(),
        name: card_name(part).unwrap_or_default(),
    };
    wrap(pass, kind, part)
}

fn graphviz(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Graphviz {
        dot: attr_text(part),
    })
}

fn image(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    let alt = part
        .children()
        .first()
        .map(NodeAstPart::plain_text)
        .unwrap_or_default();
    Fragment::new(FragmentKind::Image {
        src: part.attr_str("src").unwrap_or_default(),
        alt,
    })
}

fn embed(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Embed {
        url: part.attr_str("url").unwrap_or_default(),
    })
}

fn parse_error(_: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    Fragment::new(FragmentKind::Error {
        message: part.attr_str("err").unwrap_or_default(),
    })
}

fn table(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::Table, part)
}

fn table_header(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::TableHeader, part)
}

fn table_body(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::TableBody, part)
}

fn table_row(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::TableRow, part)
}

fn table_cell(pass: &RenderPass<'_>, part: &NodeAstPart) -> Fragment {
    wrap(pass, FragmentKind::TableCell, part)
}
