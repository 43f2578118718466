use super::connectivity::connected_edges;
use super::dataset::Dataset;
use super::filter::VisibleSubgraph;
use super::graph::{Edge, Graph, Node, NodeKind};
use super::locale::Locale;

/// Related-edge listing cap for every kind except users.
pub const RELATED_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Field,
    Heading,
    Item,
    Overflow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoLine {
    pub style: LineStyle,
    pub text: String,
}

impl InfoLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

fn header_lines(node: &Node, locale: Locale) -> Vec<InfoLine> {
    vec![
        InfoLine::new(LineStyle::Title, node.name.as_str()),
        InfoLine::new(
            LineStyle::Field,
            format!("{}: {}", locale.type_field(), locale.node_kind(node.kind)),
        ),
    ]
}

fn relation_text(edge: &Edge, other: &Node, locale: Locale) -> String {
    let mut text = format!("{}: {}", locale.edge_kind(edge.kind), other.name);
    if let Some(privilege) = &edge.attributes.privilege {
        text.push_str(&format!(" ({privilege})"));
    }
    if let Some(role) = &edge.attributes.role {
        text.push_str(&format!(" ({role})"));
    }
    if let Some(grantor) = &edge.attributes.granted_by {
        text.push(' ');
        text.push_str(&locale.granted_by(grantor));
    }
    text
}

/// Full summary of `node` with every related edge from the full graph.
///
/// The other endpoint of each edge is resolved in the visible subgraph first
/// and then in the full graph. Edges whose endpoint resolves nowhere are left
/// out of the listing and of every count.
pub fn node_info(
    node: &Node,
    graph: &Graph,
    visible: &VisibleSubgraph,
    dataset: &Dataset,
    locale: Locale,
) -> Vec<InfoLine> {
    let mut lines = header_lines(node, locale);

    if node.kind == NodeKind::User
        && let Some(email) = &node.attributes.email
    {
        lines.push(InfoLine::new(
            LineStyle::Field,
            format!("{}: {email}", locale.email_field()),
        ));
    }
    if let Some(comment) = node.attributes.comment.as_deref().filter(|c| !c.is_empty()) {
        lines.push(InfoLine::new(
            LineStyle::Field,
            format!("{}: {comment}", locale.comment_field()),
        ));
    }

    let related = graph
        .edges_touching(&node.id)
        .filter_map(|edge| {
            let other_id = edge.other_endpoint(&node.id)?;
            let other = visible.node(other_id).or_else(|| graph.node(other_id))?;
            Some((edge, other))
        })
        .collect::<Vec<_>>();

    if !related.is_empty() {
        lines.push(InfoLine::new(
            LineStyle::Heading,
            locale.related_heading(related.len()),
        ));

        let shown = if node.kind == NodeKind::User {
            related.len()
        } else {
            related.len().min(RELATED_LIMIT)
        };
        for (edge, other) in &related[..shown] {
            lines.push(InfoLine::new(
                LineStyle::Item,
                relation_text(edge, other, locale),
            ));
        }

        if related.len() > shown {
            lines.push(InfoLine::new(
                LineStyle::Overflow,
                locale.overflow(related.len() - shown),
            ));
        }
    }

    if node.kind == NodeKind::User
        && let Some(assignments) = dataset.user_grants.get(&node.name)
        && !assignments.is_empty()
    {
        lines.push(InfoLine::new(
            LineStyle::Heading,
            locale.role_assignments_heading(),
        ));
        for assignment in assignments {
            let mut text = assignment.role().unwrap_or_default().to_owned();
            if let Some(grantor) = assignment.granted_by() {
                text.push_str(&format!(" ({})", locale.granted_by(grantor)));
            }
            lines.push(InfoLine::new(LineStyle::Item, text));
        }
    }

    lines
}

/// Summary of `node` restricted to the visible edges that touch it.
pub fn connected_info(node: &Node, visible: &VisibleSubgraph, locale: Locale) -> Vec<InfoLine> {
    let mut lines = header_lines(node, locale);

    let edges = connected_edges(visible, &node.id);
    if edges.is_empty() {
        return lines;
    }

    lines.push(InfoLine::new(LineStyle::Heading, locale.connected_heading()));
    for edge in edges {
        let Some(other) = edge
            .other_endpoint(&node.id)
            .and_then(|other_id| visible.node(other_id))
        else {
            continue;
        };
        let mut text = format!("{}: {}", locale.edge_kind(edge.kind), other.name);
        if let Some(privilege) = &edge.attributes.privilege {
            text.push_str(&format!(" ({privilege})"));
        }
        lines.push(InfoLine::new(LineStyle::Item, text));
    }

    lines
}

/// Hover text for a node.
pub fn tooltip(node: &Node, locale: Locale) -> Vec<String> {
    let mut lines = vec![
        node.name.clone(),
        format!("{}: {}", locale.type_field(), locale.node_kind(node.kind)),
    ];
    if let Some(comment) = node.attributes.comment.as_deref().filter(|c| !c.is_empty()) {
        lines.push(format!("{}: {comment}", locale.comment_field()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::permissions::dataset::{DatabaseEntry, PrivilegeGrant, RoleEntry};
    use crate::permissions::filter::{TypeFilter, filter_graph};
    use crate::permissions::graph::build_graph;

    fn wide_role_dataset(grants: usize) -> Dataset {
        let databases = (0..grants)
            .map(|index| DatabaseEntry {
                name: format!("DB{index:02}"),
                ..Default::default()
            })
            .collect::<Vec<_>>();
        let role_grants: Vec<PrivilegeGrant> = databases
            .iter()
            .map(|database| PrivilegeGrant {
                privilege: "USAGE".to_owned(),
                granted_on: "DATABASE".to_owned(),
                name: database.name.clone(),
                ..Default::default()
            })
            .collect();
        Dataset {
            roles: vec![RoleEntry {
                name: "WIDE".to_owned(),
                comment: Some(Some("many grants".to_owned())),
                ..Default::default()
            }],
            databases,
            role_grants: [("WIDE".to_owned(), role_grants)].into(),
            ..Default::default()
        }
    }

    #[test]
    fn non_user_listing_is_capped_with_overflow() {
        let dataset = wide_role_dataset(13);
        let graph = Arc::new(build_graph(&dataset));
        let visible = filter_graph(&graph, TypeFilter::All, "");
        let role = graph.node("role_WIDE").expect("role exists");

        let lines = node_info(role, &graph, &visible, &dataset, Locale::En);
        let items = lines.iter().filter(|l| l.style == LineStyle::Item).count();
        assert_eq!(items, RELATED_LIMIT);
        assert_eq!(lines[2].text, "Description: many grants");
        assert_eq!(lines[3].text, "Related permissions (13):");
        let last = lines.last().expect("lines");
        assert_eq!(last.style, LineStyle::Overflow);
        assert_eq!(last.text, "... +3 more");
    }

    #[test]
    fn unresolvable_edges_do_not_count_toward_the_cap() {
        let mut dataset = wide_role_dataset(12);
        dataset.databases.truncate(9);
        let graph = Arc::new(build_graph(&dataset));
        let visible = filter_graph(&graph, TypeFilter::All, "");
        let role = graph.node("role_WIDE").expect("role exists");

        let lines = node_info(role, &graph, &visible, &dataset, Locale::En);
        assert!(lines.iter().any(|l| l.text == "Related permissions (9):"));
        let items = lines.iter().filter(|l| l.style == LineStyle::Item).count();
        assert_eq!(items, 9);
        assert!(lines.iter().all(|l| l.style != LineStyle::Overflow));
    }

    #[test]
    fn filtered_out_endpoints_resolve_through_the_full_graph() {
        let dataset = wide_role_dataset(2);
        let graph = Arc::new(build_graph(&dataset));
        let visible = filter_graph(&graph, TypeFilter::Roles, "");
        let role = graph.node("role_WIDE").expect("role exists");

        let lines = node_info(role, &graph, &visible, &dataset, Locale::En);
        assert!(lines.iter().any(|l| l.text == "Grant: DB00 (USAGE)"));

        let connected = connected_info(role, &visible, Locale::En);
        assert_eq!(connected.len(), 2, "no visible edges, header only");
    }

    #[test]
    fn japanese_labels() {
        let dataset = wide_role_dataset(11);
        let graph = Arc::new(build_graph(&dataset));
        let visible = filter_graph(&graph, TypeFilter::All, "");
        let role = graph.node("role_WIDE").expect("role exists");

        let lines = node_info(role, &graph, &visible, &dataset, Locale::Ja);
        assert_eq!(lines[1].text, "タイプ: ロール");
        assert_eq!(lines.last().map(|l| l.text.as_str()), Some("... 他 1 件"));
    }

    #[test]
    fn tooltip_skips_missing_comment() {
        let dataset = wide_role_dataset(1);
        let graph = build_graph(&dataset);
        let database = graph.node("db_DB00").expect("database exists");
        assert_eq!(tooltip(database, Locale::En), vec!["DB00", "Type: Database"]);
    }
}
