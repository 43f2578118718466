//! Builder, filter, highlighter and info formatter working together.

mod common;

use std::collections::HashSet;

use grant_graph::permissions::{
    Dataset, EdgeEmphasis, EdgeKind, LineStyle, Locale, NodeEmphasis, NodeKind, RELATED_LIMIT,
    TypeFilter, ViewState, build_graph, connected_info, filter_graph, highlight_connected,
    node_info,
};

use common::fixtures::{
    DANGLING_JSON, SINGLE_CHAIN_JSON, TABLE_GRANT_JSON, dataset, graph, sample_graph,
    wide_role_json,
};

fn node_ids(graph: &grant_graph::permissions::Graph) -> Vec<&str> {
    graph.nodes().iter().map(|node| node.id.as_str()).collect()
}

#[test]
fn test_single_chain_builds_membership_and_grant() {
    let graph = graph(SINGLE_CHAIN_JSON);

    assert_eq!(node_ids(&graph), vec!["user_U1", "role_R1", "db_D1"]);
    assert_eq!(
        graph.edge_triples(),
        vec![
            ("role_R1", "db_D1", EdgeKind::Grant),
            ("user_U1", "role_R1", EdgeKind::Membership),
        ]
    );

    let grant = graph
        .edges()
        .iter()
        .find(|edge| edge.kind == EdgeKind::Grant)
        .expect("grant edge");
    assert_eq!(grant.attributes.privilege.as_deref(), Some("SELECT"));
    assert_eq!(grant.attributes.granted_on.as_deref(), Some("DATABASE"));
}

#[test]
fn test_table_grant_targets_owning_database() {
    let graph = graph(TABLE_GRANT_JSON);

    assert_eq!(
        graph.edge_triples(),
        vec![("role_REPORTER", "db_PROD_DB", EdgeKind::Grant)]
    );
    let edge = &graph.edges()[0];
    assert_eq!(edge.attributes.object_name.as_deref(), Some("PROD_DB.SCHEMA1.USERS"));
    assert!(!graph.contains("table_PROD_DB.SCHEMA1.USERS"));
}

#[test]
fn test_users_filter_drops_membership_edges() {
    let graph = graph(SINGLE_CHAIN_JSON);
    let visible = filter_graph(&graph, TypeFilter::Users, "");

    let ids = visible.nodes().map(|node| node.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["user_U1"]);
    assert_eq!(visible.edge_count(), 0);
}

#[test]
fn test_search_ignores_case() {
    let graph = graph(SINGLE_CHAIN_JSON);

    for term in ["u1", "U1"] {
        let visible = filter_graph(&graph, TypeFilter::All, term);
        assert!(visible.contains("user_U1"), "term {term:?}");
        assert!(!visible.contains("role_R1"), "term {term:?}");
    }
}

#[test]
fn test_search_keeps_surrounding_whitespace() {
    let input = dataset(
        r#"{"users": [], "roles": [{"name": "MY ROLE"}, {"name": "ROLE_X"}], "databases": []}"#,
    );
    let graph = std::sync::Arc::new(build_graph(&input));

    let visible = filter_graph(&graph, TypeFilter::All, " ROLE");
    let names = visible.nodes().map(|node| node.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["MY ROLE"]);

    assert!(filter_graph(&graph, TypeFilter::All, " ").nodes().all(|node| node.name == "MY ROLE"));
    assert!(filter_graph(&graph, TypeFilter::All, "  u1  ").is_empty());
}

#[test]
fn test_tables_filter_shows_databases() {
    let graph = graph(SINGLE_CHAIN_JSON);
    let visible = filter_graph(&graph, TypeFilter::Tables, "");

    let ids = visible.nodes().map(|node| node.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["db_D1"]);
}

#[test]
fn test_sample_dataset_shape() {
    let sample = Dataset::sample();
    assert_eq!(sample.roles.len(), 6);
    assert_eq!(sample.users.len(), 4);
    assert_eq!(sample.databases.len(), 3);
    assert!(sample.validate().is_ok());

    let graph = sample_graph();
    let triples = graph.edge_triples();
    for (user, role) in [
        ("user_ANALYST_USER", "role_DATA_ANALYST"),
        ("user_ENGINEER_USER", "role_DATA_ENGINEER"),
    ] {
        assert!(triples.contains(&(user, role, EdgeKind::Membership)));
        assert!(
            triples
                .iter()
                .any(|(source, _, kind)| *source == role && *kind == EdgeKind::Grant),
            "{role} has no grant edge"
        );
    }
}

#[test]
fn test_build_is_deterministic() {
    let input = dataset(DANGLING_JSON);
    let before = input.clone();

    let first = build_graph(&input);
    let second = build_graph(&input);

    assert_eq!(node_ids(&first), node_ids(&second));
    assert_eq!(first.edge_triples(), second.edge_triples());
    assert_eq!(input, before);
}

#[test]
fn test_duplicate_names_produce_one_node() {
    let input = dataset(
        r#"{"users": [{"name": "ADMIN"}, {"name": "ADMIN"}],
            "roles": [{"name": "ADMIN"}], "databases": []}"#,
    );
    let graph = build_graph(&input);

    let ids = node_ids(&graph);
    let unique = ids.iter().collect::<HashSet<_>>();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids, vec!["user_ADMIN", "role_ADMIN"]);
}

#[test]
fn test_dangling_edges_never_become_visible() {
    let graph = graph(DANGLING_JSON);

    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.dangling_edge_count(), 3);

    for filter in TypeFilter::ALL {
        for search in ["", "a", "sales"] {
            let visible = filter_graph(&graph, filter, search);
            for edge in visible.edges() {
                assert!(visible.contains(&edge.source));
                assert!(visible.contains(&edge.target));
            }
        }
    }

    let visible = filter_graph(&graph, TypeFilter::All, "");
    assert_eq!(visible.edge_count(), 2);
}

#[test]
fn test_other_object_classes_are_ignored() {
    let graph = graph(DANGLING_JSON);
    assert!(
        graph
            .edges()
            .iter()
            .all(|edge| edge.attributes.granted_on.as_deref() != Some("WAREHOUSE"))
    );
}

#[test]
fn test_narrowing_never_grows_the_visible_set() {
    let graph = sample_graph();
    let everything = filter_graph(&graph, TypeFilter::All, "");

    for filter in TypeFilter::ALL {
        let by_type = filter_graph(&graph, filter, "");
        let narrowed = filter_graph(&graph, filter, "data");
        assert!(by_type.node_count() <= everything.node_count());
        assert!(narrowed.node_count() <= by_type.node_count());
        for node in narrowed.nodes() {
            assert!(by_type.contains(&node.id));
        }
    }
}

#[test]
fn test_highlight_marks_one_hop_neighborhood() {
    let graph = graph(SINGLE_CHAIN_JSON);
    let visible = filter_graph(&graph, TypeFilter::All, "");
    let connectivity = highlight_connected(&visible, Some("role_R1"));

    assert_eq!(connectivity.node_emphasis("role_R1"), NodeEmphasis::Selected);
    assert_eq!(connectivity.node_emphasis("user_U1"), NodeEmphasis::Connected);
    assert_eq!(connectivity.node_emphasis("db_D1"), NodeEmphasis::Connected);
    assert_eq!(connectivity.connected_node_count(), 3);
    for position in 0..visible.edge_count() {
        assert_eq!(connectivity.edge_emphasis(position), EdgeEmphasis::Highlighted);
    }

    let connectivity = highlight_connected(&visible, Some("user_U1"));
    assert_eq!(connectivity.node_emphasis("db_D1"), NodeEmphasis::Faded);
    let hidden = (0..visible.edge_count())
        .filter(|&position| connectivity.edge_emphasis(position) == EdgeEmphasis::Hidden)
        .count();
    assert_eq!(hidden, 1);
}

#[test]
fn test_isolated_selection_fades_everything_else() {
    let graph = sample_graph();
    let visible = filter_graph(&graph, TypeFilter::All, "");
    let connectivity = highlight_connected(&visible, Some("user_READONLY_USER"));

    assert_eq!(connectivity.connected_node_count(), 1);
    for node in visible.nodes() {
        let selected = node.id == "user_READONLY_USER";
        let expected = if selected {
            NodeEmphasis::Selected
        } else {
            NodeEmphasis::Faded
        };
        assert_eq!(connectivity.node_emphasis(&node.id), expected);
        assert_eq!(connectivity.node_is_connected(&node.id), selected);
    }
    for position in 0..visible.edge_count() {
        assert!(!connectivity.edge_is_connected(position));
        assert_eq!(connectivity.edge_emphasis(position), EdgeEmphasis::Hidden);
    }
}

#[test]
fn test_cleared_state_is_all_normal() {
    let graph = sample_graph();
    let visible = filter_graph(&graph, TypeFilter::All, "");

    for selection in [None, Some("user_NOBODY")] {
        let connectivity = highlight_connected(&visible, selection);
        assert!(connectivity.is_cleared());
        for node in visible.nodes() {
            assert!(connectivity.node_is_connected(&node.id));
            assert_eq!(connectivity.node_emphasis(&node.id), NodeEmphasis::Normal);
        }
        for position in 0..visible.edge_count() {
            assert!(connectivity.edge_is_connected(position));
            assert_eq!(connectivity.edge_emphasis(position), EdgeEmphasis::Normal);
        }
    }
}

#[test]
fn test_connected_info_is_limited_to_visible_edges() {
    let graph = sample_graph();
    let visible = filter_graph(&graph, TypeFilter::Roles, "");
    let role = graph.node("role_DATA_ANALYST").expect("role exists");

    let connected = connected_info(role, &visible, Locale::En);
    assert_eq!(connected[0].text, "DATA_ANALYST");
    assert_eq!(connected[1].text, "Type: Role");
    assert_eq!(connected.len(), 2, "no visible edges under the roles filter");

    let full = node_info(role, &graph, &visible, &Dataset::sample(), Locale::En);
    assert!(full.iter().any(|line| line.text == "Related permissions (3):"));
    assert!(full.iter().any(|line| line.text == "Grant: PROD_DB (SELECT)"));
    assert!(
        full.iter()
            .any(|line| line.text == "Membership: ANALYST_USER (DATA_ANALYST) by USERADMIN")
    );
}

#[test]
fn test_node_info_caps_non_user_listings() {
    let input = dataset(&wide_role_json(14));
    let graph = std::sync::Arc::new(build_graph(&input));
    let visible = filter_graph(&graph, TypeFilter::All, "");
    let role = graph.node("role_WIDE").expect("role exists");

    let lines = node_info(role, &graph, &visible, &input, Locale::En);
    let items = lines.iter().filter(|line| line.style == LineStyle::Item).count();
    assert_eq!(items, RELATED_LIMIT);
    assert_eq!(lines.last().map(|line| line.text.as_str()), Some("... +4 more"));
}

#[test]
fn test_node_info_leaves_out_dangling_edges() {
    let input = dataset(DANGLING_JSON);
    let graph = std::sync::Arc::new(build_graph(&input));
    let visible = filter_graph(&graph, TypeFilter::All, "");
    let alice = graph.node("user_ALICE").expect("user exists");

    let lines = node_info(alice, &graph, &visible, &input, Locale::En);
    let heading = lines
        .iter()
        .position(|line| line.style == LineStyle::Heading)
        .expect("related heading");
    assert_eq!(lines[heading].text, "Related permissions (1):");

    let related_items = lines[heading + 1..]
        .iter()
        .take_while(|line| line.style == LineStyle::Item)
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(related_items, vec!["Membership: ANALYST (ANALYST) by USERADMIN"]);
    assert!(lines.iter().all(|line| line.style != LineStyle::Overflow));
}

#[test]
fn test_user_info_lists_role_assignments() {
    let sample = Dataset::sample();
    let graph = std::sync::Arc::new(build_graph(&sample));
    let visible = filter_graph(&graph, TypeFilter::All, "");
    let user = graph.node("user_ANALYST_USER").expect("user exists");
    assert_eq!(user.kind, NodeKind::User);

    let lines = node_info(user, &graph, &visible, &sample, Locale::En);
    let texts = lines.iter().map(|line| line.text.as_str()).collect::<Vec<_>>();
    assert!(texts.contains(&"Email: analyst@company.com"));
    assert!(texts.contains(&"Role assignments:"));
    assert!(texts.contains(&"PUBLIC (by USERADMIN)"));
    assert!(lines.iter().all(|line| line.style != LineStyle::Overflow));
}

#[test]
fn test_view_state_keeps_visible_selection_across_refilter() {
    let state = ViewState::new(Dataset::sample()).with_selection(Some("role_DATA_ANALYST"));
    assert_eq!(state.selection(), Some("role_DATA_ANALYST"));

    let searched = state.with_search("data");
    assert_eq!(searched.selection(), Some("role_DATA_ANALYST"));

    let users_only = searched.with_type_filter(TypeFilter::Users);
    assert_eq!(users_only.selection(), None);
    assert!(users_only.connectivity().is_cleared());

    let reset = users_only.reset();
    assert_eq!(reset.type_filter(), TypeFilter::All);
    assert_eq!(reset.search(), "");
    assert_eq!(reset.visible().node_count(), reset.graph().node_count());
}

#[test]
fn test_dataset_replacement_keeps_filter_and_search() {
    let state = ViewState::new(Dataset::sample())
        .with_type_filter(TypeFilter::Roles)
        .with_search("admin")
        .with_selection(Some("role_SYSADMIN"));

    let replaced = state.with_dataset(dataset(SINGLE_CHAIN_JSON));
    assert_eq!(replaced.type_filter(), TypeFilter::Roles);
    assert_eq!(replaced.search(), "admin");
    assert_eq!(replaced.selection(), None);
    assert!(replaced.visible().is_empty());
    assert!(replaced.revision() > state.revision());
}
