use std::collections::HashMap;

use serde_json::{Map, Value};

use super::dataset::Dataset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    User,
    Role,
    Database,
    Table,
}

impl NodeKind {
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::User => "user_",
            Self::Role => "role_",
            Self::Database => "db_",
            Self::Table => "table_",
        }
    }

    pub fn node_id(self, name: &str) -> String {
        format!("{}{name}", self.id_prefix())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// A user holds a role.
    Membership,
    /// A role holds a privilege on a database or table.
    Grant,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttributes {
    pub email: Option<String>,
    pub comment: Option<String>,
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub attributes: NodeAttributes,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeAttributes {
    pub privilege: Option<String>,
    pub granted_by: Option<String>,
    pub role: Option<String>,
    pub granted_on: Option<String>,
    pub object_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub attributes: EdgeAttributes,
}

impl Edge {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// Endpoint opposite `id`, or `None` when the edge does not touch `id`.
    pub fn other_endpoint(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(self.target.as_str())
        } else if self.target == id {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

/// Full node/edge graph for one dataset revision.
///
/// Nodes keep build order and are indexed by id. Edges hold endpoint ids only
/// and may dangle; resolving an endpoint is a lookup through [`Graph::node`].
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges with at least one endpoint missing from the node set.
    pub fn dangling_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| !self.contains(&edge.source) || !self.contains(&edge.target))
            .count()
    }

    pub fn edges_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }

    /// Sorted (source, target, kind) triples, duplicates included.
    pub fn edge_triples(&self) -> Vec<(&str, &str, EdgeKind)> {
        let mut triples = self
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.kind))
            .collect::<Vec<_>>();
        triples.sort_unstable();
        triples
    }

    fn push_node(&mut self, node: Node) {
        if self.index_by_id.contains_key(&node.id) {
            tracing::debug!(id = %node.id, "skipping duplicate node");
            return;
        }
        self.index_by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }
}

/// Translates a dataset into nodes and edges without touching the input.
pub fn build_graph(dataset: &Dataset) -> Graph {
    let node_capacity = dataset.users.len() + dataset.roles.len() + dataset.databases.len();
    let mut graph = Graph {
        nodes: Vec::with_capacity(node_capacity),
        index_by_id: HashMap::with_capacity(node_capacity),
        edges: Vec::with_capacity(dataset.user_grant_count() + dataset.role_grant_count()),
    };

    for user in &dataset.users {
        graph.push_node(Node {
            id: NodeKind::User.node_id(&user.name),
            name: user.name.clone(),
            kind: NodeKind::User,
            attributes: NodeAttributes {
                email: user.email().map(str::to_owned),
                comment: user.comment().map(str::to_owned),
                extra: user.extra.clone(),
            },
        });
    }

    for role in &dataset.roles {
        graph.push_node(Node {
            id: NodeKind::Role.node_id(&role.name),
            name: role.name.clone(),
            kind: NodeKind::Role,
            attributes: NodeAttributes {
                email: None,
                comment: role.comment().map(str::to_owned),
                extra: role.extra.clone(),
            },
        });
    }

    for database in &dataset.databases {
        graph.push_node(Node {
            id: NodeKind::Database.node_id(&database.name),
            name: database.name.clone(),
            kind: NodeKind::Database,
            attributes: NodeAttributes {
                email: None,
                comment: database.comment().map(str::to_owned),
                extra: database.extra.clone(),
            },
        });
    }

    for (user_name, assignments) in &dataset.user_grants {
        let source = NodeKind::User.node_id(user_name);
        for assignment in assignments {
            let Some(role) = assignment.role().filter(|role| !role.is_empty()) else {
                continue;
            };

            graph.edges.push(Edge {
                source: source.clone(),
                target: NodeKind::Role.node_id(role),
                kind: EdgeKind::Membership,
                attributes: EdgeAttributes {
                    granted_by: assignment.granted_by().map(str::to_owned),
                    role: Some(role.to_owned()),
                    ..EdgeAttributes::default()
                },
            });
        }
    }

    for (role_name, grants) in &dataset.role_grants {
        let source = NodeKind::Role.node_id(role_name);
        for grant in grants {
            let Some(database) = grant.database_name() else {
                continue;
            };

            graph.edges.push(Edge {
                source: source.clone(),
                target: NodeKind::Database.node_id(database),
                kind: EdgeKind::Grant,
                attributes: EdgeAttributes {
                    privilege: Some(grant.privilege.clone()),
                    granted_by: grant.granted_by().map(str::to_owned),
                    role: None,
                    granted_on: Some(grant.granted_on.clone()),
                    object_name: Some(grant.name.clone()),
                },
            });
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dangling = graph.dangling_edge_count(),
        "built permissions graph"
    );

    graph
}
