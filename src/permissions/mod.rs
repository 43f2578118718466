//! Permissions graph core: dataset model, graph builder, filtering,
//! connectivity highlighting and info-panel formatting.

mod connectivity;
mod dataset;
mod export;
mod filter;
mod graph;
mod info;
mod locale;
mod state;

pub use connectivity::{Connectivity, EdgeEmphasis, NodeEmphasis, connected_edges, highlight_connected};
pub use dataset::{
    DatabaseEntry, Dataset, GrantTarget, MembershipGrant, Nullable, PrivilegeGrant,
    RoleAssignment, RoleEntry, UserEntry, owning_database,
};
pub use export::{export_dataset, export_dataset_on, export_file_name};
pub use filter::{TypeFilter, VisibleSubgraph, filter_graph, name_matches};
pub use graph::{Edge, EdgeAttributes, EdgeKind, Graph, Node, NodeAttributes, NodeKind, build_graph};
pub use info::{InfoLine, LineStyle, RELATED_LIMIT, connected_info, node_info, tooltip};
pub use locale::{Locale, Tally};
pub use state::{ReloadGate, ReloadTicket, ViewState};
