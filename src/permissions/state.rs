use std::sync::Arc;

use super::connectivity::{Connectivity, highlight_connected};
use super::dataset::Dataset;
use super::filter::{TypeFilter, VisibleSubgraph, filter_graph};
use super::graph::{Graph, Node, build_graph};

/// One revision of everything the view derives from a dataset.
///
/// Transitions return a new record and leave `self` untouched. Derived parts
/// are shared through `Arc`, so a transition that does not change an input
/// reuses the previous derivation.
#[derive(Clone, Debug)]
pub struct ViewState {
    revision: u64,
    dataset: Arc<Dataset>,
    graph: Arc<Graph>,
    type_filter: TypeFilter,
    search: String,
    visible: Arc<VisibleSubgraph>,
    selection: Option<String>,
    connectivity: Arc<Connectivity>,
    detailed_view: bool,
}

impl ViewState {
    pub fn new(dataset: Dataset) -> Self {
        let dataset = Arc::new(dataset);
        let graph = Arc::new(build_graph(&dataset));
        let visible = Arc::new(filter_graph(&graph, TypeFilter::All, ""));
        Self {
            revision: 0,
            dataset,
            graph,
            type_filter: TypeFilter::All,
            search: String::new(),
            visible,
            selection: None,
            connectivity: Arc::new(Connectivity::cleared()),
            detailed_view: false,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn visible(&self) -> &VisibleSubgraph {
        &self.visible
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.as_deref().and_then(|id| self.visible.node(id))
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn detailed_view(&self) -> bool {
        self.detailed_view
    }

    /// Replaces the dataset, keeping filter and search, dropping the selection.
    pub fn with_dataset(&self, dataset: Dataset) -> Self {
        let dataset = Arc::new(dataset);
        let graph = Arc::new(build_graph(&dataset));
        let visible = Arc::new(filter_graph(&graph, self.type_filter, &self.search));
        Self {
            revision: self.revision + 1,
            dataset,
            graph,
            visible,
            selection: None,
            connectivity: Arc::new(Connectivity::cleared()),
            ..self.clone()
        }
    }

    pub fn with_type_filter(&self, type_filter: TypeFilter) -> Self {
        if type_filter == self.type_filter {
            return self.clone();
        }
        self.refiltered(type_filter, self.search.clone())
    }

    pub fn with_search(&self, search: &str) -> Self {
        if search == self.search {
            return self.clone();
        }
        self.refiltered(self.type_filter, search.to_owned())
    }

    /// Selects `id` if it is visible; anything else clears the selection.
    pub fn with_selection(&self, id: Option<&str>) -> Self {
        let selection = id.filter(|id| self.visible.contains(id)).map(str::to_owned);
        if selection == self.selection {
            return self.clone();
        }
        let connectivity = Arc::new(highlight_connected(&self.visible, selection.as_deref()));
        Self {
            revision: self.revision + 1,
            selection,
            connectivity,
            ..self.clone()
        }
    }

    /// Clears filter, search and selection.
    pub fn reset(&self) -> Self {
        let visible = Arc::new(filter_graph(&self.graph, TypeFilter::All, ""));
        Self {
            revision: self.revision + 1,
            type_filter: TypeFilter::All,
            search: String::new(),
            visible,
            selection: None,
            connectivity: Arc::new(Connectivity::cleared()),
            ..self.clone()
        }
    }

    pub fn with_detailed_view(&self, detailed_view: bool) -> Self {
        Self {
            revision: self.revision + 1,
            detailed_view,
            ..self.clone()
        }
    }

    fn refiltered(&self, type_filter: TypeFilter, search: String) -> Self {
        let visible = Arc::new(filter_graph(&self.graph, type_filter, &search));
        let selection = self
            .selection
            .clone()
            .filter(|id| visible.contains(id));
        let connectivity = Arc::new(highlight_connected(&visible, selection.as_deref()));
        Self {
            revision: self.revision + 1,
            type_filter,
            search,
            visible,
            selection,
            connectivity,
            ..self.clone()
        }
    }
}

/// Ticket attached to one load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReloadTicket(u64);

/// Orders completed loads: only a ticket newer than the last applied one wins.
#[derive(Clone, Debug, Default)]
pub struct ReloadGate {
    issued: u64,
    applied: u64,
}

impl ReloadGate {
    pub fn issue(&mut self) -> ReloadTicket {
        self.issued += 1;
        ReloadTicket(self.issued)
    }

    /// Returns whether the load carrying `ticket` should be applied.
    pub fn admit(&mut self, ticket: ReloadTicket) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }

    pub fn has_pending(&self) -> bool {
        self.issued > self.applied
    }
}
