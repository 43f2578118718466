use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::permissions::{Graph, Tally, TypeFilter};

use super::super::ViewModel;

const SUGGESTION_LIMIT: usize = 5;

/// Closest node names for a search that matched nothing, best first.
fn search_suggestions(graph: &Graph, type_filter: TypeFilter, query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored = graph
        .nodes()
        .iter()
        .filter(|node| type_filter.admits(node.kind))
        .filter_map(|node| {
            matcher
                .fuzzy_match(&node.name, query)
                .map(|score| (score, node.name.as_str()))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);

    scored
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, name)| name.to_owned())
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        reload_requested: &mut bool,
    ) {
        ui.heading(self.locale.controls_heading());
        ui.add_space(6.0);

        ui.label(RichText::new(self.locale.filter_label()).strong());
        let mut type_filter = self.view.type_filter();
        ui.horizontal_wrapped(|ui| {
            for filter in TypeFilter::ALL {
                ui.selectable_value(&mut type_filter, filter, self.locale.type_filter(filter));
            }
        });
        if type_filter != self.view.type_filter() {
            let next = self.view.with_type_filter(type_filter);
            self.apply_view(next);
        }

        ui.add_space(6.0);
        ui.label(RichText::new(self.locale.search_label()).strong());
        let search_response = ui.text_edit_singleline(&mut self.search_input);
        if search_response.changed() {
            let search = self.search_input.clone();
            self.set_search(&search);
        }

        if self.view.visible().is_empty() && !self.view.search().is_empty() {
            let suggestions =
                search_suggestions(self.view.graph(), self.view.type_filter(), self.view.search());
            if !suggestions.is_empty() {
                ui.small(self.locale.suggestions_hint());
                for suggestion in suggestions {
                    if ui.link(suggestion.as_str()).clicked() {
                        self.search_input = suggestion.clone();
                        self.set_search(&suggestion);
                    }
                }
            }
        }

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            if ui.button(self.locale.reset_button()).clicked() {
                self.reset_view();
            }
            if ui.button(self.locale.reload_button()).clicked() {
                *reload_requested = true;
            }
            if ui.button(self.locale.export_button()).clicked() {
                self.export_current();
            }
        });

        ui.add_space(4.0);
        let mut detailed_view = self.view.detailed_view();
        if ui.checkbox(&mut detailed_view, self.locale.detailed_view_toggle()).changed() {
            let next = self.view.with_detailed_view(detailed_view);
            self.apply_view(next);
        }
        ui.checkbox(&mut self.live_physics, self.locale.live_layout_toggle());

        ui.separator();
        let dataset = self.view.dataset();
        let graph = self.view.graph();
        ui.label(RichText::new(self.locale.dataset_heading()).strong());
        let locale = self.locale;
        for (tally, count) in [
            (Tally::Users, dataset.users.len()),
            (Tally::Roles, dataset.roles.len()),
            (Tally::Databases, dataset.databases.len()),
            (Tally::PrivilegeGrants, dataset.role_grant_count()),
            (Tally::RoleAssignments, dataset.user_grant_count()),
        ] {
            ui.label(locale.tally(tally, count));
        }
        let dangling = graph.dangling_edge_count();
        if dangling > 0 {
            ui.label(
                RichText::new(locale.tally(Tally::DanglingEdges, dangling))
                    .color(egui::Color32::from_rgb(240, 180, 90)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{Dataset, build_graph};

    #[test]
    fn suggestions_rank_close_names_first() {
        let graph = build_graph(&Dataset::sample());
        let suggestions = search_suggestions(&graph, TypeFilter::All, "sysadm");
        assert_eq!(suggestions.first().map(String::as_str), Some("SYSADMIN"));
        assert!(suggestions.len() <= SUGGESTION_LIMIT);
    }

    #[test]
    fn suggestions_respect_the_type_filter() {
        let graph = build_graph(&Dataset::sample());
        let suggestions = search_suggestions(&graph, TypeFilter::Users, "admin");
        assert!(suggestions.iter().all(|name| name.ends_with("_USER")));
    }

    #[test]
    fn empty_query_has_no_suggestions() {
        let graph = build_graph(&Dataset::sample());
        assert!(search_suggestions(&graph, TypeFilter::All, "").is_empty());
    }
}
