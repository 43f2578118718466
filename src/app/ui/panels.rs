use std::path::PathBuf;

use eframe::egui::{self, Align, Color32, Context, Layout, RichText, Vec2};

use crate::permissions::{Dataset, Locale, ViewState, export_dataset};

use super::super::{StatusKind, StatusLine, ViewModel};

/// Seconds a success message stays in the top bar.
const SUCCESS_STATUS_SECS: f64 = 3.0;

impl StatusLine {
    pub(in crate::app) fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: None,
        }
    }

    fn color(&self) -> Color32 {
        match self.kind {
            StatusKind::Loading => Color32::from_rgb(120, 180, 255),
            StatusKind::Success => Color32::from_rgb(110, 210, 140),
            StatusKind::Error => Color32::from_rgb(240, 120, 100),
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn new(view: ViewState, locale: Locale, export_dir: PathBuf) -> Self {
        Self {
            view,
            locale,
            export_dir,
            search_input: String::new(),
            status: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            live_physics: true,
            graph_dirty: true,
            graph_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.expire_status(ctx);
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.locale.app_title());
                    ui.separator();
                    let graph = self.view.graph();
                    ui.label(self.locale.graph_totals(graph.node_count(), graph.edge_count()));
                    if let Some(timestamp) = self.view.dataset().timestamp() {
                        ui.label(self.locale.snapshot(timestamp));
                    }
                    if is_loading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let visible = self.view.visible();
                        ui.label(
                            self.locale
                                .visible_totals(visible.node_count(), visible.edge_count()),
                        );
                        if let Some(status) = &self.status {
                            ui.label(RichText::new(&status.text).color(status.color()));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui, reload_requested));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn expire_status(&mut self, ctx: &Context) {
        let now = ctx.input(|input| input.time);
        let Some(status) = &mut self.status else {
            return;
        };
        if status.kind != StatusKind::Success {
            return;
        }

        let shown_at = *status.shown_at.get_or_insert(now);
        let remaining = SUCCESS_STATUS_SECS - (now - shown_at);
        if remaining <= 0.0 {
            self.status = None;
        } else {
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining));
        }
    }

    /// Swaps in the next view state, marking the render graph dirty when the
    /// visible subgraph changed.
    pub(in crate::app) fn apply_view(&mut self, next: ViewState) {
        if !std::ptr::eq(self.view.visible(), next.visible()) {
            self.graph_dirty = true;
        }
        self.view = next;
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        let next = self.view.with_selection(selected.as_deref());
        self.apply_view(next);
    }

    pub(in crate::app) fn set_search(&mut self, search: &str) {
        let next = self.view.with_search(search);
        self.apply_view(next);
    }

    pub(in crate::app) fn replace_dataset(&mut self, dataset: Dataset) {
        let next = self.view.with_dataset(dataset);
        self.apply_view(next);
    }

    /// Clears filter, search and selection and re-seeds the layout.
    pub(in crate::app) fn reset_view(&mut self) {
        let next = self.view.reset();
        self.apply_view(next);
        self.search_input.clear();
        self.graph_cache = None;
        self.graph_dirty = true;
        self.reset_camera();
    }

    pub(in crate::app) fn export_current(&mut self) {
        self.status = Some(match export_dataset(self.view.dataset(), &self.export_dir) {
            Ok(path) => StatusLine::new(
                StatusKind::Success,
                self.locale.status_exported(&path.display().to_string()),
            ),
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "export failed");
                StatusLine::new(StatusKind::Error, self.locale.status_export_failed())
            }
        });
    }
}
