use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::config::Config;
use crate::permissions::{
    EdgeEmphasis, EdgeKind, Locale, NodeEmphasis, NodeKind, ReloadGate, ReloadTicket, ViewState,
};
use crate::source::{DataOrigin, LoadedDataset, PollSignal, load_or_sample, spawn_update_poller};

mod graph;
mod highlight;
mod physics;
mod render_utils;
mod ui;

type LoadResult = (ReloadTicket, LoadedDataset);

pub struct GrantGraphApp {
    config: Config,
    state: AppState,
    gate: ReloadGate,
    pending_loads: Vec<Receiver<LoadResult>>,
    poll_rx: Option<Receiver<PollSignal>>,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
}

struct ViewModel {
    view: ViewState,
    locale: Locale,
    export_dir: PathBuf,
    search_input: String,
    status: Option<StatusLine>,
    pan: Vec2,
    zoom: f32,
    live_physics: bool,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusKind {
    Loading,
    Success,
    Error,
}

struct StatusLine {
    kind: StatusKind,
    text: String,
    shown_at: Option<f64>,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    physics_scratch: PhysicsScratch,
    view_scratch: ViewScratch,
}

struct PhysicsScratch {
    forces: Vec<Vec2>,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

struct RenderNode {
    id: String,
    label: String,
    kind: NodeKind,
    world_pos: Vec2,
    velocity: Vec2,
    base_radius: f32,
}

struct RenderEdge {
    source: usize,
    target: usize,
    kind: EdgeKind,
    /// Position in the visible subgraph's edge sequence.
    visible_position: usize,
}

struct HighlightState {
    nodes: Vec<NodeEmphasis>,
    edges: Vec<EdgeEmphasis>,
}

#[derive(Clone, Copy)]
struct PhysicsConfig {
    link_distance: f32,
    charge: f32,
    collision_radius: f32,
    center_pull: f32,
    velocity_damping: f32,
    delta_seconds: f32,
}

impl GrantGraphApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut app = Self {
            config,
            state: AppState::Loading,
            gate: ReloadGate::default(),
            pending_loads: Vec::new(),
            poll_rx: None,
        };
        app.spawn_load(&cc.egui_ctx);
        app
    }

    fn spawn_load(&mut self, ctx: &Context) {
        let ticket = self.gate.issue();
        let location = self.config.data_location();
        let timeout = self.config.fetch_timeout();
        let ctx = ctx.clone();
        let (tx, rx) = mpsc::channel();

        tracing::debug!(?ticket, %location, "spawning permissions load");
        thread::spawn(move || {
            let loaded = load_or_sample(&location, timeout);
            let _ = tx.send((ticket, loaded));
            ctx.request_repaint();
        });

        self.pending_loads.push(rx);
    }

    fn start_poller(&mut self, ctx: &Context) {
        if self.poll_rx.is_some() {
            return;
        }
        let Some(poll_config) = self.config.poll_config() else {
            return;
        };
        let ctx = ctx.clone();
        self.poll_rx = Some(spawn_update_poller(poll_config, move || {
            ctx.request_repaint()
        }));
    }

    fn poll_announced_update(&mut self) -> bool {
        let Some(rx) = &self.poll_rx else {
            return false;
        };

        let mut announced = false;
        loop {
            match rx.try_recv() {
                Ok(PollSignal::Changed(_)) => announced = true,
                Ok(PollSignal::NoUpdates) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("update poller disconnected");
                    self.poll_rx = None;
                    break;
                }
            }
        }
        announced
    }

    fn completed_loads(&mut self) -> Vec<LoadResult> {
        let mut completed = Vec::new();
        self.pending_loads.retain(|rx| match rx.try_recv() {
            Ok(result) => {
                completed.push(result);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("permissions load worker disconnected");
                false
            }
        });
        completed
    }

    fn apply_load(&mut self, ctx: &Context, ticket: ReloadTicket, loaded: LoadedDataset) {
        if !self.gate.admit(ticket) {
            tracing::debug!(?ticket, "discarding stale permissions load");
            return;
        }

        let locale = self.config.locale;
        let status = match &loaded.origin {
            DataOrigin::Primary => {
                StatusLine::new(StatusKind::Success, locale.status_loaded())
            }
            DataOrigin::Sample { missing: true, .. } => StatusLine::new(
                StatusKind::Error,
                locale.status_sample_missing(&self.config.data_location().display_name()),
            ),
            DataOrigin::Sample { missing: false, .. } => {
                StatusLine::new(StatusKind::Error, locale.status_sample_error())
            }
        };
        let primary = loaded.origin == DataOrigin::Primary;

        match &mut self.state {
            AppState::Loading => {
                let mut model = ViewModel::new(
                    ViewState::new(loaded.dataset),
                    locale,
                    self.config.export_dir.clone(),
                );
                model.status = Some(status);
                self.state = AppState::Ready(Box::new(model));
            }
            AppState::Ready(model) => {
                model.replace_dataset(loaded.dataset);
                model.status = Some(status);
            }
        }

        if primary {
            self.start_poller(ctx);
        }
    }
}

impl eframe::App for GrantGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut reload_requested = false;

        if self.poll_announced_update() {
            reload_requested = true;
            if let AppState::Ready(model) = &mut self.state {
                model.status = Some(StatusLine::new(
                    StatusKind::Loading,
                    self.config.locale.status_update_detected(),
                ));
            }
        }

        for (ticket, loaded) in self.completed_loads() {
            self.apply_load(ctx, ticket, loaded);
        }

        match &mut self.state {
            AppState::Loading => {
                let locale = self.config.locale;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(locale.status_loading());
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Ready(model) => {
                let is_loading = self.gate.has_pending();
                model.show(ctx, &mut reload_requested, is_loading);
            }
        }

        if reload_requested {
            self.spawn_load(ctx);
        }
    }
}
