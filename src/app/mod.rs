use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Align, Context, Layout, Vec2, vec2};
use log::info;

use crate::data::{EntityCollections, load_collections};
use crate::filter::GraphFilter;
use crate::graph::build_graph;
use crate::physics::{LayoutParams, Simulation};

mod canvas;
mod controls;
mod scheduler;

pub use scheduler::RepaintScheduler;

const DEFAULT_CANVAS: Vec2 = vec2(1280.0, 800.0);

pub struct TangleViewApp {
    data_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<EntityCollections, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<EntityCollections, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    collections: EntityCollections,
    simulation: Simulation,
    params: LayoutParams,
    filter: GraphFilter,
    search: String,
    selected: Option<String>,
    canvas_size: Vec2,
    scheduler: RepaintScheduler,
    visible_node_count: usize,
}

impl TangleViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<Result<EntityCollections, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_collections(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for TangleViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(collections) => {
                            AppState::Ready(Box::new(ViewModel::new(collections, ctx)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading entity snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load entity snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(collections) => {
                                    AppState::Ready(Box::new(ViewModel::new(collections, ctx)))
                                }
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(collections: EntityCollections, ctx: &Context) -> Self {
        let mut scheduler = RepaintScheduler::new(ctx.clone());
        let graph = build_graph(&collections, DEFAULT_CANVAS, &mut rand::thread_rng());
        info!(
            "built graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let mut simulation = Simulation::new(graph);
        simulation.start(&mut scheduler);

        Self {
            collections,
            simulation,
            params: LayoutParams::default(),
            filter: GraphFilter::default(),
            search: String::new(),
            selected: None,
            canvas_size: DEFAULT_CANVAS,
            scheduler,
            visible_node_count: 0,
        }
    }

    fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("tangleview");
                    ui.separator();
                    ui.label(format!("snapshot: {}", data_path.display()));
                    ui.label(format!("notes: {}", self.collections.notes.len()));
                    ui.label(format!("tasks: {}", self.collections.tasks.len()));
                    ui.label(format!("events: {}", self.collections.events.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("edges: {}", self.simulation.graph.edge_count()));
                        ui.label(format!("visible nodes: {}", self.visible_node_count));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading entity snapshot...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_canvas(ui);
            }
        });
    }

    /// Rebuilds nodes and edges wholesale from the current collections,
    /// dropping layout state. Identities are deterministic, so the current
    /// selection survives when its entity still exists.
    pub(in crate::app) fn rebuild_layout(&mut self) {
        let graph = build_graph(&self.collections, self.canvas_size, &mut rand::thread_rng());
        self.simulation.replace_graph(graph, &mut self.scheduler);
    }
}
