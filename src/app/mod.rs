use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};
use tracing::error;

use crate::ambient::SceneRotation;
use crate::insight::{ArboretumData, bundled_sample, load_arboretum};
use crate::layout::{LayoutCache, LayoutEngine};
use crate::navigation::{InsightSelected, ViewController};
use crate::threads::{FlowParticle, ThreadKey};

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewMode {
    /// Radial 2D diagram.
    #[default]
    Planar,
    /// Procedural 3D tree.
    Volumetric,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Planar => "Radial",
            Self::Volumetric => "Tree",
        }
    }
}

#[derive(Clone, Debug)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled sample".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> Result<ArboretumData, String> {
        let result = match self {
            Self::Bundled => bundled_sample().map_err(anyhow::Error::from),
            Self::File(path) => load_arboretum(path),
        };

        result.map_err(|error| {
            error!("{error:#}");
            format!("{error:#}")
        })
    }
}

#[derive(Clone, Debug)]
pub struct LaunchOptions {
    pub source: DataSource,
    pub view_mode: ViewMode,
    pub seed: Option<u64>,
}

pub struct ArboretumApp {
    options: LaunchOptions,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ArboretumData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    controller: ViewController,
    layout: LayoutCache,
    view_mode: ViewMode,
    source_label: String,
    pan: Vec2,
    zoom: f32,
    rotation: SceneRotation,
    pitch: f32,
    particles: HashMap<ThreadKey, FlowParticle>,
    search: String,
    /// Latest outbound selection, consumed by the details panel.
    pending_selection: Option<InsightSelected>,
    drawn_thread_count: usize,
    dangling_count: usize,
    view_scratch: ViewScratch,
}

/// Per-frame screen-space data, indexed like the dataset.
#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    depths: Vec<f32>,
    draw_order: Vec<usize>,
}

impl ArboretumApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let state = Self::start_load(options.source.clone());
        Self { options, state }
    }

    fn start_load(source: DataSource) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(source.load());
        });

        AppState::Loading { rx }
    }

    fn layout_engine(seed: Option<u64>) -> LayoutEngine {
        match seed {
            Some(seed) => LayoutEngine::seeded(seed),
            None => LayoutEngine::from_entropy(),
        }
    }
}

impl eframe::App for ArboretumApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(
                            Arc::new(data),
                            Self::layout_engine(self.options.seed),
                            self.options.view_mode,
                            self.options.source.describe(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading insight arboretum...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load insight arboretum");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.options.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                model.show(ctx, &mut reload_requested);
                if reload_requested {
                    transition = Some(Self::start_load(self.options.source.clone()));
                }
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
