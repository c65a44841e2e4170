use eframe::egui::{self, RichText, Ui};

use crate::filter::KindFilter;
use crate::graph::NodeKind;
use crate::interact::{NodeDetails, details_for};
use crate::physics::LayoutParams;
use crate::util::{excerpt, format_date};

use super::ViewModel;

const KIND_CHOICES: [KindFilter; 5] = [
    KindFilter::All,
    KindFilter::Only(NodeKind::Note),
    KindFilter::Only(NodeKind::Task),
    KindFilter::Only(NodeKind::Event),
    KindFilter::Only(NodeKind::Tag),
];

const EXCERPT_CHARS: usize = 240;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search labels");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy-highlight matching nodes without changing the layout.");

        ui.separator();

        egui::ComboBox::from_label("Kind")
            .selected_text(self.filter.kind.label())
            .show_ui(ui, |ui| {
                for choice in KIND_CHOICES {
                    ui.selectable_value(&mut self.filter.kind, choice, choice.label());
                }
            });

        ui.add(
            egui::Slider::new(&mut self.filter.min_percent, 0.0..=100.0)
                .text("From (% of last year)"),
        )
        .on_hover_text("Lower bound of the 365-day lookback window.");
        ui.add(
            egui::Slider::new(&mut self.filter.max_percent, 0.0..=100.0)
                .text("To (% of last year)"),
        )
        .on_hover_text("Upper bound of the 365-day lookback window.");

        ui.separator();

        let mut running = self.simulation.running();
        if ui
            .checkbox(&mut running, "Run layout simulation")
            .on_hover_text("Step layout forces cooperatively, once per scheduled tick.")
            .changed()
        {
            if running {
                self.simulation.start(&mut self.scheduler);
            } else {
                self.simulation.stop(&mut self.scheduler);
            }
        }
        ui.label(format!("ticks: {}", self.simulation.ticks()));

        if ui
            .button("Reshuffle layout")
            .on_hover_text("Rebuild the graph with fresh random spawn positions.")
            .clicked()
        {
            self.rebuild_layout();
        }

        ui.collapsing("Layout tuning", |ui| {
            ui.add(
                egui::Slider::new(&mut self.params.repulsion, 500.0..=20_000.0).text("Repulsion"),
            );
            ui.add(
                egui::Slider::new(&mut self.params.attraction, 0.001..=0.05)
                    .logarithmic(true)
                    .text("Attraction"),
            );
            ui.add(egui::Slider::new(&mut self.params.centering, 0.0..=0.02).text("Centering"));
            ui.add(egui::Slider::new(&mut self.params.damping, 0.5..=0.99).text("Damping"));
            if ui.button("Reset to defaults").clicked() {
                self.params = LayoutParams::default();
            }
        });
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a node to inspect it.");
            return;
        };

        let mut select_next: Option<String> = None;
        let mut clear_selection = false;

        {
            let Some(node) = self.simulation.graph.node_by_id(&selected_id) else {
                ui.label("Selected node no longer exists in the graph.");
                if ui.button("Clear selection").clicked() {
                    self.selected = None;
                }
                return;
            };

            ui.label(RichText::new(&node.label).strong());
            ui.small(node.id.as_str());
            ui.add_space(6.0);

            match details_for(node, &self.collections) {
                Some(NodeDetails::Note(note)) => {
                    ui.label("kind: note");
                    if let Some(created_at) = note.created_at {
                        ui.label(format!("created: {}", format_date(created_at)));
                    }
                    if !note.tags.is_empty() {
                        ui.label(format!("tags: {}", note.tags.join(", ")));
                    }
                    if !note.content.is_empty() {
                        ui.separator();
                        ui.label(excerpt(&note.content, EXCERPT_CHARS));
                    }

                    let derived: Vec<_> = self
                        .collections
                        .tasks
                        .iter()
                        .filter(|task| task.note_id == Some(note.id))
                        .collect();
                    if !derived.is_empty() {
                        ui.separator();
                        ui.label(RichText::new("Tasks from this note").strong());
                        for task in derived {
                            if ui.link(&task.title).clicked() {
                                select_next = Some(format!("task-{}", task.id));
                            }
                        }
                    }
                }
                Some(NodeDetails::Task(task)) => {
                    ui.label("kind: task");
                    ui.label(format!("status: {}", task.status.label()));
                    ui.label(format!("priority: {}", task.priority.label()));
                    if let Some(created_at) = task.created_at {
                        ui.label(format!("created: {}", format_date(created_at)));
                    }
                    if let Some(note) = task.note_id.and_then(|id| self.collections.note(id)) {
                        ui.separator();
                        ui.label(RichText::new("Originating note").strong());
                        if ui.link(&note.title).clicked() {
                            select_next = Some(format!("note-{}", note.id));
                        }
                    }
                }
                Some(NodeDetails::Event(event)) => {
                    ui.label("kind: event");
                    if let Some(created_at) = event.created_at {
                        ui.label(format!("created: {}", format_date(created_at)));
                    }
                    if let Some(task) = event.task_id.and_then(|id| self.collections.task(id)) {
                        ui.separator();
                        ui.label(RichText::new("Scheduled task").strong());
                        if ui.link(&task.title).clicked() {
                            select_next = Some(format!("task-{}", task.id));
                        }
                    }
                }
                Some(NodeDetails::Tag { name, note_count }) => {
                    ui.label("kind: tag");
                    ui.label(format!("tagged notes: {note_count}"));
                    ui.separator();
                    for note in self
                        .collections
                        .notes
                        .iter()
                        .filter(|note| note.tags.iter().any(|tag| tag == name))
                    {
                        if ui.link(&note.title).clicked() {
                            select_next = Some(format!("note-{}", note.id));
                        }
                    }
                }
                None => {
                    ui.label("Source entity is no longer present in the snapshot.");
                }
            }

            ui.add_space(10.0);
            if ui.button("Clear selection").clicked() {
                clear_selection = true;
            }
        }

        if clear_selection {
            self.selected = None;
        } else if let Some(next) = select_next {
            self.selected = Some(next);
        }
    }
}
