use std::collections::HashSet;

use eframe::egui::{self, Sense, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use time::OffsetDateTime;

use crate::filter::visible_mask;
use crate::interact::{HIT_SLOP, hit_test};
use crate::render::{PainterSurface, draw_graph};

use super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        self.canvas_size = rect.size();

        // Advance one step if the scheduled tick arrived with this frame;
        // on_tick re-arms the scheduler while the simulation is running.
        if let Some(handle) = self.scheduler.due_tick() {
            self.simulation
                .on_tick(handle, &self.params, self.canvas_size, &mut self.scheduler);
        }

        let now = OffsetDateTime::now_utc();
        let visible = visible_mask(&self.simulation.graph.nodes, &self.filter, now);
        self.visible_node_count = visible.iter().filter(|included| **included).count();

        let matches = self.search_matches();
        let selected_index = self
            .selected
            .as_deref()
            .and_then(|id| self.simulation.graph.index_by_id.get(id).copied());

        let painter = ui.painter_at(rect);
        let mut surface = PainterSurface::new(&painter, rect);
        draw_graph(
            &mut surface,
            &self.simulation.graph,
            &visible,
            self.canvas_size,
            selected_index,
            matches.as_ref(),
        );

        let hovered = response
            .hovered()
            .then(|| ui.input(|input| input.pointer.hover_pos()))
            .flatten()
            .and_then(|pointer| {
                hit_test(
                    &self.simulation.graph.nodes,
                    &visible,
                    pointer - rect.min.to_vec2(),
                    HIT_SLOP,
                )
            });
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let hit = hit_test(
                &self.simulation.graph.nodes,
                &visible,
                pointer - rect.min.to_vec2(),
                HIT_SLOP,
            );
            self.selected = hit.map(|index| self.simulation.graph.nodes[index].id.clone());
        }
    }

    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.simulation
                .graph
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    fuzzy_match_score(&matcher, &node.label, query).map(|_score| index)
                })
                .collect(),
        )
    }
}
