use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::reveal::{RevealStage, Season};
use crate::util::truncate_label;

use super::super::{ViewMode, ViewModel};

const SEARCH_RESULT_LIMIT: usize = 40;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            for mode in [ViewMode::Planar, ViewMode::Volumetric] {
                ui.selectable_value(&mut self.view_mode, mode, mode.label());
            }
        });

        let mut shadow_mode = self.controller.shadow_mode();
        if ui
            .checkbox(&mut shadow_mode, "Shadow self")
            .on_hover_text("Show the inverted reading of insights that have one.")
            .changed()
        {
            self.controller.set_shadow_mode(shadow_mode);
        }

        let mut show_connections = self.controller.show_connections();
        if ui
            .checkbox(&mut show_connections, "Memory threads")
            .on_hover_text("Draw connections between visible insights.")
            .changed()
        {
            self.controller.set_show_connections(show_connections);
        }

        ui.separator();
        self.draw_season_controls(ui);

        ui.separator();
        self.draw_search(ui);
    }

    fn draw_season_controls(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Season").strong());

        let reveal = self.controller.reveal();
        let mut season = reveal.season();
        let mut progress = reveal.progress();

        ui.horizontal(|ui| {
            for candidate in Season::ALL {
                ui.selectable_value(&mut season, candidate, candidate.label());
            }
        });
        ui.add(
            egui::Slider::new(&mut progress, 0.0..=1.0)
                .text("Progress")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("How far into the season the reveal has advanced.");

        if season != reveal.season() || progress != reveal.progress() {
            self.controller.set_reveal(season, progress);
        }

        let reveal = self.controller.reveal();
        let stage = match reveal.stage() {
            RevealStage::RootsOnly => "roots only",
            RevealStage::Early => "roots and intense insights",
            RevealStage::Full => "everything",
        };
        ui.small(format!("level {:.2}: {stage}", reveal.level()));
    }

    fn draw_search(&mut self, ui: &mut Ui) {
        ui.label("Find insight")
            .on_hover_text("Fuzzy search over every insight, including hidden ones.");
        ui.text_edit_singleline(&mut self.search);

        let query = self.search.trim();
        if query.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let data = self.controller.data();
        let mut ranked = data
            .insights()
            .iter()
            .filter_map(|insight| {
                let score = fuzzy_match_score(&matcher, &insight.title, query)
                    .or_else(|| fuzzy_match_score(&matcher, &insight.id, query))?;
                Some((score, insight.id.clone(), insight.title.clone()))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(SEARCH_RESULT_LIMIT);

        if ranked.is_empty() {
            ui.small("No matching insights.");
            return;
        }

        let mut picked = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results_scroll")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (_score, id, title) in &ranked {
                    if ui
                        .link(truncate_label(title, 48))
                        .on_hover_text(id.as_str())
                        .clicked()
                    {
                        picked = Some(id.clone());
                    }
                }
            });

        if let Some(id) = picked {
            self.select_insight(&id);
        }
    }
}
