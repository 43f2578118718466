use eframe::egui::{self, RichText, Ui};

use crate::permissions::{InfoLine, LineStyle, connected_info, node_info};

use super::super::ViewModel;

fn draw_info_lines(ui: &mut Ui, lines: &[InfoLine]) {
    for line in lines {
        match line.style {
            LineStyle::Title => {
                ui.label(RichText::new(&line.text).strong().size(16.0));
            }
            LineStyle::Field => {
                ui.label(line.text.as_str());
            }
            LineStyle::Heading => {
                ui.add_space(4.0);
                ui.label(RichText::new(&line.text).strong());
            }
            LineStyle::Item => {
                ui.label(format!("• {}", line.text));
            }
            LineStyle::Overflow => {
                ui.label(RichText::new(&line.text).italics().weak());
            }
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading(self.locale.selection_heading());
        ui.add_space(6.0);

        let Some(node) = self.view.selected_node() else {
            ui.label(self.locale.selection_hint());
            return;
        };

        let visible = self.view.visible();
        let connected = connected_info(node, visible, self.locale);
        let full = node_info(
            node,
            self.view.graph(),
            visible,
            self.view.dataset(),
            self.locale,
        );

        egui::ScrollArea::vertical()
            .id_salt("selection_details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                draw_info_lines(ui, &connected);
                ui.separator();
                egui::CollapsingHeader::new(self.locale.all_related_heading())
                    .default_open(false)
                    .show(ui, |ui| draw_info_lines(ui, &full));
            });
    }
}
