//! Single-select category control. Reports the raw option value upward and
//! keeps no state of its own.

use eframe::egui;
use shared::domain::{Category, CategoryId};

pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

fn selected_label(categories: &[Category], selected: Option<CategoryId>) -> String {
    match selected {
        None => ALL_CATEGORIES_LABEL.to_string(),
        Some(category_id) => categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| format!("Category {category_id}")),
    }
}

/// Returns the option value the user picked this frame: the category id as
/// a string, or an empty string for "all categories".
pub fn show(
    ui: &mut egui::Ui,
    categories: &[Category],
    selected: Option<CategoryId>,
) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt("category_filter")
        .selected_text(selected_label(categories, selected))
        .width(200.0)
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(selected.is_none(), ALL_CATEGORIES_LABEL)
                .clicked()
            {
                picked = Some(String::new());
            }
            for category in categories {
                ui.push_id(category.id.0, |ui| {
                    if ui
                        .selectable_label(selected == Some(category.id), category.name.as_str())
                        .clicked()
                    {
                        picked = Some(category.id.to_string());
                    }
                });
            }
        });
    picked
}
