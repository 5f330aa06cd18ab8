use crate::shared::list_utils::get_sort_indicator;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug)]
pub struct CollectionListState {
    pub selected: RwSignal<HashSet<String>>,
    pub sort_field: RwSignal<String>,
    pub sort_ascending: RwSignal<bool>,
    /// Локальный поиск по загруженной странице
    pub filter: RwSignal<String>,
}

pub fn create_state() -> CollectionListState {
    CollectionListState {
        selected: RwSignal::new(HashSet::new()),
        sort_field: RwSignal::new("score".to_string()),
        sort_ascending: RwSignal::new(true),
        filter: RwSignal::new(String::new()),
    }
}

impl CollectionListState {
    pub fn toggle_select(&self, id: &str, checked: bool) {
        self.selected.update(|s| {
            if checked {
                s.insert(id.to_string());
            } else {
                s.remove(id);
            }
        });
    }

    pub fn toggle_sort(&self, field: &str) {
        if self.sort_field.get_untracked() == field {
            self.sort_ascending.update(|a| *a = !*a);
        } else {
            self.sort_field.set(field.to_string());
            self.sort_ascending.set(true);
        }
    }

    /// Стрелка для заголовка колонки `field` (reactive)
    pub fn sort_indicator(&self, field: &str) -> &'static str {
        get_sort_indicator(&self.sort_field.get(), field, self.sort_ascending.get())
    }

    pub fn clear_selection(&self) {
        self.selected.set(HashSet::new());
    }

    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.get_untracked().into_iter().collect();
        ids.sort();
        ids
    }
}
