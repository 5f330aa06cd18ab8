pub mod state;

use self::state::{create_state, CollectionListState};
use crate::domain::a001_collection::api;
use crate::shared::confirm::ConfirmRequest;
use crate::shared::date_utils::format_timestamp;
use crate::shared::list_utils::{contains_ci, filter_list, sort_list, Searchable, Sortable};
use crate::shared::notify::Notice;
use crate::shared::services::AppServices;
use contracts::domain::a001_collection::{Collection, CollectionListQuery};
use contracts::shared::seo::SeoStatus;
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen_futures::spawn_local;

/// Строка таблицы коллекций
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub collection_type: String,
    pub platform: String,
    pub score: u8,
    pub status: SeoStatus,
    /// Сохранённый score расходится с текущими полями
    pub is_stale: bool,
    pub is_published: bool,
    pub updated_at: String,
    updated_ts: i64,
}

impl From<&Collection> for CollectionRow {
    fn from(c: &Collection) -> Self {
        Self {
            id: c.to_string_id(),
            title: c.display_title().to_string(),
            slug: c.slug.clone().unwrap_or_default(),
            collection_type: c.collection_type.label().to_string(),
            platform: c.platform.display_name().to_string(),
            score: c.seo_score.unwrap_or_else(|| c.computed_score()),
            status: c.effective_status(),
            is_stale: c.is_score_stale(),
            is_published: c.is_published,
            updated_at: format_timestamp(&c.metadata.updated_at),
            updated_ts: c.metadata.updated_at.timestamp(),
        }
    }
}

impl Searchable for CollectionRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.title, filter)
            || contains_ci(&self.slug, filter)
            || contains_ci(&self.platform, filter)
    }
}

impl Sortable for CollectionRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "slug" => self.slug.cmp(&other.slug),
            "type" => self.collection_type.cmp(&other.collection_type),
            "platform" => self.platform.cmp(&other.platform),
            "score" => self.score.cmp(&other.score),
            "status" => status_rank(self.status).cmp(&status_rank(other.status)),
            "published" => self.is_published.cmp(&other.is_published),
            "updated_at" => self.updated_ts.cmp(&other.updated_ts),
            _ => Ordering::Equal,
        }
    }
}

/// Critical first when sorting ascending
fn status_rank(status: SeoStatus) -> u8 {
    match status {
        SeoStatus::Critical => 0,
        SeoStatus::NeedsWork => 1,
        SeoStatus::Optimized => 2,
    }
}

/// Rows for display: local filter, then sort
pub fn build_rows(
    items: &[Collection],
    filter: &str,
    sort_field: &str,
    ascending: bool,
) -> Vec<CollectionRow> {
    let rows: Vec<CollectionRow> = items.iter().map(CollectionRow::from).collect();
    let mut rows = filter_list(rows, filter);
    sort_list(&mut rows, sort_field, ascending);
    rows
}

/// Number of collections per status, in `SeoStatus::ALL` order
pub fn count_by_status(items: &[Collection]) -> Vec<(SeoStatus, usize)> {
    SeoStatus::ALL
        .iter()
        .map(|status| {
            let n = items.iter().filter(|c| c.effective_status() == *status).count();
            (*status, n)
        })
        .collect()
}

/// ViewModel списка коллекций
#[derive(Clone)]
pub struct CollectionListVm {
    pub items: RwSignal<Vec<Collection>>,
    pub total: RwSignal<u64>,
    pub query: RwSignal<CollectionListQuery>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub state: CollectionListState,
    services: AppServices,
}

impl CollectionListVm {
    pub fn new(services: AppServices) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            total: RwSignal::new(0),
            query: RwSignal::new(CollectionListQuery::default()),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            state: create_state(),
            services,
        }
    }

    /// Отфильтрованные и отсортированные строки (reactive)
    pub fn rows(&self) -> Vec<CollectionRow> {
        let filter = self.state.filter.get();
        let field = self.state.sort_field.get();
        let ascending = self.state.sort_ascending.get();
        self.items
            .with(|items| build_rows(items, &filter, &field, ascending))
    }

    pub fn status_counts(&self) -> Vec<(SeoStatus, usize)> {
        self.items.with(|items| count_by_status(items))
    }

    /// Загрузить список с сервера
    pub fn load(&self) {
        let vm = self.clone();
        let query = self.query.get_untracked();
        self.is_loading.set(true);

        spawn_local(async move {
            match api::fetch_collections(&query).await {
                Ok(response) => {
                    vm.total.set(response.total);
                    vm.items.set(response.items);
                    vm.error.set(None);
                }
                Err(e) => vm.error.set(Some(format!("Failed to load collections: {}", e))),
            }
            vm.is_loading.set(false);
        });
    }

    pub fn set_query(&self, query: CollectionListQuery) {
        self.query.set(query.normalized());
        self.state.clear_selection();
        self.load();
    }

    pub fn set_page(&self, page: u32) {
        self.query.update(|q| q.page = Some(page.max(1)));
        self.load();
    }

    /// Удалить коллекцию после подтверждения
    pub fn delete_command(&self, id: String, title: String) {
        let vm = self.clone();
        let request = ConfirmRequest::new(
            "Delete collection",
            format!("Delete \"{}\"? This cannot be undone.", title),
        )
        .destructive()
        .with_confirm_label("Delete");

        self.services.confirmer.confirm(
            request,
            Box::new(move |confirmed: bool| {
                if !confirmed {
                    return;
                }
                spawn_local(async move {
                    match api::delete(&id).await {
                        Ok(()) => {
                            vm.services
                                .notifier
                                .success(&format!("Deleted \"{}\"", title));
                            vm.state.toggle_select(&id, false);
                            vm.load();
                        }
                        Err(e) => vm
                            .services
                            .notifier
                            .error("Failed to delete collection", &e.to_string()),
                    }
                });
            }),
        );
    }

    /// Удалить выбранные коллекции после подтверждения
    pub fn delete_selected(&self) {
        let ids = self.state.selected_ids();
        if ids.is_empty() {
            return;
        }
        let vm = self.clone();
        let request = ConfirmRequest::new(
            "Delete collections",
            format!("Delete selected collections? Count: {}", ids.len()),
        )
        .destructive()
        .with_confirm_label("Delete");

        self.services.confirmer.confirm(
            request,
            Box::new(move |confirmed: bool| {
                if !confirmed {
                    return;
                }
                spawn_local(async move {
                    let total = ids.len();
                    let mut failed = 0;
                    for id in &ids {
                        if let Err(e) = api::delete(id).await {
                            log::error!("delete collection {}: {}", id, e);
                            failed += 1;
                        }
                    }
                    vm.services.notifier.notify(delete_summary(total, failed));
                    vm.state.clear_selection();
                    vm.load();
                });
            }),
        );
    }

    pub fn publish_command(&self, id: String, publish: bool) {
        let vm = self.clone();
        spawn_local(async move {
            match api::set_published(&id, publish).await {
                Ok(updated) => {
                    let verb = if publish { "Published" } else { "Unpublished" };
                    vm.services
                        .notifier
                        .success(&format!("{} \"{}\"", verb, updated.display_title()));
                    replace_item(vm.items, updated);
                }
                Err(e) => vm
                    .services
                    .notifier
                    .error("Failed to change visibility", &e.to_string()),
            }
        });
    }

    /// Опубликовать/снять с публикации несколько коллекций по очереди
    pub fn bulk_publish(&self, ids: Vec<String>, publish: bool) {
        if ids.is_empty() {
            return;
        }
        let vm = self.clone();
        spawn_local(async move {
            let total = ids.len();
            let mut failed = 0;
            for id in &ids {
                match api::set_published(id, publish).await {
                    Ok(updated) => replace_item(vm.items, updated),
                    Err(e) => {
                        log::error!("set_published {} {}: {}", id, publish, e);
                        failed += 1;
                    }
                }
            }
            vm.services
                .notifier
                .notify(publish_summary(total, failed, publish));
            vm.state.clear_selection();
        });
    }

    /// Пересчитать SEO score одной коллекции
    pub fn recalculate_command(&self, id: String) {
        let vm = self.clone();
        spawn_local(async move {
            match api::recalculate_seo(&id).await {
                Ok(updated) => {
                    let score = updated.seo_score.unwrap_or_default();
                    vm.services.notifier.notify(
                        Notice::success("SEO score updated")
                            .with_message(format!("{}: {}", updated.display_title(), score)),
                    );
                    replace_item(vm.items, updated);
                }
                Err(e) => vm
                    .services
                    .notifier
                    .error("Failed to recalculate SEO score", &e.to_string()),
            }
        });
    }
}

fn replace_item(items: RwSignal<Vec<Collection>>, updated: Collection) {
    items.update(|list| {
        if let Some(slot) = list.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
    });
}

fn delete_summary(total: usize, failed: usize) -> Notice {
    if failed == 0 {
        Notice::success(format!("Deleted {} collections", total))
    } else if failed == total {
        Notice::error("Failed to delete collections")
            .with_message(format!("{} of {} failed", failed, total))
    } else {
        Notice::warning(format!("Deleted {} of {} collections", total - failed, total))
            .with_message(format!("{} failed", failed))
    }
}

fn publish_summary(total: usize, failed: usize, publish: bool) -> Notice {
    let verb = if publish { "Published" } else { "Unpublished" };
    if failed == 0 {
        Notice::success(format!("{} {} collections", verb, total))
    } else {
        Notice::warning(format!("{} {} of {} collections", verb, total - failed, total))
            .with_message(format!("{} failed", failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notify::NoticeLevel;
    use contracts::domain::a001_collection::CollectionType;

    fn collection(title: &str, score: Option<u8>) -> Collection {
        let mut c = Collection::new_for_insert(title.to_string(), CollectionType::Category);
        c.seo_score = score;
        c
    }

    #[test]
    fn test_row_prefers_stored_score() {
        let row = CollectionRow::from(&collection("Shoes", Some(90)));
        assert_eq!(row.score, 90);
        assert_eq!(row.status, SeoStatus::Optimized);
        assert!(row.is_stale);

        let row = CollectionRow::from(&collection("Shoes", None));
        // title only, partial credit
        assert_eq!(row.score, 15);
        assert_eq!(row.status, SeoStatus::Critical);
    }

    #[test]
    fn test_build_rows_filters_and_sorts() {
        let items = vec![
            collection("Summer dresses", Some(70)),
            collection("Winter coats", Some(40)),
            collection("Summer hats", Some(85)),
        ];
        let rows = build_rows(&items, "summer", "score", false);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Summer hats", "Summer dresses"]);

        let rows = build_rows(&items, "", "status", true);
        assert_eq!(rows[0].status, SeoStatus::Critical);
        assert_eq!(rows[2].status, SeoStatus::Optimized);
    }

    #[test]
    fn test_count_by_status() {
        let items = vec![
            collection("a", Some(95)),
            collection("b", Some(50)),
            collection("c", Some(10)),
            collection("d", Some(0)),
        ];
        assert_eq!(
            count_by_status(&items),
            vec![
                (SeoStatus::Optimized, 1),
                (SeoStatus::NeedsWork, 1),
                (SeoStatus::Critical, 2)
            ]
        );
    }

    #[test]
    fn test_delete_summary_levels() {
        assert_eq!(delete_summary(3, 0).level, NoticeLevel::Success);
        assert_eq!(delete_summary(3, 1).level, NoticeLevel::Warning);
        assert_eq!(delete_summary(3, 3).level, NoticeLevel::Error);
    }

    #[test]
    fn test_publish_summary() {
        let notice = publish_summary(2, 0, false);
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.title, "Unpublished 2 collections");
        assert_eq!(publish_summary(2, 1, true).level, NoticeLevel::Warning);
    }

    #[test]
    fn test_replace_item() {
        let mut c = collection("Shoes", Some(10));
        let items = RwSignal::new(vec![c.clone(), collection("Hats", None)]);
        c.seo_score = Some(60);
        replace_item(items, c.clone());
        assert_eq!(items.get_untracked()[0].seo_score, Some(60));
        assert_eq!(items.get_untracked().len(), 2);
    }
}
