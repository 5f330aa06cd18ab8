use super::model::CollectionFormDto;
use crate::domain::a001_collection::api;
use crate::shared::listener::Listener;
use crate::shared::notify::Notice;
use crate::shared::services::AppServices;
use contracts::domain::a001_collection::{Collection, CollectionDto};
use contracts::shared::seo::SeoReport;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// ViewModel для формы коллекции
#[derive(Clone)]
pub struct CollectionDetailsVm {
    pub form: RwSignal<CollectionFormDto>,
    pub error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    services: AppServices,
}

impl CollectionDetailsVm {
    pub fn new(id: Option<String>, services: AppServices) -> Self {
        let vm = Self {
            form: RwSignal::new(CollectionFormDto::default()),
            error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            services,
        };

        if let Some(id) = id {
            vm.load(id);
        }

        vm
    }

    /// Режим редактирования (есть ID)
    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| !f.is_new())
    }

    /// Текущий SEO отчёт по полям формы (reactive)
    pub fn preview(&self) -> SeoReport {
        self.form.with(|f| f.preview())
    }

    pub fn fill_slug_from_title(&self) {
        self.form.update(|f| {
            f.fill_slug_from_title();
        });
    }

    /// Загрузить данные с сервера
    pub fn load(&self, id: String) {
        let form = self.form;
        let error = self.error;
        let is_loading = self.is_loading;
        is_loading.set(true);

        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(collection) => {
                    form.set(CollectionFormDto::from(collection));
                    error.set(None);
                }
                Err(e) if e.is_not_found() => {
                    error.set(Some(format!("Collection {} not found", id)))
                }
                Err(e) => error.set(Some(format!("Failed to load collection: {}", e))),
            }
            is_loading.set(false);
        });
    }

    /// Сохранить данные на сервер
    pub fn save_command<L>(&self, on_saved: L)
    where
        L: Listener<Collection> + 'static,
    {
        if self.is_saving.get_untracked() {
            return;
        }

        let dto = CollectionDto::from(self.form.get_untracked());
        if let Err(msg) = dto.validate() {
            self.error.set(Some(msg));
            return;
        }

        let vm = self.clone();
        self.error.set(None);
        self.is_saving.set(true);

        spawn_local(async move {
            match api::save(dto).await {
                Ok(saved) => {
                    let score = saved.seo_score.unwrap_or_else(|| saved.computed_score());
                    let message = format!("SEO score: {} ({})", score, saved.effective_status());
                    vm.services.notifier.notify(
                        Notice::success(format!("Saved \"{}\"", saved.display_title()))
                            .with_message(message),
                    );
                    vm.form.set(CollectionFormDto::from(saved.clone()));
                    on_saved.emit(saved);
                }
                Err(e) => {
                    vm.error.set(Some(e.to_string()));
                    vm.services
                        .notifier
                        .error("Failed to save collection", &e.to_string());
                }
            }
            vm.is_saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listener::NoopListener;

    #[test]
    fn test_invalid_form_sets_error_without_saving() {
        let vm = CollectionDetailsVm::new(None, AppServices::noop());
        vm.form.update(|f| f.slug = "Bad Slug".into());

        vm.save_command(NoopListener);
        assert_eq!(vm.error.get_untracked().as_deref(), Some("Title must not be empty"));
        assert!(!vm.is_saving.get_untracked());
    }

    #[test]
    fn test_preview_and_slug() {
        let vm = CollectionDetailsVm::new(None, AppServices::noop());
        assert!(!vm.is_edit_mode());
        vm.form.update(|f| f.title = "Winter Boots".into());
        vm.fill_slug_from_title();
        assert_eq!(vm.form.get_untracked().slug, "winter-boots");
        // title partial 15 + slug 10
        assert_eq!(vm.preview().score, 25);
    }
}
