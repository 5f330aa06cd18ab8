use crate::domain::a002_seo_audit::api;
use crate::shared::notify::Notice;
use crate::shared::services::AppServices;
use contracts::domain::a001_collection::{Collection, CollectionId};
use contracts::domain::a002_seo_audit::{RunAuditRequest, SeoAudit};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// ViewModel страницы SEO аудитов
#[derive(Clone)]
pub struct SeoAuditVm {
    pub audits: RwSignal<Vec<SeoAudit>>,
    /// Последний запущенный или открытый аудит
    pub latest: RwSignal<Option<SeoAudit>>,
    pub is_loading: RwSignal<bool>,
    pub is_running: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    services: AppServices,
}

impl SeoAuditVm {
    pub fn new(services: AppServices) -> Self {
        Self {
            audits: RwSignal::new(Vec::new()),
            latest: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            is_running: RwSignal::new(false),
            error: RwSignal::new(None),
            services,
        }
    }

    pub fn load(&self) {
        let vm = self.clone();
        self.is_loading.set(true);

        spawn_local(async move {
            match api::fetch_audits().await {
                Ok(audits) => {
                    if vm.latest.get_untracked().is_none() {
                        vm.latest.set(audits.first().cloned());
                    }
                    vm.audits.set(audits);
                    vm.error.set(None);
                }
                Err(e) => vm.error.set(Some(format!("Failed to load audits: {}", e))),
            }
            vm.is_loading.set(false);
        });
    }

    /// Открыть сохранённый аудит
    pub fn open(&self, id: String) {
        let vm = self.clone();
        spawn_local(async move {
            match api::fetch_audit(&id).await {
                Ok(audit) => vm.latest.set(Some(audit)),
                Err(e) => vm.error.set(Some(format!("Failed to load audit: {}", e))),
            }
        });
    }

    /// Запустить аудит; пустой список означает все коллекции
    pub fn run(&self, collection_ids: Vec<CollectionId>) {
        if self.is_running.get_untracked() {
            return;
        }
        let vm = self.clone();
        self.is_running.set(true);
        self.error.set(None);

        spawn_local(async move {
            let request = RunAuditRequest { collection_ids };
            match api::run_audit(&request).await {
                Ok(audit) => {
                    vm.services.notifier.notify(audit_notice(&audit));
                    vm.audits.update(|list| list.insert(0, audit.clone()));
                    vm.latest.set(Some(audit));
                }
                Err(e) => {
                    vm.error.set(Some(e.to_string()));
                    vm.services.notifier.error("SEO audit failed", &e.to_string());
                }
            }
            vm.is_running.set(false);
        });
    }

    /// Аудит по уже загруженным коллекциям без запроса к серверу
    pub fn run_local(&self, collections: &[Collection]) {
        let audit = SeoAudit::from_collections(collections);
        self.latest.set(Some(audit));
    }
}

/// Summary toast for a finished audit
pub fn audit_notice(audit: &SeoAudit) -> Notice {
    let s = &audit.summary;
    let message = format!(
        "{} optimized, {} need work, {} critical; average score {}",
        s.optimized, s.needs_work, s.critical, s.average_score
    );
    let notice = if s.total == 0 {
        Notice::info("SEO audit finished: no collections")
    } else if s.critical > 0 {
        Notice::warning(format!("SEO audit finished: {} collections", s.total))
    } else {
        Notice::success(format!("SEO audit finished: {} collections", s.total))
    };
    notice.with_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notify::NoticeLevel;
    use contracts::domain::a001_collection::CollectionType;

    fn collection(title: &str) -> Collection {
        Collection::new_for_insert(title.to_string(), CollectionType::Category)
    }

    #[test]
    fn test_run_local_sets_latest() {
        let vm = SeoAuditVm::new(AppServices::noop());
        vm.run_local(&[collection("Shoes"), collection("Hats")]);
        let audit = vm.latest.get_untracked().unwrap();
        assert_eq!(audit.summary.total, 2);
        assert_eq!(audit.summary.critical, 2);
        assert!(!vm.is_running.get_untracked());
    }

    #[test]
    fn test_audit_notice_levels() {
        assert_eq!(audit_notice(&SeoAudit::from_collections(&[])).level, NoticeLevel::Info);

        let audit = SeoAudit::from_collections(&[collection("Shoes")]);
        let notice = audit_notice(&audit);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(
            notice.message.as_deref(),
            Some("0 optimized, 0 need work, 1 critical; average score 15")
        );
    }
}
