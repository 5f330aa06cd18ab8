use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata, Origin};
use crate::shared::seo::{classify, compute_score, ContentRecord, SeoReport, SeoStatus};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор коллекции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub Uuid);

impl CollectionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CollectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CollectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Вид коллекции на витрине
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollectionType {
    #[default]
    Category,
    CmsPage,
}

impl CollectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::CmsPage => "cms_page",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::CmsPage => "CMS page",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Коллекция (категория или CMS-страница) магазина
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,

    #[serde(default)]
    pub collection_type: CollectionType,

    /// Платформа-источник (Shopify, WooCommerce, ...)
    #[serde(default)]
    pub platform: Origin,

    /// ID записи на стороне платформы
    #[serde(default)]
    pub external_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Meta description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Основной текст страницы
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub is_published: bool,

    /// Последний сохранённый score (может устареть после правок)
    #[serde(default)]
    pub seo_score: Option<u8>,

    #[serde(default)]
    pub seo_status: Option<SeoStatus>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Collection {
    /// Создать новую коллекцию (ещё не сохранённую)
    pub fn new_for_insert(title: String, collection_type: CollectionType) -> Self {
        Self {
            id: CollectionId::new_v4(),
            collection_type,
            platform: Origin::Self_,
            external_id: None,
            title: Some(title),
            description: None,
            keywords: Vec::new(),
            content: None,
            slug: None,
            is_published: false,
            seo_score: None,
            seo_status: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "(untitled)",
        }
    }

    pub fn content_record(&self) -> ContentRecord<'_> {
        ContentRecord {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            keywords: &self.keywords,
            content: self.content.as_deref(),
            slug: self.slug.as_deref(),
            is_published: self.is_published,
        }
    }

    /// Score по текущим полям (без учёта сохранённого значения)
    pub fn computed_score(&self) -> u8 {
        compute_score(&self.content_record())
    }

    pub fn seo_report(&self) -> SeoReport {
        SeoReport::evaluate(&self.content_record())
    }

    /// Статус: сохранённый, либо вычисленный из текущих полей
    pub fn effective_status(&self) -> SeoStatus {
        self.seo_status
            .unwrap_or_else(|| classify(self.seo_score.unwrap_or_else(|| self.computed_score())))
    }

    /// Сохранённый score отсутствует или расходится с текущими полями
    pub fn is_score_stale(&self) -> bool {
        self.seo_score != Some(self.computed_score())
    }

    /// Пересчитать и записать score/status
    pub fn refresh_seo(&mut self) -> SeoScoreUpdate {
        let update = SeoScoreUpdate::from_score(self.computed_score());
        self.seo_score = Some(update.seo_score);
        self.seo_status = Some(update.seo_status);
        update
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CollectionDto) {
        self.collection_type = dto.collection_type;
        self.platform = dto.platform;
        self.title = Some(dto.title.trim().to_string());
        self.description = non_empty(dto.description.as_deref());
        self.keywords = normalize_keywords(&dto.keywords);
        self.content = non_empty(dto.content.as_deref());
        self.slug = non_empty(dto.slug.as_deref());
        self.is_published = dto.is_published;
        self.refresh_seo();
        self.metadata.touch();
    }

    pub fn to_dto(&self) -> CollectionDto {
        CollectionDto {
            id: Some(self.to_string_id()),
            collection_type: self.collection_type,
            platform: self.platform,
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            content: self.content.clone(),
            slug: self.slug.clone(),
            is_published: self.is_published,
            seo_score: self.seo_score,
            seo_status: self.seo_status,
            version: Some(self.metadata.version),
        }
    }
}

impl AggregateRoot for Collection {
    type Id = CollectionId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "collections"
    }

    fn element_name() -> &'static str {
        "Collection"
    }

    fn list_name() -> &'static str {
        "Collections"
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trim keywords, drop blanks and case-insensitive duplicates (first wins)
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectionDto {
    pub id: Option<String>,
    #[serde(default)]
    pub collection_type: CollectionType,
    #[serde(default)]
    pub platform: Origin,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub is_published: bool,

    /// Клиентский score, рассчитанный перед отправкой
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_status: Option<SeoStatus>,

    /// Версия для optimistic locking (только при обновлении)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl CollectionDto {
    pub fn content_record(&self) -> ContentRecord<'_> {
        ContentRecord {
            title: Some(self.title.as_str()),
            description: self.description.as_deref(),
            keywords: &self.keywords,
            content: self.content.as_deref(),
            slug: self.slug.as_deref(),
            is_published: self.is_published,
        }
    }

    /// Заполнить seo_score/seo_status по текущим полям формы.
    /// Ключевые слова нормализуются так же, как при `Collection::update`
    pub fn with_computed_seo(mut self) -> Self {
        self.keywords = normalize_keywords(&self.keywords);
        let update = SeoScoreUpdate::from_score(compute_score(&self.content_record()));
        self.seo_score = Some(update.seo_score);
        self.seo_status = Some(update.seo_status);
        self
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }
        if let Some(slug) = self.slug.as_deref() {
            if slug.chars().any(char::is_whitespace) {
                return Err("Slug must not contain spaces".into());
            }
            if slug.chars().any(char::is_uppercase) {
                return Err("Slug must be lowercase".into());
            }
        }
        Ok(())
    }
}

/// Фильтры списка коллекций (query string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectionListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<CollectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SeoStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl CollectionListQuery {
    /// Убрать пустую строку поиска
    pub fn normalized(mut self) -> Self {
        self.search = non_empty(self.search.as_deref());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub items: Vec<Collection>,
    pub total: u64,
}

/// Тело PATCH запроса для обновления score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScoreUpdate {
    pub seo_score: u8,
    pub seo_status: SeoStatus,
}

impl SeoScoreUpdate {
    pub fn from_score(seo_score: u8) -> Self {
        Self {
            seo_score,
            seo_status: classify(seo_score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub is_published: bool,
}
