use contracts::domain::a001_collection::{
    normalize_keywords, Collection, CollectionDto, CollectionType,
};
use contracts::domain::common::{AggregateId, Origin};
use contracts::shared::seo::SeoReport;

/// Состояние формы коллекции (все поля как вводит пользователь)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionFormDto {
    pub id: Option<String>,
    pub collection_type: CollectionType,
    pub platform: Origin,
    pub title: String,
    pub description: String,
    /// Ключевые слова через запятую или с новой строки
    pub keywords_text: String,
    pub content: String,
    pub slug: String,
    pub is_published: bool,
    pub version: Option<i32>,
}

impl CollectionFormDto {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn keywords(&self) -> Vec<String> {
        parse_keywords(&self.keywords_text)
    }

    /// Score, status and issues of the form as currently typed
    pub fn preview(&self) -> SeoReport {
        let dto = CollectionDto::from(self.clone());
        SeoReport::evaluate(&dto.content_record())
    }

    /// Заполнить slug из заголовка, если он ещё пуст
    pub fn fill_slug_from_title(&mut self) -> bool {
        if !self.slug.trim().is_empty() {
            return false;
        }
        let slug = slugify(&self.title);
        if slug.is_empty() {
            return false;
        }
        self.slug = slug;
        true
    }
}

impl From<Collection> for CollectionFormDto {
    fn from(c: Collection) -> Self {
        Self {
            id: Some(c.id.as_string()),
            collection_type: c.collection_type,
            platform: c.platform,
            title: c.title.unwrap_or_default(),
            description: c.description.unwrap_or_default(),
            keywords_text: c.keywords.join(", "),
            content: c.content.unwrap_or_default(),
            slug: c.slug.unwrap_or_default(),
            is_published: c.is_published,
            version: Some(c.metadata.version),
        }
    }
}

impl From<CollectionFormDto> for CollectionDto {
    fn from(form: CollectionFormDto) -> Self {
        let keywords = form.keywords();
        Self {
            id: form.id,
            collection_type: form.collection_type,
            platform: form.platform,
            title: form.title.trim().to_string(),
            description: optional(form.description),
            keywords,
            content: optional(form.content),
            slug: optional(form.slug),
            is_published: form.is_published,
            seo_score: None,
            seo_status: None,
            version: form.version,
        }
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_keywords(text: &str) -> Vec<String> {
    let raw: Vec<String> = text.split([',', '\n']).map(str::to_string).collect();
    normalize_keywords(&raw)
}

/// URL slug from a title: lowercase words joined by `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
