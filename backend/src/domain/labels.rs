//! Human-readable names for content entities and their fields.
//!
//! Presentation layers (admin screens, forms) read these instead of
//! hard-coding captions. Strings are in Russian, the publication language.

/// Caption and optional help text for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabel {
    /// Field name as it appears on the record.
    pub field: &'static str,
    /// Caption shown next to the field.
    pub label: &'static str,
    /// Longer hint shown under the field, if any.
    pub help_text: Option<&'static str>,
}

impl FieldLabel {
    const fn new(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            help_text: None,
        }
    }

    const fn with_help(field: &'static str, label: &'static str, help: &'static str) -> Self {
        Self {
            field,
            label,
            help_text: Some(help),
        }
    }
}

/// Verbose names for an entity and its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLabels {
    /// Name of a single record.
    pub singular: &'static str,
    /// Name of a collection of records.
    pub plural: &'static str,
    /// Per-field captions.
    pub fields: &'static [FieldLabel],
}

impl EntityLabels {
    /// Look up the caption for `field`.
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::Post;
    ///
    /// assert_eq!(Post::LABELS.field("title").map(|f| f.label), Some("Заголовок"));
    /// assert!(Post::LABELS.field("missing").is_none());
    /// ```
    pub fn field(&self, field: &str) -> Option<&'static FieldLabel> {
        self.fields.iter().find(|label| label.field == field)
    }
}

const IS_PUBLISHED: FieldLabel = FieldLabel::with_help(
    "is_published",
    "Опубликовано",
    "Снимите галочку, чтобы скрыть публикацию.",
);
const CREATED_AT: FieldLabel = FieldLabel::new("created_at", "Добавлено");

pub(crate) const POST: EntityLabels = EntityLabels {
    singular: "публикация",
    plural: "Публикации",
    fields: &[
        IS_PUBLISHED,
        CREATED_AT,
        FieldLabel::new("title", "Заголовок"),
        FieldLabel::new("text", "Текст"),
        FieldLabel::with_help(
            "pub_date",
            "Дата и время публикации",
            "Если установить дату и время в будущем — можно делать отложенные публикации.",
        ),
        FieldLabel::new("image", "Фото"),
        FieldLabel::new("author", "Автор публикации"),
        FieldLabel::new("location", "Местоположение"),
        FieldLabel::new("category", "Категория"),
    ],
};

pub(crate) const CATEGORY: EntityLabels = EntityLabels {
    singular: "категория",
    plural: "Категории",
    fields: &[
        IS_PUBLISHED,
        CREATED_AT,
        FieldLabel::new("title", "Заголовок"),
        FieldLabel::new("description", "Описание"),
        FieldLabel::with_help(
            "slug",
            "Идентификатор",
            "Идентификатор страницы для URL; разрешены символы латиницы, цифры, дефис и подчёркивание.",
        ),
    ],
};

pub(crate) const LOCATION: EntityLabels = EntityLabels {
    singular: "местоположение",
    plural: "Местоположения",
    fields: &[
        IS_PUBLISHED,
        CREATED_AT,
        FieldLabel::new("name", "Название места"),
    ],
};

pub(crate) const COMMENT: EntityLabels = EntityLabels {
    singular: "комментарий",
    plural: "Комментарии",
    fields: &[
        FieldLabel::new("text", "Текст комментария"),
        FieldLabel::new("post", "Публикация"),
        FieldLabel::new("created_at", "Время добавления"),
        FieldLabel::new("author", "Автор комментария"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(POST, "публикация", "Публикации")]
    #[case(CATEGORY, "категория", "Категории")]
    #[case(LOCATION, "местоположение", "Местоположения")]
    #[case(COMMENT, "комментарий", "Комментарии")]
    fn entities_carry_verbose_names(
        #[case] labels: EntityLabels,
        #[case] singular: &str,
        #[case] plural: &str,
    ) {
        assert_eq!(labels.singular, singular);
        assert_eq!(labels.plural, plural);
    }

    #[rstest]
    fn publishable_entities_share_visibility_help_text() {
        for labels in [POST, CATEGORY, LOCATION] {
            let field = labels.field("is_published").expect("is_published label");
            assert_eq!(field.help_text, IS_PUBLISHED.help_text);
        }
        assert!(COMMENT.field("is_published").is_none());
    }
}
