/// Localized form-level and page-level messages for one UI language.
///
/// Placeholders are written as `{name}` and filled with [`LanguageStrings::fill`].
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Form Validation ====================
    /// A required field is empty in the primary language.
    /// Placeholders: {field}, {language}
    pub required_field: &'static str,

    /// None of the accepted languages holds a value.
    /// Placeholders: {field}, {languages}
    pub required_any_of: &'static str,

    /// One language of the field exceeds the maximum length.
    /// Placeholders: {field}, {language}, {max}
    pub too_long: &'static str,

    /// The field is filled in some languages but not in this one.
    /// Placeholders: {field}, {language}
    pub missing_translation: &'static str,

    // ==================== Page Shell ====================
    pub loading: &'static str,

    /// Placeholders: {error}
    pub load_failed: &'static str,

    pub empty_list: &'static str,
}

impl LanguageStrings {
    /// Replace each `{key}` in `template` with its value. Substituted text
    /// is copied as is, so braces inside a value are never expanded.
    pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                rest = &rest[start..];
                break;
            };

            let key = &after[..end];
            match args.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&rest[start..start + end + 2]),
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

// ==================== French Strings ====================

pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    required_field: "Le champ « {field} » est obligatoire en {language}.",
    required_any_of: "Le champ « {field} » doit être renseigné dans au moins une langue : {languages}.",
    too_long: "Le champ « {field} » dépasse {max} caractères en {language}.",
    missing_translation: "Traduction manquante pour « {field} » en {language}.",
    loading: "Chargement…",
    load_failed: "Erreur lors du chargement : {error}",
    empty_list: "Aucun élément à afficher.",
};

// ==================== Arabic Strings ====================

pub const ARABIC_STRINGS: LanguageStrings = LanguageStrings {
    required_field: "الحقل « {field} » إلزامي باللغة {language}.",
    required_any_of: "يجب ملء الحقل « {field} » بلغة واحدة على الأقل: {languages}.",
    too_long: "الحقل « {field} » يتجاوز {max} حرفًا باللغة {language}.",
    missing_translation: "الترجمة مفقودة للحقل « {field} » باللغة {language}.",
    loading: "جارٍ التحميل…",
    load_failed: "خطأ أثناء التحميل: {error}",
    empty_list: "لا توجد عناصر للعرض.",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    required_field: "The field \"{field}\" is required in {language}.",
    required_any_of: "The field \"{field}\" must be filled in at least one language: {languages}.",
    too_long: "The field \"{field}\" exceeds {max} characters in {language}.",
    missing_translation: "Missing translation for \"{field}\" in {language}.",
    loading: "Loading…",
    load_failed: "Failed to load: {error}",
    empty_list: "Nothing to show.",
};
