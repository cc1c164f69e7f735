//! Per-language display texts and preferred-language resolution.

use serde::{Deserialize, Serialize};

/// A single translated text value attached to an entity.
///
/// Entities carry one `Translation` per `(key, lang)` pair, e.g. a
/// question has a `name` key translated into several languages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    /// Which field of the owning entity this text translates (e.g. `name`).
    pub key: String,
    /// Language code of this value (e.g. `en`, `es`).
    pub lang: String,
    /// The translated text itself.
    pub value: String,
}

impl Translation {
    /// Picks the preferred entry from translations sharing a key.
    ///
    /// Returns the entry whose language matches `selected_lang`, falling
    /// back to the first entry when the selected language is unavailable.
    /// The caller can tell which language was actually used from the
    /// returned entry's `lang` field.
    #[must_use]
    pub fn preferred<'a>(
        translations: &[&'a Translation],
        selected_lang: &str,
    ) -> Option<&'a Translation> {
        translations
            .iter()
            .find(|t| t.lang == selected_lang)
            .or_else(|| translations.first())
            .copied()
    }
}

/// Resolves the translation of `key` for an entity's translation list.
///
/// # Examples
///
/// ```
/// use codesurvey_model::{Translation, get_translation};
///
/// let translations = vec![
///     Translation { key: "name".into(), lang: "en".into(), value: "Readability".into() },
///     Translation { key: "name".into(), lang: "es".into(), value: "Legibilidad".into() },
/// ];
///
/// let t = get_translation(&translations, "name", "es").unwrap();
/// assert_eq!(t.value, "Legibilidad");
///
/// // Unavailable language falls back to the first entry for the key.
/// let t = get_translation(&translations, "name", "fr").unwrap();
/// assert_eq!(t.lang, "en");
/// ```
#[must_use]
pub fn get_translation<'a>(
    translations: &'a [Translation],
    key: &str,
    selected_lang: &str,
) -> Option<&'a Translation> {
    let candidates = translations
        .iter()
        .filter(|t| t.key == key)
        .collect::<Vec<_>>();
    Translation::preferred(&candidates, selected_lang)
}
