//! Internationalization: translation catalog, language detection, and the
//! localization context used to resolve UI text.

pub mod catalog;
pub mod detect;
pub mod localizer;
pub mod preference;

pub use catalog::{CatalogError, Entry, MissingKey, TranslationCatalog};
pub use detect::LocaleSignal;
pub use localizer::{Localizer, ResolveError, Resolved};
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};
