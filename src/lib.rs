pub mod error;
pub mod palette;
pub mod stylesheet;
pub mod notify;
pub mod colors;
pub mod theme;
pub mod i18n;
pub mod config;
pub mod context;
pub mod logging;
pub mod models;
pub mod system_store;

// Export error taxonomy
pub use error::{Error, ResourceKind, Result};

// Export theme engine
pub use palette::{flatten, FlatPalette, Palette, PaletteStore};
pub use stylesheet::resolve;
pub use notify::{ChangeNotifier, Subscription};
pub use colors::{ThemeColors, hex_to_color32, adjust_brightness, with_alpha};
pub use theme::{ThemeContext, ThemeState};

// Export translation support
pub use i18n::{Locale, LocaleStore, LanguageState, Scope, TranslationContext};

// Export configuration and the shared context
pub use config::AppConfig;
pub use context::AppContext;
pub use logging::init_logging;

// Export fuzzy system persistence
pub use system_store::FuzzySystemStore;
