//! Theme resolution: settings plus the dark mode flag in, presentation tokens out

pub mod preferences;
pub mod tokens;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::models::{SettingsPatch, Theme, ThemeColors};
use crate::store::Store;

pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use tokens::{hex_to_hsl, parse_hex_color, resolve_tokens, Hsl, TokenSet, TokenSource};

/// Inputs that determine a token set; the palette only counts for `custom`
type CacheKey = (Theme, Option<ThemeColors>, bool);

#[derive(Debug)]
struct ResolverState {
    dark_mode: bool,
    cache: Option<(CacheKey, TokenSet)>,
    recomputations: u64,
}

/// Derives tokens from the store's settings and owns the dark mode preference
pub struct ThemeResolver {
    store: Store,
    preferences: Arc<dyn PreferenceStore>,
    state: Mutex<ResolverState>,
}

impl ThemeResolver {
    /// Create a resolver, loading the saved dark mode flag.
    ///
    /// A preference that cannot be read is logged and `default_dark_mode` is used.
    pub async fn new(
        store: Store,
        preferences: Arc<dyn PreferenceStore>,
        default_dark_mode: bool,
    ) -> Self {
        let dark_mode = match preferences.load_dark_mode().await {
            Ok(Some(value)) => value,
            Ok(None) => default_dark_mode,
            Err(e) => {
                tracing::warn!(error = %e, "could not load dark mode preference");
                default_dark_mode
            }
        };

        Self {
            store,
            preferences,
            state: Mutex::new(ResolverState {
                dark_mode,
                cache: None,
                recomputations: 0,
            }),
        }
    }

    /// The theme currently stored in settings
    pub async fn theme(&self) -> Theme {
        self.store.read(|state| state.settings.theme).await
    }

    pub async fn is_dark_mode(&self) -> bool {
        self.state.lock().await.dark_mode
    }

    /// Switch the site theme through the store, then resolve tokens.
    ///
    /// `custom` requires a palette; for built-in themes any palette is ignored.
    pub async fn set_theme(
        &self,
        theme: Theme,
        palette: Option<ThemeColors>,
    ) -> Result<TokenSet, Error> {
        let mut patch = SettingsPatch::new().theme(theme);
        if theme == Theme::Custom {
            let Some(palette) = palette else {
                return Err(Error::validation("The custom theme requires a colour palette"));
            };
            patch = patch.custom_colors(palette);
        }

        self.store.update_settings(patch).await?;
        Ok(self.tokens().await)
    }

    /// Flip the dark mode flag and persist it.
    ///
    /// The flag only changes once the new value has been saved.
    pub async fn toggle_dark_mode(&self) -> Result<bool, Error> {
        let mut state = self.state.lock().await;
        let value = !state.dark_mode;
        self.preferences.save_dark_mode(value).await?;
        state.dark_mode = value;
        tracing::debug!(dark_mode = value, "toggled dark mode");
        Ok(value)
    }

    /// Tokens for the current settings and dark mode flag
    pub async fn tokens(&self) -> TokenSet {
        let (theme, palette) = self
            .store
            .read(|state| (state.settings.theme, state.settings.custom_colors.clone()))
            .await;

        let mut state = self.state.lock().await;
        let palette = palette.filter(|_| theme == Theme::Custom);
        let key: CacheKey = (theme, palette, state.dark_mode);

        if let Some((cached_key, tokens)) = &state.cache {
            if *cached_key == key {
                return tokens.clone();
            }
        }

        let tokens = resolve_tokens(key.0, key.1.as_ref(), key.2);
        state.recomputations += 1;
        state.cache = Some((key, tokens.clone()));
        tokens
    }

    /// How many times tokens were actually recomputed
    pub async fn recomputations(&self) -> u64 {
        self.state.lock().await.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::RecordingGateway;

    async fn resolver(dark_mode: Option<bool>) -> (ThemeResolver, Arc<MemoryPreferences>) {
        let prefs = Arc::new(match dark_mode {
            Some(value) => MemoryPreferences::with_dark_mode(value),
            None => MemoryPreferences::new(),
        });
        let store = Store::new(Arc::new(RecordingGateway::default()));
        (ThemeResolver::new(store, prefs.clone(), false).await, prefs)
    }

    #[tokio::test]
    async fn dark_mode_is_loaded_and_persisted() {
        let (resolver, prefs) = resolver(Some(true)).await;
        assert!(resolver.is_dark_mode().await);

        assert!(!resolver.toggle_dark_mode().await.unwrap());
        assert_eq!(prefs.load_dark_mode().await.unwrap(), Some(false));
    }

    #[tokio::test]
    async fn dark_mode_is_orthogonal_to_theme() {
        let (resolver, _) = resolver(None).await;
        let light = resolver.set_theme(Theme::Modern, None).await.unwrap();
        assert_eq!(resolver.theme().await, Theme::Modern);
        assert!(!light.dark_mode);

        resolver.toggle_dark_mode().await.unwrap();
        let dark = resolver.tokens().await;
        assert_eq!(dark.theme, Theme::Modern);
        assert!(dark.dark_mode);
        assert_eq!(dark, resolve_tokens(Theme::Modern, None, true));
    }

    #[tokio::test]
    async fn custom_requires_palette() {
        let (resolver, _) = resolver(None).await;
        let err = resolver.set_theme(Theme::Custom, None).await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(resolver.theme().await, Theme::RedBlack);
    }

    #[tokio::test]
    async fn recomputation_is_skipped_when_inputs_are_unchanged() {
        let (resolver, _) = resolver(None).await;
        resolver.tokens().await;
        resolver.tokens().await;
        assert_eq!(resolver.recomputations().await, 1);

        let palette = ThemeColors::new("#111111", "#222222", "#333333", "#ffffff", "#000000");
        let tokens = resolver.set_theme(Theme::Custom, Some(palette.clone())).await.unwrap();
        assert_eq!(tokens.source, TokenSource::Palette);
        assert_eq!(resolver.recomputations().await, 2);

        resolver.set_theme(Theme::Custom, Some(palette)).await.unwrap();
        assert_eq!(resolver.recomputations().await, 2);

        resolver.toggle_dark_mode().await.unwrap();
        resolver.tokens().await;
        assert_eq!(resolver.recomputations().await, 3);
    }
}
