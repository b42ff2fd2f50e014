//! Typography and decorative font loading
//!
//! The game's display font is loaded once in the background. Until it is
//! ready (or if loading fails) text falls back to the platform font; nothing
//! else depends on the outcome.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Decorative display font
pub const DISPLAY_FONT: &str = "Bangers";

/// Asset path of the display font
pub const DISPLAY_FONT_ASSET: &str = "assets/fonts/Bangers-Regular.ttf";

/// Font loading errors
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    /// Asset file is missing or unreadable
    #[error("Font asset {path} unavailable: {source}")]
    Asset {
        /// Asset path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Asset exists but is not a font
    #[error("Font {0} is not a TrueType/OpenType file")]
    InvalidFont(String),
}

// =============================================================================
// Font Set & Loader
// =============================================================================

/// Font names mapped to asset paths
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontSet {
    fonts: BTreeMap<String, String>,
}

impl FontSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Fonts used by the header and main menu
    pub fn game_fonts() -> Self {
        Self::new().with_font(DISPLAY_FONT, DISPLAY_FONT_ASSET)
    }

    /// Add a font
    pub fn with_font(mut self, name: impl Into<String>, asset: impl Into<String>) -> Self {
        self.fonts.insert(name.into(), asset.into());
        self
    }

    /// Iterate over `(name, asset)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fonts.iter().map(|(name, asset)| (name.as_str(), asset.as_str()))
    }

    /// Number of fonts
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Loads font assets
#[async_trait]
pub trait FontLoader: Send + Sync {
    /// Load every font in `fonts`
    async fn load(&self, fonts: &FontSet) -> Result<(), FontLoadError>;
}

/// Loads fonts from an asset directory on disk
pub struct AssetFontLoader {
    root: PathBuf,
}

impl AssetFontLoader {
    /// Create a loader reading assets relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FontLoader for AssetFontLoader {
    async fn load(&self, fonts: &FontSet) -> Result<(), FontLoadError> {
        for (name, asset) in fonts.iter() {
            let path = self.root.join(asset);
            let bytes = tokio::fs::read(&path).await.map_err(|source| FontLoadError::Asset {
                path: path.display().to_string(),
                source,
            })?;

            if !has_font_signature(&bytes) {
                return Err(FontLoadError::InvalidFont(name.to_string()));
            }
        }
        Ok(())
    }
}

/// sfnt version tags: TrueType 1.0, "true", "OTTO"
fn has_font_signature(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") | Some(b"OTTO")
    )
}

// =============================================================================
// Font State
// =============================================================================

/// One-shot "fonts are ready" flag shared by a view and its loading task
#[derive(Debug, Clone, Default)]
pub struct FontState {
    ready: Arc<AtomicBool>,
}

impl FontState {
    /// Create a flag that is not ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether decorative fonts may be used
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Load `fonts` and mark ready on success
    ///
    /// Failure is logged and leaves the flag unset.
    pub async fn load(&self, loader: &dyn FontLoader, fonts: &FontSet) -> bool {
        match loader.load(fonts).await {
            Ok(()) => {
                self.ready.store(true, Ordering::Release);
                true
            }
            Err(e) => {
                tracing::warn!("Font loading failed, using default typography: {}", e);
                false
            }
        }
    }

    /// Spawn [`FontState::load`] on the runtime
    pub fn load_in_background(&self, loader: Arc<dyn FontLoader>, fonts: FontSet) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            state.load(loader.as_ref(), &fonts).await;
        })
    }
}

// =============================================================================
// Text Styles
// =============================================================================

/// Text roles used by the header and main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypographyVariant {
    /// "FlashBack" title on the menu
    Title,
    /// Turn and time in the game header
    HeaderTitle,
    /// High score prompts
    HighScore,
    /// Numeric high score
    Score,
    /// Play and theme buttons
    Button,
    /// Login and leader board buttons
    Body,
}

/// Resolved text style
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Size in pixels
    pub font_size: f32,
    /// Font family (`None` = platform default)
    pub font_family: Option<String>,
    /// Letter spacing in pixels
    pub letter_spacing: f32,
}

impl TextStyle {
    /// Style for `variant`, using the display font only when `fonts_ready`
    pub fn for_variant(variant: TypographyVariant, fonts_ready: bool) -> Self {
        let font_size = match variant {
            TypographyVariant::Title => 64.0,
            TypographyVariant::Button => 32.0,
            TypographyVariant::HeaderTitle | TypographyVariant::Score => 24.0,
            TypographyVariant::HighScore => 20.0,
            TypographyVariant::Body => 16.0,
        };

        if !fonts_ready {
            return Self { font_size, font_family: None, letter_spacing: 0.0 };
        }

        // The header title uses the display font without extra spacing
        let letter_spacing = match variant {
            TypographyVariant::HeaderTitle => 0.0,
            _ => 1.0,
        };

        Self {
            font_size,
            font_family: Some(DISPLAY_FONT.to_string()),
            letter_spacing,
        }
    }
}
