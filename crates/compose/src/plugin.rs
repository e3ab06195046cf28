//! Provider hooks for content the converter cannot produce itself.
//!
//! Code highlighting and generated images (math, diagrams) are delegated
//! to providers registered by the embedding application. Providers are
//! asked in registration order; the first one that accepts the request
//! wins. A provider signals "not mine" by returning `None`.

use markflow_types::Color;

/// One styled fragment of highlighted code. Fragments may span multiple
/// lines; line breaks stay inside `text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightedSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
}

impl HighlightedSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        HighlightedSpan { text: text.into(), ..Default::default() }
    }
}

/// Result of a highlight request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlighted {
    pub spans: Vec<HighlightedSpan>,
    /// Replacement background for the code block, e.g. a theme color.
    pub background: Option<Color>,
    /// Diagnostic to surface as a warning; the spans are still used.
    pub message: Option<String>,
}

/// Result of an image generation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedImage {
    /// Path of the produced image file.
    pub path: String,
    /// Diagnostic to surface as a warning.
    pub message: Option<String>,
}

/// Turns code into styled spans, keyed by the fence info string.
pub trait HighlightProvider {
    fn highlight(&self, code: &str, language: &str) -> Option<Highlighted>;
}

/// Renders embedded content (math, diagram sources) to an image file.
pub trait ImageProvider {
    fn generate(&self, content: &str, info: &str) -> Option<GeneratedImage>;
}

/// Registered providers, asked in order.
#[derive(Default)]
pub struct ProviderSet {
    highlighters: Vec<Box<dyn HighlightProvider>>,
    images: Vec<Box<dyn ImageProvider>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_highlighter(&mut self, provider: impl HighlightProvider + 'static) {
        self.highlighters.push(Box::new(provider));
    }

    pub fn add_image_provider(&mut self, provider: impl ImageProvider + 'static) {
        self.images.push(Box::new(provider));
    }

    pub fn highlight(&self, code: &str, language: &str) -> Option<Highlighted> {
        self.highlighters
            .iter()
            .find_map(|p| p.highlight(code, language))
    }

    pub fn generate_image(&self, content: &str, info: &str) -> Option<GeneratedImage> {
        self.images.iter().find_map(|p| p.generate(content, info))
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet")
            .field("highlighters", &self.highlighters.len())
            .field("images", &self.images.len())
            .finish()
    }
}
