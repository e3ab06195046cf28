//! The conversion session.
//!
//! A [`Composer`] collects parsed trees, page settings and style tweaks
//! and turns the lot into one flat [`Document`] on demand. Content is
//! held as trees until [`Composer::compose`] runs, so every setting made
//! up to that point applies, regardless of the order calls came in.
//!
//! Sections are planned explicitly: each [`Composer::add_section`] opens
//! a new plan with its own page setup and header and footer trees, and
//! appended content lands in the latest plan. Section break commands
//! inside a tree still split sections mid-plan; those inherit setup and
//! headers from the section they split off from.

use std::collections::BTreeMap;

use markflow_compose::{ComposeError, ComposeOptions, Converter, Hooks, ProviderSet};
use markflow_compose::{HighlightProvider, ImageProvider};
use markflow_doc::Document as Tree;
use markflow_render_core::{BlockList, Document, HeaderFooter, PageSetup, ParagraphFormat};
use markflow_style::{
    BoxSpacing, CascadingStyle, Dimension, StyleManager, StylingDescriptor,
};
use markflow_types::Warning;

use crate::defaults;
use crate::error::PipelineError;
use crate::page::{PaperOrientation, PaperSize};

type WarningObserver = Box<dyn FnMut(&Warning)>;

/// One planned output section: its page geometry, running header and
/// footer trees and the body trees appended so far.
#[derive(Debug, Default)]
struct SectionPlan {
    page_setup: PageSetup,
    header: Option<Tree>,
    first_header: Option<Tree>,
    footer: Option<Tree>,
    first_footer: Option<Tree>,
    body: Vec<Tree>,
}

impl SectionPlan {
    fn new(page_setup: PageSetup) -> Self {
        SectionPlan {
            page_setup,
            ..Default::default()
        }
    }
}

/// A conversion session: styles, plugins, page setup and accumulated
/// content, with [`Composer::compose`] producing the flat document.
pub struct Composer {
    styles: StyleManager,
    providers: ProviderSet,
    hooks: Hooks,
    warning_observers: Vec<WarningObserver>,
    /// Setup new sections start from while no section is open.
    default_page_setup: PageSetup,
    /// Point size page dimensions given in `em` evaluate against.
    default_font_size: f32,
    image_dir: String,
    title: Option<String>,
    author: Option<String>,
    plans: Vec<SectionPlan>,
}

impl Composer {
    /// A session with the built-in style set installed.
    pub fn new() -> Result<Self, PipelineError> {
        let mut styles = StyleManager::new();
        defaults::install(&mut styles)?;
        Ok(Composer {
            styles,
            providers: ProviderSet::new(),
            hooks: Hooks::default(),
            warning_observers: Vec::new(),
            default_page_setup: PageSetup::default(),
            default_font_size: defaults::DEFAULT_FONT_SIZE,
            image_dir: String::new(),
            title: None,
            author: None,
            plans: Vec::new(),
        })
    }

    /// The style registry, for lookups and resolution.
    pub fn styles(&self) -> &StyleManager {
        &self.styles
    }

    /// The style registry, for adding styles and bindings.
    pub fn styles_mut(&mut self) -> &mut StyleManager {
        &mut self.styles
    }

    /// Appends a parsed tree to the current section. Repeated calls
    /// concatenate, as if the sources had been one document.
    pub fn append(&mut self, tree: Tree) -> &mut Self {
        self.plan().body.push(tree);
        self
    }

    /// Opens a new section. With `use_default_page_setup` the section
    /// starts from the session default setup, otherwise it carries the
    /// previous section's setup on. The first section always starts
    /// from the default.
    pub fn add_section(&mut self, use_default_page_setup: bool) -> &mut Self {
        let setup = match self.plans.last() {
            Some(previous) if !use_default_page_setup => previous.page_setup.clone(),
            _ => self.default_page_setup.clone(),
        };
        self.plans.push(SectionPlan::new(setup));
        self
    }

    /// Header shown on every page of the current section.
    pub fn set_header(&mut self, tree: Tree) -> &mut Self {
        self.plan().header = Some(tree);
        self
    }

    /// Header for the first page of the current section only.
    pub fn set_first_page_header(&mut self, tree: Tree) -> &mut Self {
        self.plan().first_header = Some(tree);
        self
    }

    /// Footer shown on every page of the current section.
    pub fn set_footer(&mut self, tree: Tree) -> &mut Self {
        self.plan().footer = Some(tree);
        self
    }

    /// Footer for the first page of the current section only.
    pub fn set_first_page_footer(&mut self, tree: Tree) -> &mut Self {
        self.plan().first_footer = Some(tree);
        self
    }

    /// Paper format for the current section, or for the session default
    /// while no section is open. The standing orientation is kept.
    pub fn set_paper_size(&mut self, size: PaperSize) -> &mut Self {
        size.apply_to(self.setup_target());
        self
    }

    pub fn set_paper_orientation(&mut self, orientation: PaperOrientation) -> &mut Self {
        orientation.apply_to(self.setup_target());
        self
    }

    /// Page margins for the current section, or for the session default
    /// while no section is open. All four sides are written; an empty
    /// side resets its margin to zero. Relative values evaluate against
    /// the default font size and the usable page width before the call.
    pub fn set_page_margins(&mut self, margins: BoxSpacing) -> Result<&mut Self, PipelineError> {
        let font_size = self.default_font_size;
        let setup = self.setup_target();
        let width = setup.body_width();
        setup.margin_left = margins.left.eval(font_size, width)?;
        setup.margin_right = margins.right.eval(font_size, width)?;
        setup.margin_top = margins.top.eval(font_size, width)?;
        setup.margin_bottom = margins.bottom.eval(font_size, width)?;
        Ok(self)
    }

    /// Distance of the header area from the top page edge.
    pub fn set_header_distance(&mut self, distance: Dimension) -> Result<&mut Self, PipelineError> {
        let font_size = self.default_font_size;
        let setup = self.setup_target();
        setup.header_distance = distance.eval(font_size, setup.body_width())?;
        Ok(self)
    }

    /// Distance of the footer area from the bottom page edge.
    pub fn set_footer_distance(&mut self, distance: Dimension) -> Result<&mut Self, PipelineError> {
        let font_size = self.default_font_size;
        let setup = self.setup_target();
        setup.footer_distance = distance.eval(font_size, setup.body_width())?;
        Ok(self)
    }

    /// Page number the current section starts at. Unset sections
    /// continue the count of the previous one.
    pub fn set_first_page_number(&mut self, number: u32) -> &mut Self {
        self.setup_target().first_page_number = Some(number);
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> &mut Self {
        self.author = Some(author.into());
        self
    }

    /// Directory that relative image paths in the source resolve
    /// against.
    pub fn set_image_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.image_dir = dir.into();
        self
    }

    /// Replaces the root font. `size` is in points and becomes the basis
    /// for every `em` in the style set.
    pub fn set_default_font(
        &mut self,
        name: &str,
        size: f32,
    ) -> Result<&mut Self, PipelineError> {
        defaults::set_default_font(&self.styles, name, size)?;
        self.default_font_size = size;
        Ok(self)
    }

    /// Rescales the built-in heading styles: heading N gets a font size
    /// of `scale ^ (6 - N)` em.
    pub fn set_heading_scale(&mut self, scale: f32) -> Result<&mut Self, PipelineError> {
        defaults::update_headings(&self.styles, scale)?;
        Ok(self)
    }

    /// Applies a JSON style overlay: an object mapping style names to
    /// style bodies. Known styles are patched field by field, unknown
    /// names are registered as new styles.
    pub fn load_style_overlay(&mut self, json: &str) -> Result<&mut Self, PipelineError> {
        let overlay: BTreeMap<String, CascadingStyle> = serde_json::from_str(json)?;
        for (name, patch) in &overlay {
            let style = match self.styles.style(name) {
                Some(style) => style,
                None => self.styles.add_style(name),
            };
            style.borrow_mut().patch_with(patch);
        }
        Ok(self)
    }

    /// Registers a syntax highlighter consulted for fenced code blocks.
    pub fn add_highlighter(&mut self, provider: impl HighlightProvider + 'static) -> &mut Self {
        self.providers.add_highlighter(provider);
        self
    }

    /// Registers an image generator consulted for math spans and plugin
    /// content.
    pub fn add_image_provider(&mut self, provider: impl ImageProvider + 'static) -> &mut Self {
        self.providers.add_image_provider(provider);
        self
    }

    /// Called with every warning [`Composer::compose`] collects.
    pub fn on_warning(&mut self, observer: impl FnMut(&Warning) + 'static) -> &mut Self {
        self.warning_observers.push(Box::new(observer));
        self
    }

    /// Called after an element's style is resolved, before the box model
    /// uses it. The hook may rewrite the style in place.
    pub fn on_styling_prepared(
        &mut self,
        hook: impl FnMut(&mut CascadingStyle, &StylingDescriptor) + 'static,
    ) -> &mut Self {
        self.hooks.styling_prepared = Some(Box::new(hook));
        self
    }

    /// Called after a resolved style has been merged into an output
    /// paragraph format.
    pub fn on_styling_applied(
        &mut self,
        hook: impl FnMut(&mut ParagraphFormat, &StylingDescriptor) + 'static,
    ) -> &mut Self {
        self.hooks.styling_applied = Some(Box::new(hook));
        self
    }

    /// May rewrite literal text on its way into the output. Returning
    /// `None` keeps the text as is.
    pub fn on_literal(
        &mut self,
        hook: impl FnMut(&str) -> Option<String> + 'static,
    ) -> &mut Self {
        self.hooks.literal = Some(Box::new(hook));
        self
    }

    /// Converts everything appended so far into a flat document.
    ///
    /// The session keeps its content; composing twice yields the same
    /// document. Warnings go to the registered observers.
    pub fn compose(&mut self) -> Result<Document, PipelineError> {
        let mut document = Document::new();
        document.title = self.title.clone();
        document.author = self.author.clone();
        let mut warnings = Vec::new();

        for plan in &self.plans {
            let options = ComposeOptions {
                page_width: plan.page_setup.body_width(),
                image_dir: self.image_dir.clone(),
            };

            let header = convert_marginal(
                &self.styles,
                &self.providers,
                &mut self.hooks,
                &options,
                plan.header.as_ref(),
                &mut warnings,
            )?;
            let first_header = convert_marginal(
                &self.styles,
                &self.providers,
                &mut self.hooks,
                &options,
                plan.first_header.as_ref(),
                &mut warnings,
            )?;
            let footer = convert_marginal(
                &self.styles,
                &self.providers,
                &mut self.hooks,
                &options,
                plan.footer.as_ref(),
                &mut warnings,
            )?;
            let first_footer = convert_marginal(
                &self.styles,
                &self.providers,
                &mut self.hooks,
                &options,
                plan.first_footer.as_ref(),
                &mut warnings,
            )?;

            let section = document.add_section();
            section.page_setup = plan.page_setup.clone();
            section.header = header;
            section.first_header = first_header;
            section.footer = footer;
            section.first_footer = first_footer;

            for tree in &plan.body {
                let mut converter = Converter::new(
                    &self.styles,
                    tree,
                    &self.providers,
                    &mut self.hooks,
                    &options,
                )?;
                converter.convert_into(&mut document)?;
                warnings.extend(converter.take_warnings());
            }
        }

        for warning in &warnings {
            for observer in &mut self.warning_observers {
                observer(warning);
            }
        }
        Ok(document)
    }

    /// Drops all appended content and planned sections. Styles, plugins,
    /// hooks and page settings stay.
    pub fn clear(&mut self) -> &mut Self {
        self.plans.clear();
        self
    }

    /// The plan content currently lands in, opened on demand.
    fn plan(&mut self) -> &mut SectionPlan {
        if self.plans.is_empty() {
            self.plans
                .push(SectionPlan::new(self.default_page_setup.clone()));
        }
        match self.plans.last_mut() {
            Some(plan) => plan,
            None => unreachable!(),
        }
    }

    /// Setup that page setters write to: the current section's, or the
    /// session default while no section is open.
    fn setup_target(&mut self) -> &mut PageSetup {
        match self.plans.last_mut() {
            Some(plan) => &mut plan.page_setup,
            None => &mut self.default_page_setup,
        }
    }
}

fn convert_marginal(
    styles: &StyleManager,
    providers: &ProviderSet,
    hooks: &mut Hooks,
    options: &ComposeOptions,
    tree: Option<&Tree>,
    warnings: &mut Vec<Warning>,
) -> Result<Option<HeaderFooter>, ComposeError> {
    let Some(tree) = tree else {
        return Ok(None);
    };
    let mut content = BlockList::new();
    let mut converter = Converter::new(styles, tree, providers, hooks, options)?;
    converter.convert_fragment(&mut content)?;
    warnings.extend(converter.take_warnings());
    Ok(Some(HeaderFooter { content }))
}
