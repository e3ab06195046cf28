//! Fluent selector chains for binding styles to elements.

use std::fmt;
use std::rc::Rc;

use markflow_types::ElementType;

use crate::cascading::SharedStyle;
use crate::descriptor::StylingDescriptor;
use crate::error::StyleError;
use crate::manager::{StyleManager, StyleModifier};

/// Predicate over the whole descriptor chain, attached with
/// [`SelectorBuilder::when`].
pub type SelectorFilter = Rc<dyn Fn(&StylingDescriptor) -> bool>;

/// Role of one step within a selector chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The element the chain was opened for. Always the first step.
    Base,
    Parent,
    Ancestor,
    Filter,
}

/// One condition of a selector chain.
#[derive(Clone)]
pub struct SelectorStep {
    pub kind: StepKind,
    pub element_type: ElementType,
    pub style_name: Option<String>,
    pub(crate) filter: Option<SelectorFilter>,
}

impl SelectorStep {
    fn new(kind: StepKind, element_type: ElementType, style_name: Option<&str>) -> Self {
        Self {
            kind,
            element_type,
            style_name: style_name
                .filter(|name| !name.is_empty())
                .map(String::from),
            filter: None,
        }
    }
}

impl fmt::Debug for SelectorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorStep")
            .field("kind", &self.kind)
            .field("element_type", &self.element_type)
            .field("style_name", &self.style_name)
            .field("filter", &self.filter.as_ref().map(|_| ".."))
            .finish()
    }
}

impl PartialEq for SelectorStep {
    /// Filters compare by identity: two bindings use the same chain only
    /// when they share the very same filter closure.
    fn eq(&self, other: &Self) -> bool {
        let filters_equal = match (&self.filter, &other.filter) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.kind == other.kind
            && self.element_type == other.element_type
            && self.style_name == other.style_name
            && filters_equal
    }
}

/// Builds a selector chain and binds a style to it.
///
/// Obtained from [`StyleManager::for_element`]; each `with_*` call adds
/// a condition relative to the previous one, and one of the `bind`
/// methods finishes the chain.
pub struct SelectorBuilder<'a> {
    manager: &'a mut StyleManager,
    steps: Vec<SelectorStep>,
}

impl<'a> SelectorBuilder<'a> {
    pub(crate) fn new(
        manager: &'a mut StyleManager,
        element_type: ElementType,
        style_name: Option<&str>,
    ) -> Self {
        Self {
            manager,
            steps: vec![SelectorStep::new(StepKind::Base, element_type, style_name)],
        }
    }

    /// Requires the previous step's element to sit directly inside a
    /// parent of the given type.
    pub fn with_parent(mut self, element_type: ElementType) -> Self {
        self.steps
            .push(SelectorStep::new(StepKind::Parent, element_type, None));
        self
    }

    /// Like [`Self::with_parent`], also requiring the parent's style name.
    pub fn with_parent_named(mut self, element_type: ElementType, style_name: &str) -> Self {
        self.steps.push(SelectorStep::new(
            StepKind::Parent,
            element_type,
            Some(style_name),
        ));
        self
    }

    /// Requires some ancestor above the previous step to have the given
    /// type.
    pub fn with_ancestor(mut self, element_type: ElementType) -> Self {
        self.steps
            .push(SelectorStep::new(StepKind::Ancestor, element_type, None));
        self
    }

    /// Like [`Self::with_ancestor`], also requiring the ancestor's style
    /// name.
    pub fn with_ancestor_named(mut self, element_type: ElementType, style_name: &str) -> Self {
        self.steps.push(SelectorStep::new(
            StepKind::Ancestor,
            element_type,
            Some(style_name),
        ));
        self
    }

    /// Adds a free-form condition over the whole descriptor chain.
    pub fn when(mut self, filter: impl Fn(&StylingDescriptor) -> bool + 'static) -> Self {
        self.steps.push(SelectorStep {
            kind: StepKind::Filter,
            element_type: ElementType::Any,
            style_name: None,
            filter: Some(Rc::new(filter)),
        });
        self
    }

    /// Binds the named registered style to this chain.
    pub fn bind(self, style_name: &str) -> Result<(), StyleError> {
        let style = self
            .manager
            .style(style_name)
            .ok_or_else(|| StyleError::UnknownStyle(style_name.to_string()))?;
        self.manager.bind_selectors(self.steps, style, None);
        Ok(())
    }

    /// Binds a style handle to this chain.
    pub fn bind_style(self, style: &SharedStyle) {
        self.manager.bind_selectors(self.steps, style.clone(), None);
    }

    /// Binds the named style and a modifier that may adjust the resolved
    /// style per element.
    pub fn bind_and_modify(
        self,
        style_name: &str,
        modifier: impl Fn(&mut crate::cascading::CascadingStyle, &StylingDescriptor) + 'static,
    ) -> Result<(), StyleError> {
        let style = self
            .manager
            .style(style_name)
            .ok_or_else(|| StyleError::UnknownStyle(style_name.to_string()))?;
        self.manager
            .bind_selectors(self.steps, style, Some(Rc::new(modifier) as StyleModifier));
        Ok(())
    }

    /// Binds a style handle and a modifier to this chain.
    pub fn bind_style_and_modify(
        self,
        style: &SharedStyle,
        modifier: impl Fn(&mut crate::cascading::CascadingStyle, &StylingDescriptor) + 'static,
    ) {
        self.manager.bind_selectors(
            self.steps,
            style.clone(),
            Some(Rc::new(modifier) as StyleModifier),
        );
    }
}
