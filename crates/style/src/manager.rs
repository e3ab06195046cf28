//! Style registry, selector bindings and the resolution algorithm.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use markflow_types::ElementType;

use crate::cascading::{CascadingStyle, SharedStyle};
use crate::descriptor::StylingDescriptor;
use crate::error::StyleError;
use crate::selector::{SelectorBuilder, SelectorStep, StepKind};

/// Name of the reserved style returned when no binding matches.
pub const UNDEFINED_STYLE: &str = "Undefined";

/// Adjusts a resolved style for one concrete element, e.g. to restyle
/// the last paragraph of a container.
pub type StyleModifier = Rc<dyn Fn(&mut CascadingStyle, &StylingDescriptor)>;

struct Binding {
    selectors: Vec<SelectorStep>,
    style: SharedStyle,
    modifier: Option<StyleModifier>,
}

/// Registry of named styles and selector bindings.
///
/// Styles are created and registered here, bound to selector chains via
/// [`StyleManager::for_element`], and looked up per element with
/// [`StyleManager::resolve`]. The manager owns the `Undefined` fallback
/// style that resolution returns on a miss.
pub struct StyleManager {
    styles: HashMap<String, SharedStyle>,
    bindings: Vec<Binding>,
    anon_counter: usize,
}

impl StyleManager {
    pub fn new() -> Self {
        let mut manager = Self {
            styles: HashMap::new(),
            bindings: Vec::new(),
            anon_counter: 0,
        };
        manager.add_style(UNDEFINED_STYLE);
        manager
    }

    /// Creates and registers a style without a base. An empty name gets
    /// a generated one. Re-registering an existing name replaces the
    /// style and re-points its bindings at the replacement.
    pub fn add_style(&mut self, name: &str) -> SharedStyle {
        self.insert_style(name, None)
    }

    /// Creates and registers a style deriving from the named base. The
    /// link is live, not a copy: later edits to the base show through.
    pub fn derive_style(&mut self, name: &str, base: &str) -> Result<SharedStyle, StyleError> {
        let base = self
            .styles
            .get(base)
            .cloned()
            .ok_or_else(|| StyleError::UnknownStyle(base.to_string()))?;
        Ok(self.insert_style(name, Some(base)))
    }

    /// Creates and registers a style deriving from a style handle.
    pub fn derive_from(&mut self, name: &str, base: &SharedStyle) -> SharedStyle {
        self.insert_style(name, Some(base.clone()))
    }

    fn insert_style(&mut self, name: &str, base: Option<SharedStyle>) -> SharedStyle {
        let name = if name.is_empty() {
            self.generated_name()
        } else {
            name.to_string()
        };
        let style: SharedStyle = Rc::new(RefCell::new(CascadingStyle::new(name.clone(), base)));
        if let Some(old) = self.styles.insert(name.clone(), style.clone()) {
            log::debug!("replacing registered style '{name}'");
            for binding in &mut self.bindings {
                if Rc::ptr_eq(&binding.style, &old) {
                    binding.style = style.clone();
                }
            }
        }
        style
    }

    fn generated_name(&mut self) -> String {
        loop {
            self.anon_counter += 1;
            let name = format!("style-{}", self.anon_counter);
            if !self.styles.contains_key(&name) {
                return name;
            }
        }
    }

    pub fn style(&self, name: &str) -> Option<SharedStyle> {
        self.styles.get(name).cloned()
    }

    pub fn has_style(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Renames a registered style. Bindings keep working since they hold
    /// the style itself, not its name.
    pub fn rename_style(&mut self, from: &str, to: &str) -> Result<(), StyleError> {
        if from == to {
            return if self.styles.contains_key(from) {
                Ok(())
            } else {
                Err(StyleError::UnknownStyle(from.to_string()))
            };
        }
        if self.styles.contains_key(to) {
            return Err(StyleError::StyleExists(to.to_string()));
        }
        let style = self
            .styles
            .remove(from)
            .ok_or_else(|| StyleError::UnknownStyle(from.to_string()))?;
        style.borrow_mut().set_name(to.to_string());
        self.styles.insert(to.to_string(), style);
        Ok(())
    }

    /// Moves a style onto a new base, or detaches it when `base` is
    /// `None`. Fails when the new base chain already contains the style.
    pub fn rebase_style(&mut self, name: &str, base: Option<&str>) -> Result<(), StyleError> {
        let style = self
            .styles
            .get(name)
            .cloned()
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))?;
        let new_base = match base {
            Some(base_name) => Some(
                self.styles
                    .get(base_name)
                    .cloned()
                    .ok_or_else(|| StyleError::UnknownStyle(base_name.to_string()))?,
            ),
            None => None,
        };
        if let Some(candidate) = &new_base {
            let mut walk = Some(candidate.clone());
            while let Some(node) = walk {
                if Rc::ptr_eq(&node, &style) {
                    return Err(StyleError::BaseCycle(name.to_string()));
                }
                walk = node.borrow().base().cloned();
            }
        }
        style.borrow_mut().set_base(new_base);
        Ok(())
    }

    /// Opens a selector chain for elements of the given type.
    pub fn for_element(&mut self, element_type: ElementType) -> SelectorBuilder<'_> {
        SelectorBuilder::new(self, element_type, None)
    }

    /// Opens a selector chain for elements of the given type carrying
    /// the given style name in their attributes.
    pub fn for_element_named(
        &mut self,
        element_type: ElementType,
        style_name: &str,
    ) -> SelectorBuilder<'_> {
        SelectorBuilder::new(self, element_type, Some(style_name))
    }

    pub(crate) fn bind_selectors(
        &mut self,
        selectors: Vec<SelectorStep>,
        style: SharedStyle,
        modifier: Option<StyleModifier>,
    ) {
        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|binding| binding.selectors == selectors)
        {
            existing.style = style;
            existing.modifier = modifier;
        } else {
            self.bindings.push(Binding {
                selectors,
                style,
                modifier,
            });
        }
    }

    /// Resolves the style for an element described by `descriptor`.
    ///
    /// All bindings whose chain matches the descriptor are collected,
    /// the most specific one wins, and its style is flattened with
    /// [`CascadingStyle::eval`]. A bound modifier runs on the flattened
    /// result. Without any match the reserved `Undefined` style is
    /// returned.
    pub fn resolve(&self, descriptor: &StylingDescriptor) -> CascadingStyle {
        let survivors = self.match_bindings(descriptor);
        match self.best_match(&survivors, 0) {
            Some(index) => {
                let binding = &self.bindings[index];
                let mut res = binding.style.borrow().eval();
                if let Some(modifier) = &binding.modifier {
                    modifier(&mut res, descriptor);
                }
                res
            }
            None => {
                log::debug!(
                    "no style bound for element {:?}",
                    descriptor.current().map(|d| d.element_type)
                );
                match self.styles.get(UNDEFINED_STYLE) {
                    Some(style) => style.borrow().eval(),
                    None => CascadingStyle::default(),
                }
            }
        }
    }

    /// Runs every binding chain against the descriptor. Each candidate
    /// keeps an own cursor into the descriptor chain that its steps
    /// advance as they match.
    fn match_bindings(&self, descriptor: &StylingDescriptor) -> Vec<usize> {
        let mut candidates: Vec<(usize, usize)> =
            (0..self.bindings.len()).map(|index| (index, 0)).collect();
        let mut level = 0;
        loop {
            if candidates.is_empty() {
                break;
            }
            let max_len = candidates
                .iter()
                .map(|&(index, _)| self.bindings[index].selectors.len())
                .max()
                .unwrap_or(0);
            if level > max_len {
                break;
            }
            candidates.retain_mut(|(index, cursor)| {
                Self::step_matches(&self.bindings[*index].selectors, descriptor, level, cursor)
            });
            level += 1;
        }
        candidates.into_iter().map(|(index, _)| index).collect()
    }

    fn step_matches(
        steps: &[SelectorStep],
        descriptor: &StylingDescriptor,
        level: usize,
        cursor: &mut usize,
    ) -> bool {
        let Some(step) = steps.get(level) else {
            // shorter chains matched completely, they stay in
            return true;
        };
        let descriptors = descriptor.descriptors();
        if step.kind != StepKind::Filter && *cursor >= descriptors.len() {
            return false;
        }
        match step.kind {
            StepKind::Filter => {
                let Some(filter) = &step.filter else {
                    return false;
                };
                if !filter(descriptor) {
                    return false;
                }
                *cursor += 1;
                true
            }
            StepKind::Base => {
                let first = &descriptors[0];
                if step.element_type != first.element_type {
                    return false;
                }
                if let Some(name) = &step.style_name {
                    if first.attributes.style.as_deref() != Some(name.as_str()) {
                        return false;
                    }
                }
                *cursor += 1;
                true
            }
            StepKind::Parent => {
                let current = &descriptors[*cursor];
                if step.element_type != ElementType::Any
                    && current.element_type != step.element_type
                {
                    return false;
                }
                if let Some(name) = &step.style_name {
                    if current.attributes.style.as_deref() != Some(name.as_str()) {
                        return false;
                    }
                }
                *cursor += 1;
                true
            }
            StepKind::Ancestor => {
                if descriptors.len() < 2 {
                    return false;
                }
                let found = descriptors
                    .iter()
                    .enumerate()
                    .skip(*cursor)
                    .find(|(_, candidate)| {
                        (candidate.element_type == ElementType::Any
                            || candidate.element_type == step.element_type)
                            && match &step.style_name {
                                Some(name) => {
                                    candidate.attributes.style.as_deref() == Some(name.as_str())
                                }
                                None => true,
                            }
                    });
                match found {
                    Some((index, _)) => {
                        *cursor = index + 1;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Picks the most specific binding among the matched ones.
    ///
    /// Specificity is decided step by step. At each step index the
    /// surviving chains are tiered: both a style name and a concrete
    /// element type beat a style name alone, which beats any step at
    /// all; within a tier, parent steps are preferred. Ties move on to
    /// the next step index; a pool whose chains are all exhausted falls
    /// back to the earliest registered binding.
    fn best_match(&self, pool: &[usize], level: usize) -> Option<usize> {
        if pool.is_empty() {
            return None;
        }
        if pool.len() == 1 {
            return Some(pool[0]);
        }

        let tier = |predicate: &dyn Fn(&SelectorStep) -> bool| -> Vec<usize> {
            let mut res: Vec<usize> = pool
                .iter()
                .copied()
                .filter(|&index| {
                    self.bindings[index]
                        .selectors
                        .get(level)
                        .is_some_and(predicate)
                })
                .collect();
            let preferred: Vec<usize> = res
                .iter()
                .copied()
                .filter(|&index| {
                    matches!(
                        self.bindings[index].selectors.get(level),
                        Some(step) if step.kind == StepKind::Parent
                    )
                })
                .collect();
            if !preferred.is_empty() {
                res = preferred;
            }
            res
        };

        let mut res = tier(&|step| {
            step.style_name.is_some() && step.element_type != ElementType::Any
        });
        if res.is_empty() {
            res = tier(&|step| step.style_name.is_some());
        }
        if res.is_empty() {
            res = tier(&|_| true);
        }

        if res.len() > 1 {
            return self.best_match(&res, level + 1);
        }
        if res.is_empty() {
            return pool.first().copied();
        }
        res.first().copied()
    }
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_style_is_preregistered() {
        let manager = StyleManager::new();
        assert!(manager.has_style(UNDEFINED_STYLE));
    }

    #[test]
    fn empty_names_are_generated() {
        let mut manager = StyleManager::new();
        let a = manager.add_style("");
        let b = manager.add_style("");
        assert_ne!(a.borrow().name(), b.borrow().name());
        assert!(manager.has_style(a.borrow().name()));
    }

    #[test]
    fn re_registering_a_name_repoints_its_bindings() {
        let mut manager = StyleManager::new();
        let old = manager.add_style("para");
        old.borrow_mut().font.bold = Some(true);
        manager.for_element(ElementType::Paragraph).bind_style(&old);

        let replacement = manager.add_style("para");
        replacement.borrow_mut().font.italic = Some(true);

        let descriptor = StylingDescriptor::new(vec![crate::descriptor::SingleElementDescriptor {
            element_type: ElementType::Paragraph,
            ..Default::default()
        }]);
        let resolved = manager.resolve(&descriptor);
        assert_eq!(resolved.font.italic, Some(true));
        assert_eq!(resolved.font.bold, None);
    }

    #[test]
    fn binding_the_same_chain_twice_replaces_the_binding() {
        let mut manager = StyleManager::new();
        let first = manager.add_style("first");
        let second = manager.add_style("second");
        second.borrow_mut().font.bold = Some(true);

        manager.for_element(ElementType::Code).bind_style(&first);
        manager.for_element(ElementType::Code).bind_style(&second);

        let descriptor = StylingDescriptor::new(vec![crate::descriptor::SingleElementDescriptor {
            element_type: ElementType::Code,
            ..Default::default()
        }]);
        let resolved = manager.resolve(&descriptor);
        assert_eq!(resolved.name(), "second");
        assert_eq!(resolved.font.bold, Some(true));
    }

    #[test]
    fn rename_keeps_bindings_and_rejects_collisions() {
        let mut manager = StyleManager::new();
        let style = manager.add_style("old");
        style.borrow_mut().font.bold = Some(true);
        manager.for_element(ElementType::Paragraph).bind_style(&style);

        manager.rename_style("old", "new").unwrap();
        assert!(!manager.has_style("old"));
        assert_eq!(style.borrow().name(), "new");

        let descriptor = StylingDescriptor::new(vec![crate::descriptor::SingleElementDescriptor {
            element_type: ElementType::Paragraph,
            ..Default::default()
        }]);
        assert_eq!(manager.resolve(&descriptor).font.bold, Some(true));

        manager.add_style("taken");
        assert!(matches!(
            manager.rename_style("new", "taken"),
            Err(StyleError::StyleExists(_))
        ));
        assert!(matches!(
            manager.rename_style("ghost", "other"),
            Err(StyleError::UnknownStyle(_))
        ));
    }

    #[test]
    fn rebase_detects_cycles() {
        let mut manager = StyleManager::new();
        manager.add_style("a");
        manager.derive_style("b", "a").unwrap();
        manager.derive_style("c", "b").unwrap();

        assert!(matches!(
            manager.rebase_style("a", Some("c")),
            Err(StyleError::BaseCycle(_))
        ));
        assert!(matches!(
            manager.rebase_style("a", Some("a")),
            Err(StyleError::BaseCycle(_))
        ));

        manager.rebase_style("c", Some("a")).unwrap();
        manager.rebase_style("c", None).unwrap();
        assert!(manager.style("c").unwrap().borrow().base().is_none());
    }
}
