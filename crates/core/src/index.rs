//! Reference resolution over a [`ModelDocument`].
//!
//! Lookups return `Option`; the `*_or_raw` helpers degrade to the raw
//! textual name so that a dangling reference still produces readable output.

use crate::model::{ActionRef, ModelDocument, Variable};
use std::collections::HashMap;

/// Read-only lookup tables built from a borrowed model.
pub struct ModelIndex<'a> {
    doc: &'a ModelDocument,
    controllers: HashMap<&'a str, Option<&'a str>>,
    actions: HashMap<(&'a str, &'a str), &'a ActionRef>,
    variables: HashMap<&'a str, &'a [Variable]>,
}

impl<'a> ModelIndex<'a> {
    pub fn new(doc: &'a ModelDocument) -> Self {
        let controllers = doc
            .controllers
            .iter()
            .map(|c| (c.name.as_str(), c.label.as_deref()))
            .collect();
        let actions = doc
            .actions
            .iter()
            .map(|a| ((a.controller.as_str(), a.name.as_str()), a))
            .collect();
        // First declaration wins if a controller is listed twice.
        let mut variables: HashMap<&'a str, &'a [Variable]> = HashMap::new();
        for group in &doc.variables {
            variables
                .entry(group.controller.as_str())
                .or_insert(group.variables.as_slice());
        }
        Self {
            doc,
            controllers,
            actions,
            variables,
        }
    }

    pub fn document(&self) -> &'a ModelDocument {
        self.doc
    }

    /// The action at `index` in the actions list.
    pub fn action_at(&self, index: usize) -> Option<&'a ActionRef> {
        self.doc.actions.get(index)
    }

    /// The declared action matching `reference` (controller + name).
    pub fn action(&self, reference: &ActionRef) -> Option<&'a ActionRef> {
        self.actions
            .get(&(reference.controller.as_str(), reference.name.as_str()))
            .copied()
    }

    /// Display label of a controller, if declared with one.
    pub fn controller_label(&self, controller: &str) -> Option<&'a str> {
        self.controllers.get(controller).copied().flatten()
    }

    /// Sentence subject for a controller: its label, else the raw name.
    pub fn system_or_raw<'s>(&self, controller: &'s str) -> &'s str
    where
        'a: 's,
    {
        self.controller_label(controller).unwrap_or(controller)
    }

    /// Display label of an action: the reference's own label, then the
    /// declared action's label, then the raw action name.
    pub fn action_label_or_raw<'s>(&self, reference: &'s ActionRef) -> &'s str
    where
        'a: 's,
    {
        if let Some(label) = reference.label.as_deref() {
            return label;
        }
        self.action(reference)
            .and_then(|a| a.label.as_deref())
            .unwrap_or(reference.name.as_str())
    }

    /// Context variables of a controller, in declaration order.
    pub fn variables_of(&self, controller: &str) -> Option<&'a [Variable]> {
        self.variables.get(controller).copied()
    }

    /// A single variable of a controller.
    pub fn variable(&self, controller: &str, name: &str) -> Option<&'a Variable> {
        self.variables_of(controller)?
            .iter()
            .find(|v| v.name == name)
    }

    /// Whether `value` is part of the variable's declared domain.
    pub fn has_value(&self, controller: &str, variable: &str, value: &str) -> bool {
        self.variable(controller, variable)
            .is_some_and(|v| v.has_value(value))
    }
}
