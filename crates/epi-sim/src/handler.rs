//! Transition dispatch: the per-category handler table and the day hooks.
//!
//! The driver owns a [`HandlerTable`]; when it drains a category it *takes*
//! the boxed handler out of the table, walks the day's events, and puts the
//! handler back.  That dance is what lets a handler receive `&mut Model`
//! (to flip flags, schedule follow-up events, mutate networks) without the
//! table itself being borrowed from the model.

use std::any::Any;

use epi_core::PersonId;
use epi_events::{EventCategory, N_EVENT_CATEGORIES};

use crate::model::Model;

/// A per-category state-transition callback.  Collaborator crates implement
/// this for epidemiology, hospital flow, testing, vaccination, and so on;
/// the substrate only dispatches.
pub trait TransitionHandler {
    fn on_transition(&mut self, model: &mut Model, person: PersonId, payload: Option<&dyn Any>);
}

/// Boxed handlers indexed by event category.  Categories without a
/// registered handler drain as no-ops.
#[derive(Default)]
pub struct HandlerTable {
    slots: Vec<Option<Box<dyn TransitionHandler>>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self { slots: (0..N_EVENT_CATEGORIES).map(|_| None).collect() }
    }

    /// Register (or replace) the handler for one category.
    pub fn register(&mut self, category: EventCategory, handler: Box<dyn TransitionHandler>) {
        if self.slots.is_empty() {
            self.slots = (0..N_EVENT_CATEGORIES).map(|_| None).collect();
        }
        self.slots[category.index()] = Some(handler);
    }

    pub(crate) fn take(&mut self, category: EventCategory) -> Option<Box<dyn TransitionHandler>> {
        self.slots.get_mut(category.index()).and_then(Option::take)
    }

    pub(crate) fn put(&mut self, category: EventCategory, handler: Box<dyn TransitionHandler>) {
        self.slots[category.index()] = Some(handler);
    }
}

/// Once-per-day extension points, called at fixed positions in the step
/// sequence.  Every method defaults to a no-op so callers implement only
/// what they model.
pub trait DayHooks {
    /// Start of day, before counters fold: intervention-policy updates.
    fn update_policy(&mut self, _model: &mut Model) {}
    /// Infection spread over today's recorded interactions.
    fn transmit(&mut self, _model: &mut Model) {}
    /// External case importation.
    fn seed_infections(&mut self, _model: &mut Model) {}
    /// Hospital admission from the waiting lists, between the ward drains.
    fn hospital_waiting_lists(&mut self, _model: &mut Model) {}
    /// Background influenza-like illness (drives test demand).
    fn flu_symptoms(&mut self, _model: &mut Model) {}
    /// End-of-day quarantine release sweep, active from
    /// `ModelConfig::smart_release_day`.
    fn smart_release(&mut self, _model: &mut Model) {}
}

/// The empty hook set: a pure substrate run with no collaborator logic.
pub struct NoHooks;

impl DayHooks for NoHooks {}
