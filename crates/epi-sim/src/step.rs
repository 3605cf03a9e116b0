//! The time-step driver.
//!
//! One [`Simulation::step`] call advances the model by one day through a
//! fixed sequence.  The order is load-bearing: counters fold before
//! networks rebuild, interactions are on the ledger before transmission
//! runs, tests and traces cascade to a fixed point before releases, and the
//! quarantine person-day accumulator runs last.

use epi_events::EventCategory;
use epi_net::network::Construction;
use epi_net::{build_random_default, build_random_members};

use crate::handler::{DayHooks, HandlerTable};
use crate::model::Model;

/// Disease-progression categories in drain priority order.
const DISEASE_ORDER: [EventCategory; 8] = [
    EventCategory::Symptomatic,
    EventCategory::SymptomaticMild,
    EventCategory::Hospitalised,
    EventCategory::Critical,
    EventCategory::HospitalisedRecovering,
    EventCategory::Recovered,
    EventCategory::Susceptible,
    EventCategory::Death,
];

/// Testing and tracing categories, drained together to a fixed point.
const TEST_TRACE: [EventCategory; 3] = [
    EventCategory::TestTake,
    EventCategory::TestResult,
    EventCategory::ManualContactTracing,
];

/// A model plus the collaborator logic that animates it.
pub struct Simulation<H: DayHooks> {
    pub model: Model,
    pub handlers: HandlerTable,
    pub hooks: H,
}

impl<H: DayHooks> Simulation<H> {
    pub fn new(model: Model, handlers: HandlerTable, hooks: H) -> Self {
        Self { model, handlers, hooks }
    }

    /// Advance one day.
    pub fn step(&mut self) {
        // 1. New day: advance time, reset daily counters, policy hook.
        self.model.time += 1;
        self.model.counters.reset_daily();
        self.hooks.update_policy(&mut self.model);

        // 2. Fold every category's pending counts for the day that just
        //    arrived into the live totals.
        let today = self.model.time;
        for category in EventCategory::ALL {
            self.model.events.roll_day(category, today);
        }

        // 3. Network rebuild and interaction recording.
        if self.model.rebuild_networks {
            self.rebuild_and_record();
            self.model.rebuild_networks = self.model.config.rebuild_networks_daily;
        }

        // 4. Transmission over today's ledger, then importation.
        self.hooks.transmit(&mut self.model);
        self.hooks.seed_infections(&mut self.model);

        // 5. Disease progression, events retained for the daily counts.
        for category in DISEASE_ORDER {
            self.transition_all(category, false);
        }

        // 6. Hospital flow.
        if self.model.config.hospital_on {
            self.transition_all(EventCategory::Discharged, false);
            self.transition_all(EventCategory::Mortuary, false);
            self.hooks.hospital_waiting_lists(&mut self.model);
            self.transition_all(EventCategory::Waiting, false);
            self.transition_all(EventCategory::General, false);
            self.transition_all(EventCategory::Icu, false);
        }

        // 7. Background flu (drives test demand).
        self.hooks.flu_symptoms(&mut self.model);

        // 8. Tests and traces cascade: a result can trigger traces, traces
        //    can trigger further tests today.  Drain until quiescent.
        loop {
            let pending: u64 = TEST_TRACE
                .iter()
                .map(|&c| self.model.events.n_pending(c, self.model.time))
                .sum();
            if pending == 0 {
                break;
            }
            for category in TEST_TRACE {
                self.transition_all(category, true);
            }
        }

        // 9. Vaccination (payload-carrying, consumed).
        self.transition_all(EventCategory::VaccineProtect, true);
        self.transition_all(EventCategory::VaccineWane, true);

        // 10. Releases, retained for the daily counts.
        self.transition_all(EventCategory::QuarantineRelease, false);
        self.transition_all(EventCategory::TraceTokenRelease, false);

        // 11. Smart release sweep, once its start day is configured.
        if self.model.config.smart_release_day > 0 {
            self.hooks.smart_release(&mut self.model);
        }

        // 12. Quarantine person-days.
        self.model.counters.n_quarantine_days +=
            self.model.events.n_current(EventCategory::Quarantined);

        log::debug!(
            "{}: {} interactions recorded, {} in quarantine",
            self.model.time,
            self.model.ledger.total_recorded(),
            self.model.events.n_current(EventCategory::Quarantined)
        );
    }

    /// Run `n` consecutive steps.
    pub fn run_days(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Run from the current day to the configured end of the simulation.
    pub fn run(&mut self) {
        while self.model.time < self.model.config.end_day() {
            self.step();
        }
    }

    /// Rotate the ledger ring, rebuild the daily networks, and record every
    /// network's surviving edges into today's diaries.
    fn rebuild_and_record(&mut self) {
        let model = &mut self.model;
        model.ledger.rotate_day();

        let soft = model.config.soft_quarantine_on;
        build_random_default(model.networks.random_mut(), &model.population, &mut model.rng);
        for net in model.networks.user_networks_mut() {
            if net.construction == Construction::RandomMembers {
                build_random_members(net, &model.population, soft, &mut model.rng);
            }
        }

        for net in model.networks.iter() {
            model.ledger.record_network(net, &model.population, soft, &mut model.rng);
        }
    }

    /// Dispatch every event pending today in `category`.  The snapshot is
    /// taken once, and each node's successor is captured before its handler
    /// runs, so handlers may schedule or cancel freely; same-day events they
    /// enqueue wait for a later pass (the fixed-point loop relies on this).
    fn transition_all(&mut self, category: EventCategory, remove: bool) -> u64 {
        let today = self.model.time;
        let (mut id, count) = self.model.events.drain_snapshot(category, today);
        let mut handler = self.handlers.take(category);

        for _ in 0..count {
            let next = self.model.events.next_of(id);
            let person = self.model.events.record(id).person;

            if let Some(h) = handler.as_mut() {
                let payload = self.model.events.take_payload(id);
                h.on_transition(&mut self.model, person, payload.as_deref());
                if remove {
                    self.model.events.remove(id, today);
                } else {
                    self.model.events.put_payload(id, payload);
                }
            } else if remove {
                self.model.events.remove(id, today);
            }

            id = next;
        }

        if let Some(h) = handler {
            self.handlers.put(category, h);
        }
        count
    }
}
