// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! REPRODUCE→FIX scenario runner.
//!
//! Phases are grouped by add-on build: the reproduced build is installed
//! once and every scenario's REPRODUCE phase runs against it, then the fixed
//! build is installed for the FIX phases. Within a scenario the phases stay
//! strictly ordered and share fixtures. A failure halts only its own
//! scenario, and that scenario's later phase is reported as skipped.

use std::sync::Mutex;

use hc_core::{
    Addon, AddonInstallation, AddonPair, ErrorCategory, Phase, PhaseContext, PhaseTracker,
};
use tracing::info_span;

use crate::bitbucket::AddonDeployer;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::report::{PhaseReport, RunReport, ScenarioReport};
use crate::scenarios::{Fixtures, Scenario};
use crate::suite::{Collaborators, Suite};

pub struct Runner<'a> {
    env: Collaborators<'a>,
    deployer: &'a dyn AddonDeployer,
    layout: LayoutConfig,
    addons: AddonPair,
    parallel: bool,
    installation: Mutex<AddonInstallation>,
}

impl<'a> Runner<'a> {
    pub fn new(
        env: Collaborators<'a>,
        deployer: &'a dyn AddonDeployer,
        layout: LayoutConfig,
        addons: AddonPair,
    ) -> Self {
        Runner {
            env,
            deployer,
            layout,
            addons,
            parallel: true,
            installation: Mutex::new(AddonInstallation::new()),
        }
    }

    /// Run scenarios of one phase on separate threads.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build currently deployed by this runner.
    pub fn deployed(&self) -> Option<Addon> {
        self.installation
            .lock()
            .ok()
            .and_then(|installation| installation.current().cloned())
    }

    pub fn run(&self, scenarios: &[Scenario]) -> RunReport {
        let mut participants: Vec<Participant<'a>> = scenarios
            .iter()
            .map(|&scenario| {
                Participant::new(scenario, Suite::random(self.env, self.layout.clone()))
            })
            .collect();

        for phase in Phase::ALL {
            let ctx = PhaseContext::new(phase, self.addons.for_phase(phase).clone());
            let mut runnable = Vec::new();
            for participant in participants
                .iter_mut()
                .filter(|p| p.scenario.takes_part_in(phase))
            {
                if participant.halted {
                    participant.skip(&ctx);
                } else {
                    runnable.push(participant);
                }
            }
            if runnable.is_empty() {
                continue;
            }

            if let Err(e) = self.install(&ctx.addon) {
                tracing::error!("unable to install add-on {}: {}", ctx.addon, e);
                let (category, message) = (e.category(), e.to_string());
                for participant in runnable {
                    participant.fail(&ctx, category, message.clone());
                }
                continue;
            }

            if self.parallel && runnable.len() > 1 {
                std::thread::scope(|s| {
                    for participant in runnable {
                        let ctx = &ctx;
                        s.spawn(move || participant.run_phase(ctx));
                    }
                });
            } else {
                for participant in runnable {
                    participant.run_phase(&ctx);
                }
            }
        }

        RunReport {
            scenarios: participants.into_iter().map(|p| p.report).collect(),
        }
    }

    fn install(&self, addon: &Addon) -> Result<()> {
        let mut installation = self
            .installation
            .lock()
            .map_err(|_| Error::environment("add-on installation state poisoned"))?;
        let installed = installation.ensure(addon, |addon| {
            tracing::info!("installing add-on {}", addon);
            self.deployer.install(addon)
        })?;
        if !installed {
            tracing::debug!("add-on {} already deployed", addon);
        }
        Ok(())
    }
}

/// One scenario's progress through the run.
struct Participant<'a> {
    scenario: Scenario,
    suite: Suite<'a>,
    fixtures: Option<Fixtures>,
    tracker: PhaseTracker,
    report: ScenarioReport,
    halted: bool,
}

impl<'a> Participant<'a> {
    fn new(scenario: Scenario, suite: Suite<'a>) -> Self {
        Participant {
            scenario,
            suite,
            fixtures: None,
            tracker: PhaseTracker::new(),
            report: ScenarioReport::new(scenario),
            halted: false,
        }
    }

    fn run_phase(&mut self, ctx: &PhaseContext) {
        let span = info_span!("scenario", name = %self.scenario.name());
        let _guard = span.enter();
        tracing::info!("{}", ctx.banner());

        match self.try_phase(ctx.phase) {
            Ok(()) => {
                tracing::info!("{} phase passed", ctx.phase);
                self.report
                    .phases
                    .push(PhaseReport::passed(ctx.phase, &ctx.addon.version));
            }
            Err(e) => {
                tracing::error!("{} phase failed: {}", ctx.phase, e);
                self.report
                    .phases
                    .push(PhaseReport::failed(ctx.phase, &ctx.addon.version, &e));
                self.halted = true;
            }
        }
    }

    fn try_phase(&mut self, phase: Phase) -> Result<()> {
        self.tracker.begin(phase)?;
        let fixtures = match self.fixtures.take() {
            Some(fixtures) => fixtures,
            None => self.scenario.setup(&mut self.suite)?,
        };
        let result = self.scenario.run_phase(phase, &mut self.suite, &fixtures);
        self.fixtures = Some(fixtures);
        self.tracker.finish(phase)?;
        result
    }

    fn fail(&mut self, ctx: &PhaseContext, category: ErrorCategory, message: String) {
        self.report.phases.push(PhaseReport::failed_with(
            ctx.phase,
            &ctx.addon.version,
            category,
            message,
        ));
        self.halted = true;
    }

    fn skip(&mut self, ctx: &PhaseContext) {
        self.report
            .phases
            .push(PhaseReport::skipped(ctx.phase, &ctx.addon.version));
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
