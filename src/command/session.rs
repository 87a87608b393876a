//! Session - runs parsed commands against a simulation
//!
//! Every command that parses is recorded in the simulation's action log,
//! whether it succeeded or not. The backup slot lives here rather than in the
//! simulation, so a snapshot never contains an older snapshot.

use std::io::{BufRead, Write};

use crate::city::settlement::Settlement;
use crate::command::log::ActionRecord;
use crate::command::parser::Command;
use crate::core::error::{PlannerError, Result};
use crate::simulation::{Simulation, Snapshot};

pub struct Session {
    simulation: Simulation,
    backup: Option<Snapshot>,
}

impl Session {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            backup: None,
        }
    }

    /// Parse and run one line. Lines that fail to parse are not logged.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<String>> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    /// Run a command, log it, and return any text it produced
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        let outcome = self.apply(&command);
        let record = match &outcome {
            Ok(_) => ActionRecord::completed(command),
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "Command failed");
                ActionRecord::failed(command, e.to_string())
            }
        };
        self.simulation.record(record);
        outcome
    }

    fn apply(&mut self, command: &Command) -> Result<Option<String>> {
        match command {
            Command::Step { steps } => {
                self.simulation.run(*steps)?;
                Ok(None)
            }
            Command::AddPlan { settlement, policy } => {
                self.simulation.add_plan(settlement, policy)?;
                Ok(None)
            }
            Command::AddSettlement { name, kind } => {
                self.simulation.add_settlement(Settlement::new(name.clone(), *kind))?;
                Ok(None)
            }
            Command::AddFacility { facility } => {
                self.simulation.add_facility(facility.clone())?;
                Ok(None)
            }
            Command::PlanStatus { plan_id } => {
                Ok(Some(self.simulation.plan(*plan_id)?.to_string()))
            }
            Command::ChangePolicy { plan_id, policy } => {
                self.simulation.plan_mut(*plan_id)?.change_policy(*policy)?;
                Ok(None)
            }
            Command::Log => {
                let lines: Vec<String> = self
                    .simulation
                    .actions_log()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                Ok((!lines.is_empty()).then(|| lines.join("\n")))
            }
            Command::Close => {
                let summaries: Vec<String> = self
                    .simulation
                    .close()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                Ok((!summaries.is_empty()).then(|| summaries.join("\n\n")))
            }
            Command::Backup => {
                self.backup = Some(self.simulation.snapshot());
                Ok(None)
            }
            Command::Restore => {
                let snapshot = self.backup.as_ref().ok_or(PlannerError::NoBackup)?;
                self.simulation.restore(snapshot);
                Ok(None)
            }
        }
    }

    /// Read commands from `input` until `close` or end of input, writing
    /// command output and `Error: ...` lines to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W, prompt: bool) -> Result<()> {
        self.simulation.open();
        writeln!(output, "The simulation has started")?;

        let mut lines = input.lines();
        while self.simulation.is_running() {
            if prompt {
                write!(output, ">")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.execute_line(&line) {
                Ok(Some(text)) => writeln!(output, "{}", text)?,
                Ok(None) => {}
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }
}
