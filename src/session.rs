
use crate::cloud::Cloud;
use crate::cloud::FirewallId;
use crate::cloud::FirewallRules;
use crate::cloud::RuleFamily;
use crate::editor::Editor;
use crate::errors::*;
use crate::rulefile::parse_rule_file;
use crate::rulefile::RuleFile;
use crate::ui::Ui;
use std::path::Path;
use std::path::PathBuf;

pub const CONFIRM_PROMPT: &str = "Would you like to submit the rules?";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Fetching,
    Editing,
    AwaitingConfirmation,
    Parsing,
    Submitting,
    Done,
    Aborted,
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Aborted,
    /// Multi-VLAN firewalls are edited in the vendor console.
    Redirected,
}

#[derive(Debug)]
pub struct EditSession {
    firewall_id: FirewallId,
    state: SessionState,
    rule_path: Option<PathBuf>,
}

impl EditSession {
    pub fn new(firewall_id: FirewallId) -> EditSession {
        EditSession {
            firewall_id,
            state: SessionState::Init,
            rule_path: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn rule_path(&self) -> Option<&Path> {
        self.rule_path.as_ref().map(PathBuf::as_path)
    }

    /// `connect` is only called once the firewall is known to be editable.
    pub fn run<C, F, E, U>(&mut self, connect: F, editor: &E, ui: &U) -> Result<Outcome>
    where
        C: Cloud,
        F: FnOnce() -> Result<C>,
        E: Editor,
        U: Ui,
    {
        let result = self.advance(connect, editor, ui);
        if result.is_err() {
            self.transition(SessionState::Failed);
        }
        result
    }

    fn advance<C, F, E, U>(&mut self, connect: F, editor: &E, ui: &U) -> Result<Outcome>
    where
        C: Cloud,
        F: FnOnce() -> Result<C>,
        E: Editor,
        U: Ui,
    {
        let family = match self.firewall_id.firewall_type.family() {
            Some(family) => family,
            None => {
                ui.print(&format!(
                    "Firewall {} is a multi-VLAN firewall; edit its rules through the \
                     FortiGate management console.",
                    self.firewall_id
                ));
                self.transition(SessionState::Done);
                return Ok(Outcome::Redirected);
            }
        };

        self.transition(SessionState::Fetching);
        let cloud = connect()?;
        match family {
            RuleFamily::Dedicated => self.edit(cloud.dedicated_rules(), editor, ui),
            RuleFamily::Standard => self.edit(cloud.standard_rules(), editor, ui),
        }
    }

    fn edit<R, E, U>(&mut self, rules: &R, editor: &E, ui: &U) -> Result<Outcome>
    where
        R: FirewallRules,
        E: Editor,
        U: Ui,
    {
        let firewall_id = self.firewall_id;
        let existing = rules.fetch_rules(firewall_id.id).chain_err(|| {
            format!("failed to fetch {} rules for {}", rules.family(), firewall_id)
        })?;
        debug!("fetched {} rule(s) for {}", existing.len(), firewall_id);

        self.transition(SessionState::Editing);
        let file = RuleFile::create(&existing)?;
        self.rule_path = Some(file.path().to_owned());
        file.edit(editor)
            .chain_err(|| format!("failed to open editor for {}", firewall_id))?;
        let content = file.read()?;

        self.transition(SessionState::AwaitingConfirmation);
        ui.print(&content);
        if !ui.confirm(CONFIRM_PROMPT)? {
            file.close();
            self.transition(SessionState::Aborted);
            ui.print("Aborted.");
            return Ok(Outcome::Aborted);
        }

        self.transition(SessionState::Parsing);
        let edited = parse_rule_file(&content).chain_err(|| "failed to parse rule file")?;
        file.close();

        self.transition(SessionState::Submitting);
        rules.replace_rules(firewall_id.id, &edited).chain_err(|| {
            format!("failed to replace {} rules for {}", rules.family(), firewall_id)
        })?;

        self.transition(SessionState::Done);
        ui.print("OK");
        ui.print(&format!("Firewall {} was updated.", firewall_id));
        Ok(Outcome::Updated)
    }

    fn transition(&mut self, next: SessionState) {
        debug!("{}: {:?} -> {:?}", self.firewall_id, self.state, next);
        self.state = next;
    }
}
