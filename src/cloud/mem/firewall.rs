use crate::cloud::FirewallRules;
use crate::cloud::RuleFamily;
use crate::errors::*;
use crate::rules::RuleRecord;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct MemFirewallRules {
    family: RuleFamily,
    state: Rc<RefCell<MemFirewallRulesState>>,
}

struct MemFirewallRulesState {
    firewalls: HashMap<u64, Vec<RuleRecord>>,
    fetches: usize,
    replacements: usize,
    replace_error: Option<String>,
}

impl MemFirewallRules {
    pub(super) fn new(family: RuleFamily) -> MemFirewallRules {
        MemFirewallRules {
            family,
            state: Rc::new(RefCell::new(MemFirewallRulesState {
                firewalls: HashMap::new(),
                fetches: 0,
                replacements: 0,
                replace_error: None,
            })),
        }
    }

    pub fn create_firewall(&self, id: u64, rules: Vec<RuleRecord>) {
        let mut state = self.state.borrow_mut();
        state.firewalls.insert(id, rules);
    }

    /// Makes every later replace call fail with `msg`.
    pub fn fail_replacements(&self, msg: &str) {
        let mut state = self.state.borrow_mut();
        state.replace_error = Some(msg.to_owned());
    }

    pub fn rules(&self, id: u64) -> Option<Vec<RuleRecord>> {
        let state = self.state.borrow();
        state.firewalls.get(&id).cloned()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.borrow().fetches
    }

    pub fn replace_count(&self) -> usize {
        self.state.borrow().replacements
    }
}

impl fmt::Debug for MemFirewallRules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mem {} firewalls", self.family)
    }
}

impl FirewallRules for MemFirewallRules {
    fn family(&self) -> RuleFamily {
        self.family
    }

    fn fetch_rules(&self, id: u64) -> Result<Vec<RuleRecord>> {
        let mut state = self.state.borrow_mut();
        state.fetches += 1;
        match state.firewalls.get(&id) {
            Some(rules) => Ok(rules.clone()),
            None => bail!(ErrorKind::Api(404, format!("no {} firewall with id {}", self.family, id))),
        }
    }

    fn replace_rules(&self, id: u64, rules: &[RuleRecord]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.replacements += 1;
        if let Some(ref msg) = state.replace_error {
            bail!(ErrorKind::Api(500, msg.clone()));
        }
        if !state.firewalls.contains_key(&id) {
            bail!(ErrorKind::Api(404, format!("no {} firewall with id {}", self.family, id)));
        }
        state.firewalls.insert(id, rules.to_vec());
        Ok(())
    }
}
