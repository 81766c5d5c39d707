mod firewall;

pub use crate::cloud::mem::firewall::MemFirewallRules;
use crate::cloud::Cloud;
use crate::cloud::RuleFamily;

#[derive(Clone)]
pub struct MemCloud {
    dedicated: MemFirewallRules,
    standard: MemFirewallRules,
}

impl MemCloud {
    pub fn new() -> MemCloud {
        MemCloud {
            dedicated: MemFirewallRules::new(RuleFamily::Dedicated),
            standard: MemFirewallRules::new(RuleFamily::Standard),
        }
    }
}

impl Cloud for MemCloud {
    type Dedicated = MemFirewallRules;
    type Standard = MemFirewallRules;

    fn dedicated_rules(&self) -> &MemFirewallRules {
        &self.dedicated
    }

    fn standard_rules(&self) -> &MemFirewallRules {
        &self.standard
    }
}
