#[cfg(test)]
pub mod mem;
pub mod softlayer;

use crate::errors::*;
use crate::rules::RuleRecord;
use std::fmt;
use std::str;

pub trait Cloud {
    type Dedicated: FirewallRules;
    type Standard: FirewallRules;

    fn dedicated_rules(&self) -> &Self::Dedicated;
    fn standard_rules(&self) -> &Self::Standard;
}

pub trait FirewallRules: fmt::Debug {
    fn family(&self) -> RuleFamily;
    fn fetch_rules(&self, id: u64) -> Result<Vec<RuleRecord>>;
    // replaces the whole rule set; the remote side applies it atomically
    fn replace_rules(&self, id: u64, rules: &[RuleRecord]) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuleFamily {
    Dedicated,
    Standard,
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RuleFamily::Dedicated => write!(f, "dedicated"),
            RuleFamily::Standard => write!(f, "standard"),
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum FirewallType {
    Vlan,
    Vs,
    Server,
    MultiVlan,
}

impl FirewallType {
    /// Multi-VLAN appliances have no rule family: they are managed through
    /// the vendor console.
    pub fn family(self) -> Option<RuleFamily> {
        match self {
            FirewallType::Vlan => Some(RuleFamily::Dedicated),
            FirewallType::Vs | FirewallType::Server => Some(RuleFamily::Standard),
            FirewallType::MultiVlan => None,
        }
    }
}

impl fmt::Display for FirewallType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            FirewallType::Vlan => "vlan",
            FirewallType::Vs => "vs",
            FirewallType::Server => "server",
            FirewallType::MultiVlan => "multiVlan",
        };
        write!(f, "{}", s)
    }
}

impl str::FromStr for FirewallType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vlan" => Ok(FirewallType::Vlan),
            "vs" => Ok(FirewallType::Vs),
            "server" => Ok(FirewallType::Server),
            "multiVlan" => Ok(FirewallType::MultiVlan),
            _ => bail!(ErrorKind::Usage(format!(
                "invalid firewall type {}: expected one of vlan, vs, server or multiVlan",
                s
            ))),
        }
    }
}

#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub struct FirewallId {
    pub firewall_type: FirewallType,
    pub id: u64,
}

impl FirewallId {
    pub fn new(firewall_type: FirewallType, id: u64) -> FirewallId {
        FirewallId { firewall_type, id }
    }
}

impl fmt::Display for FirewallId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.firewall_type, self.id)
    }
}

impl fmt::Debug for FirewallId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl str::FromStr for FirewallId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            ErrorKind::Usage(format!(
                "invalid ID {}: expected TYPE:ID where TYPE is the firewall type \
                 and ID is a positive integer",
                s
            ))
        };
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 2 {
            bail!(invalid());
        }
        let firewall_type = parts[0].parse()?;
        let id = match parts[1].parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => bail!(invalid()),
        };
        Ok(FirewallId::new(firewall_type, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firewall_id_display_and_parse() {
        test_display_and_parse(FirewallId::new(FirewallType::Vlan, 123), "vlan:123");
        test_display_and_parse(FirewallId::new(FirewallType::Vs, 1), "vs:1");
        test_display_and_parse(FirewallId::new(FirewallType::Server, 98_765), "server:98765");
        test_display_and_parse(FirewallId::new(FirewallType::MultiVlan, 456_789), "multiVlan:456789");
    }

    #[test]
    fn test_firewall_id_rejects_malformed_input() {
        for s in &[
            "",
            "vlan",
            "vlan:",
            "vlan:abc",
            "vlan:0",
            "vlan:-3",
            "vlan:1:2",
            ":123",
            "VLAN:123",
            "gateway:123",
        ] {
            let err = s.parse::<FirewallId>().unwrap_err();
            match *err.kind() {
                ErrorKind::Usage(_) => {}
                ref other => panic!("{:?}: unexpected error: {}", s, other),
            }
        }
    }

    #[test]
    fn test_firewall_type_families() {
        assert_eq!(Some(RuleFamily::Dedicated), FirewallType::Vlan.family());
        assert_eq!(Some(RuleFamily::Standard), FirewallType::Vs.family());
        assert_eq!(Some(RuleFamily::Standard), FirewallType::Server.family());
        assert_eq!(None, FirewallType::MultiVlan.family());
    }

    fn test_display_and_parse(v: FirewallId, s: &str) {
        assert_eq!(v.to_string(), s);
        assert_eq!(s.parse::<FirewallId>().unwrap(), v);
    }
}
