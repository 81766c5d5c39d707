use crate::cloud::softlayer::client::SlClient;
use crate::cloud::FirewallRules;
use crate::cloud::RuleFamily;
use crate::errors::*;
use crate::rules::RuleRecord;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

const VLAN_FIREWALL_SERVICE: &str = "SoftLayer_Network_Vlan_Firewall";
const COMPONENT_FIREWALL_SERVICE: &str = "SoftLayer_Network_Component_Firewall";
const UPDATE_REQUEST_SERVICE: &str = "SoftLayer_Network_Firewall_Update_Request";

const RULE_MASK: &str = "mask[orderValue,action,destinationIpAddress,destinationIpSubnetMask,\
                         protocol,destinationPortRangeStart,destinationPortRangeEnd,\
                         sourceIpAddress,sourceIpSubnetMask,version,notes]";
const ACCESS_CONTROL_LIST_MASK: &str =
    "mask[networkVlan[firewallInterfaces[name,firewallContextAccessControlLists[id,direction]]]]";

pub struct SlDedicatedRules {
    client: Rc<SlClient>,
}

impl SlDedicatedRules {
    pub(super) fn new(client: &Rc<SlClient>) -> SlDedicatedRules {
        SlDedicatedRules {
            client: Rc::clone(client),
        }
    }

    fn find_access_control_list(&self, id: u64) -> Result<u64> {
        let firewall: VlanFirewall = self
            .client
            .get(VLAN_FIREWALL_SERVICE, id, "getObject", Some(ACCESS_CONTROL_LIST_MASK))
            .chain_err(|| format!("failed to look up dedicated firewall {}", id))?;
        select_access_control_list(&firewall).ok_or_else(|| {
            format!("dedicated firewall {} has no inbound access control list", id).into()
        })
    }
}

impl fmt::Debug for SlDedicatedRules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:?})", VLAN_FIREWALL_SERVICE, self.client)
    }
}

impl FirewallRules for SlDedicatedRules {
    fn family(&self) -> RuleFamily {
        RuleFamily::Dedicated
    }

    fn fetch_rules(&self, id: u64) -> Result<Vec<RuleRecord>> {
        let rules = self
            .client
            .get(VLAN_FIREWALL_SERVICE, id, "getRules", Some(RULE_MASK))?;
        Ok(sorted_by_order(rules))
    }

    fn replace_rules(&self, id: u64, rules: &[RuleRecord]) -> Result<()> {
        let acl_id = self.find_access_control_list(id)?;
        let req = UpdateRequest {
            firewall_context_access_control_list_id: Some(acl_id),
            network_component_firewall_id: None,
            rules,
        };
        let _: Value = self
            .client
            .call(UPDATE_REQUEST_SERVICE, "createObject", &[req])?;
        Ok(())
    }
}

pub struct SlStandardRules {
    client: Rc<SlClient>,
}

impl SlStandardRules {
    pub(super) fn new(client: &Rc<SlClient>) -> SlStandardRules {
        SlStandardRules {
            client: Rc::clone(client),
        }
    }
}

impl fmt::Debug for SlStandardRules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:?})", COMPONENT_FIREWALL_SERVICE, self.client)
    }
}

impl FirewallRules for SlStandardRules {
    fn family(&self) -> RuleFamily {
        RuleFamily::Standard
    }

    fn fetch_rules(&self, id: u64) -> Result<Vec<RuleRecord>> {
        let rules = self
            .client
            .get(COMPONENT_FIREWALL_SERVICE, id, "getRules", Some(RULE_MASK))?;
        Ok(sorted_by_order(rules))
    }

    fn replace_rules(&self, id: u64, rules: &[RuleRecord]) -> Result<()> {
        let req = UpdateRequest {
            firewall_context_access_control_list_id: None,
            network_component_firewall_id: Some(id),
            rules,
        };
        let _: Value = self
            .client
            .call(UPDATE_REQUEST_SERVICE, "createObject", &[req])?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    firewall_context_access_control_list_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_component_firewall_id: Option<u64>,
    rules: &'a [RuleRecord],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VlanFirewall {
    network_vlan: Option<NetworkVlan>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NetworkVlan {
    firewall_interfaces: Vec<FirewallInterface>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FirewallInterface {
    name: Option<String>,
    firewall_context_access_control_lists: Vec<AccessControlList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AccessControlList {
    id: Option<u64>,
    direction: Option<String>,
}

/// The list to update is on any interface but `inside`, in any direction but
/// `out`. The last such list wins.
fn select_access_control_list(firewall: &VlanFirewall) -> Option<u64> {
    let vlan = firewall.network_vlan.as_ref()?;
    vlan.firewall_interfaces
        .iter()
        .filter(|fwl| fwl.name.as_ref().map_or(true, |name| name != "inside"))
        .flat_map(|fwl| fwl.firewall_context_access_control_lists.iter())
        .filter(|acl| acl.direction.as_ref().map_or(true, |dir| dir != "out"))
        .filter_map(|acl| acl.id)
        .last()
}

fn sorted_by_order(mut rules: Vec<RuleRecord>) -> Vec<RuleRecord> {
    rules.sort_by_key(|rule| rule.order.unwrap_or(u32::MAX));
    rules
}
