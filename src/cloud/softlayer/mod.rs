use crate::cloud::softlayer::client::SlClient;
use crate::cloud::softlayer::firewall::SlDedicatedRules;
use crate::cloud::softlayer::firewall::SlStandardRules;
use crate::cloud::Cloud;
use crate::config::Config;
use crate::errors::*;
use std::rc::Rc;

mod client;
mod firewall;
#[cfg(test)]
mod test_server;

pub struct SlCloud {
    dedicated: SlDedicatedRules,
    standard: SlStandardRules,
}

impl SlCloud {
    pub fn new(config: &Config) -> Result<SlCloud> {
        let credentials = config.credentials()?;
        let client = SlClient::new(
            &credentials.endpoint,
            &credentials.username,
            &credentials.api_key,
        )
        .chain_err(|| "could not create API client")?;
        let client = Rc::new(client);
        Ok(SlCloud {
            dedicated: SlDedicatedRules::new(&client),
            standard: SlStandardRules::new(&client),
        })
    }
}

impl Cloud for SlCloud {
    type Dedicated = SlDedicatedRules;
    type Standard = SlStandardRules;

    fn dedicated_rules(&self) -> &SlDedicatedRules {
        &self.dedicated
    }

    fn standard_rules(&self) -> &SlStandardRules {
        &self.standard
    }
}
