use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_ACTION: &str = "permit";
pub const DEFAULT_PROTOCOL: &str = "tcp";
pub const DEFAULT_IP_ADDRESS: &str = "any";
pub const DEFAULT_IP_SUBNET_MASK: &str = "255.255.255.255";
pub const DEFAULT_PORT: i64 = 1;
pub const DEFAULT_VERSION: i64 = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(rename = "orderValue", skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ip_subnet_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_ip_subnet_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port_range_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port_range_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl RuleRecord {
    /// Fills every unset field except `order` with its default.
    pub fn with_defaults(mut self) -> RuleRecord {
        fn fill(field: &mut Option<String>, default: &str) {
            if field.is_none() {
                *field = Some(default.to_owned());
            }
        }

        fill(&mut self.action, DEFAULT_ACTION);
        fill(&mut self.protocol, DEFAULT_PROTOCOL);
        fill(&mut self.source_ip_address, DEFAULT_IP_ADDRESS);
        fill(&mut self.source_ip_subnet_mask, DEFAULT_IP_SUBNET_MASK);
        fill(&mut self.destination_ip_address, DEFAULT_IP_ADDRESS);
        fill(&mut self.destination_ip_subnet_mask, DEFAULT_IP_SUBNET_MASK);
        self.destination_port_range_start = self.destination_port_range_start.or(Some(DEFAULT_PORT));
        self.destination_port_range_end = self.destination_port_range_end.or(Some(DEFAULT_PORT));
        self.version = self.version.or(Some(DEFAULT_VERSION));
        self
    }
}

/// Renders the nine-line text block for `rule`. `order` is implied by the
/// block's position in the file and never written.
pub fn format_rule(rule: &RuleRecord) -> String {
    format!(
        "action: {}\n\
         protocol: {}\n\
         source_ip_address: {}\n\
         source_ip_subnet_mask: {}\n\
         destination_ip_address: {}\n\
         destination_ip_subnet_mask: {}\n\
         destination_port_range_start: {}\n\
         destination_port_range_end: {}\n\
         version: {}\n",
        rule.action.as_ref().map_or(DEFAULT_ACTION, String::as_str),
        rule.protocol.as_ref().map_or(DEFAULT_PROTOCOL, String::as_str),
        rule.source_ip_address.as_ref().map_or(DEFAULT_IP_ADDRESS, String::as_str),
        rule.source_ip_subnet_mask.as_ref().map_or(DEFAULT_IP_SUBNET_MASK, String::as_str),
        rule.destination_ip_address.as_ref().map_or(DEFAULT_IP_ADDRESS, String::as_str),
        rule.destination_ip_subnet_mask.as_ref().map_or(DEFAULT_IP_SUBNET_MASK, String::as_str),
        rule.destination_port_range_start.unwrap_or(DEFAULT_PORT),
        rule.destination_port_range_end.unwrap_or(DEFAULT_PORT),
        rule.version.unwrap_or(DEFAULT_VERSION),
    )
}
