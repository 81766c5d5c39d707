use crate::editor::Editor;
use crate::errors::*;
use crate::rules::format_rule;
use crate::rules::RuleRecord;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Separates rule blocks. Written with a trailing newline.
pub const DELIMITER: &str = "=========================================";

pub fn render_rule_file(rules: &[RuleRecord]) -> String {
    let template = [RuleRecord::default()];
    let rules = if rules.is_empty() { &template[..] } else { rules };

    let mut content = String::new();
    content.push_str(DELIMITER);
    content.push('\n');
    for rule in rules {
        content.push_str(&format_rule(rule));
        content.push_str(DELIMITER);
        content.push('\n');
    }
    content
}

/// Parses edited text back into rules, numbering them 1..N by position.
pub fn parse_rule_file(content: &str) -> Result<Vec<RuleRecord>> {
    let mut rules = Vec::new();
    for block in split_blocks(content) {
        let mut rule = parse_block(&block)?.with_defaults();
        rule.order = Some(rules.len() as u32 + 1);
        rules.push(rule);
    }
    Ok(rules)
}

fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![Vec::new()];
    for line in content.lines() {
        if line.trim() == DELIMITER {
            blocks.push(Vec::new());
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
        .into_iter()
        .filter(|lines| lines.iter().any(|line| !line.trim().is_empty()))
        .collect()
}

fn parse_block(lines: &[&str]) -> Result<RuleRecord> {
    let mut rule = RuleRecord::default();
    for line in lines {
        let mut parts = line.splitn(2, ':');
        let key = parts.next().unwrap_or("").trim();
        let value = match parts.next() {
            Some(value) => value.trim(),
            None => continue,
        };
        match key {
            "action" => rule.action = Some(value.to_owned()),
            "protocol" => rule.protocol = Some(value.to_owned()),
            "source_ip_address" => rule.source_ip_address = Some(value.to_owned()),
            "source_ip_subnet_mask" => rule.source_ip_subnet_mask = Some(value.to_owned()),
            "destination_ip_address" => rule.destination_ip_address = Some(value.to_owned()),
            "destination_ip_subnet_mask" => {
                rule.destination_ip_subnet_mask = Some(value.to_owned())
            }
            "destination_port_range_start" => {
                rule.destination_port_range_start = Some(parse_int(key, value)?)
            }
            "destination_port_range_end" => {
                rule.destination_port_range_end = Some(parse_int(key, value)?)
            }
            "version" => rule.version = Some(parse_int(key, value)?),
            _ => {}
        }
    }
    Ok(rule)
}

fn parse_int(key: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| ErrorKind::RuleFileParse(key.to_owned(), value.to_owned()).into())
}

/// The on-disk rule file for one edit session. The file is removed when this
#[derive(Debug)]
pub struct RuleFile {
    file: NamedTempFile,
}

impl RuleFile {
    pub fn create(rules: &[RuleRecord]) -> Result<RuleFile> {
        let mut file = tempfile::Builder::new()
            .prefix("rules")
            .suffix(".tmp")
            .tempfile()
            .chain_err(|| "failed to create rule file")?;
        file.write_all(render_rule_file(rules).as_bytes())
            .and_then(|_| file.flush())
            .chain_err(|| format!("failed to write rule file: {}", file.path().display()))?;
        debug!("wrote {} rule(s) to {}", rules.len().max(1), file.path().display());
        Ok(RuleFile { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn edit<E: Editor>(&self, editor: &E) -> Result<()> {
        editor.edit(self.path())
    }

    /// Reads the file from its path, since editors commonly replace the file
    /// rather than writing through our handle.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(self.path())
            .chain_err(|| format!("failed to read rule file: {}", self.path().display()))
    }

    pub fn close(self) {
        let path = self.path().to_owned();
        if let Err(e) = self.file.close() {
            warn!("failed to remove rule file {}: {}", path.display(), e);
        }
    }
}
