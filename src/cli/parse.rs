use crate::cli::Command;
use crate::cli::Invocation;
use crate::cloud::FirewallId;
use crate::config::Overrides;
use crate::errors::*;
use clap::App;
use clap::AppSettings;
use clap::Arg;
use clap::SubCommand;
use std::ffi::OsString;
use std::path::PathBuf;

fn define_app<'a, 'b>() -> App<'a, 'b> {
    let edit_command = SubCommand::with_name("edit")
        .about("Edit the rules of a firewall in a text editor and submit them")
        .setting(AppSettings::DeriveDisplayOrder)
        .arg(
            Arg::with_name("firewall")
                .help(
                    "Firewall to edit, as TYPE:ID. Types:\n\
                     * vlan (dedicated firewall)\n\
                     * vs (standard firewall of a virtual server)\n\
                     * server (standard firewall of a hardware server)\n\
                     * multiVlan (managed through the vendor console)\n\
                     ",
                )
                .next_line_help(true)
                .value_name("TYPE:ID")
                .required(true)
                .validator(|s| s.parse::<FirewallId>().map(|_| ()).map_err(|e| e.to_string())),
        );

    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Edit classic infrastructure firewall rules")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::GlobalVersion)
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::DeriveDisplayOrder)
        .arg(
            Arg::with_name("config")
                .help("YAML config file [default: <config dir>/slfw/config.yaml]")
                .long("config")
                .value_name("PATH")
                .env("SLFW_CONFIG")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("username")
                .help("API username")
                .long("username")
                .env("SL_USERNAME")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-key")
                .help("API key")
                .long("api-key")
                .env("SL_API_KEY")
                .hide_env_values(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("endpoint")
                .help("API endpoint URL")
                .long("endpoint")
                .value_name("URL")
                .env("SL_API_ENDPOINT")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log requests and session progress to stderr")
                .short("v")
                .long("verbose"),
        )
        .subcommand(edit_command)
}

pub fn parse_from_safe<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let app = define_app();
    let matches = app.get_matches_from_safe(args)?;

    let overrides = Overrides {
        config_path: matches.value_of_os("config").map(PathBuf::from),
        username: matches.value_of("username").map(str::to_owned),
        api_key: matches.value_of("api-key").map(str::to_owned),
        endpoint: matches.value_of("endpoint").map(str::to_owned),
    };

    let command = if let Some(matches) = matches.subcommand_matches("edit") {
        let firewall_id = matches.value_of("firewall").expect("required").parse()?;
        Command::Edit { firewall_id }
    } else {
        unreachable!()
    };

    Ok(Invocation {
        command,
        overrides,
        verbose: matches.is_present("verbose"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::FirewallType;

    #[test]
    fn test_parse_edit() {
        test_parse(
            &["slfw", "edit", "vlan:123"],
            Command::Edit {
                firewall_id: FirewallId::new(FirewallType::Vlan, 123),
            },
        )
        .unwrap();
        test_parse(
            &["slfw", "edit", "server:9"],
            Command::Edit {
                firewall_id: FirewallId::new(FirewallType::Server, 9),
            },
        )
        .unwrap();
        test_parse(
            &["slfw", "edit", "multiVlan:456789"],
            Command::Edit {
                firewall_id: FirewallId::new(FirewallType::MultiVlan, 456_789),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_parse_overrides() {
        let invocation = parse_from_safe(&[
            "slfw",
            "--config",
            "/tmp/slfw.yaml",
            "--username",
            "user",
            "--api-key",
            "key",
            "--endpoint",
            "https://api.service.softlayer.com/rest/v3.1",
            "-v",
            "edit",
            "vs:1",
        ])
        .unwrap();
        assert_eq!(
            Overrides {
                config_path: Some(PathBuf::from("/tmp/slfw.yaml")),
                username: Some("user".to_owned()),
                api_key: Some("key".to_owned()),
                endpoint: Some("https://api.service.softlayer.com/rest/v3.1".to_owned()),
            },
            invocation.overrides
        );
        assert!(invocation.verbose);
    }

    #[test]
    fn test_parse_rejects_bad_identifiers() {
        for id in &["gateway:1", "vlan", "vlan:abc", "vlan:0"] {
            let err = parse_from_safe(&["slfw", "edit", *id]).unwrap_err();
            match *err.kind() {
                ErrorKind::Clap(ref e) => {
                    assert_eq!(clap::ErrorKind::ValueValidation, e.kind, "{}", id)
                }
                ref other => panic!("{}: unexpected error: {}", id, other),
            }
        }
    }

    #[test]
    fn test_parse_requires_exactly_one_identifier() {
        assert!(parse_from_safe(&["slfw", "edit"]).is_err());
        assert!(parse_from_safe(&["slfw", "edit", "vlan:1", "vlan:2"]).is_err());
        assert!(parse_from_safe(&["slfw"]).is_err());
    }

    fn test_parse(args: &[&str], cmd: Command) -> Result<()> {
        let invocation = parse_from_safe(args)?;
        assert_eq!(cmd, invocation.command);
        Ok(())
    }
}
