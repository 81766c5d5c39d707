use crate::cli::Command;
use crate::cloud::Cloud;
use crate::editor::Editor;
use crate::errors::*;
use crate::session::EditSession;
use crate::ui::Ui;

pub fn dispatch<C, F, E, U>(cmd: Command, connect: F, editor: &E, ui: &U) -> Result<()>
where
    C: Cloud,
    F: FnOnce() -> Result<C>,
    E: Editor,
    U: Ui,
{
    debug!("running command: {:?}", cmd);

    match cmd {
        Command::Edit { firewall_id } => {
            let mut session = EditSession::new(firewall_id);
            let result = session.run(connect, editor, ui);
            if let Some(path) = session.rule_path() {
                debug!("{} used rule file {}", firewall_id, path.display());
            }
            debug!("{} finished in state {:?}", firewall_id, session.state());
            result?;
        }
    }

    Ok(())
}
