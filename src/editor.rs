use crate::errors::*;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_EDITOR: &str = "nano";

pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEditor {
    program: String,
    args: Vec<String>,
}

impl ProcessEditor {
    pub fn new(command: &str) -> Result<ProcessEditor> {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = words
            .next()
            .ok_or_else(|| ErrorKind::Editor("editor command is empty".to_owned()))?;
        Ok(ProcessEditor {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Editor for ProcessEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        debug!("launching editor: {} {:?} {}", self.program, self.args, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .chain_err(|| ErrorKind::Editor(format!("failed to launch editor: {}", self.program)))?;
        if !status.success() {
            bail!(ErrorKind::Editor(format!(
                "editor {} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Builds the editor only when a file is actually handed over, so runs that
/// never open an editor never read the config.
pub struct LazyEditor<F> {
    resolve: F,
}

impl<F> LazyEditor<F>
where
    F: Fn() -> Result<ProcessEditor>,
{
    pub fn new(resolve: F) -> LazyEditor<F> {
        LazyEditor { resolve }
    }
}

impl<F> Editor for LazyEditor<F>
where
    F: Fn() -> Result<ProcessEditor>,
{
    fn edit(&self, path: &Path) -> Result<()> {
        let editor = (self.resolve)()?;
        debug!("using editor {}", editor.program());
        editor.edit(path)
    }
}
