use crate::errors::*;
use std::io;
use std::io::BufRead;
use std::io::Write;

pub trait Ui {
    fn print(&self, text: &str);
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

pub struct TerminalUi;

impl Ui for TerminalUi {
    fn print(&self, text: &str) {
        println!("{}", text);
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{} [y/N] ", prompt)?;
        out.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// `y` or `yes` in any case. EOF and everything else decline.
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        for answer in &["y\n", "Y", " yes ", "YES\r\n"] {
            assert!(is_yes(answer), "{:?}", answer);
        }
        for answer in &["", "\n", "n", "no", "yep", "ye s"] {
            assert!(!is_yes(answer), "{:?}", answer);
        }
    }
}
