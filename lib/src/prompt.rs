//! Asking the user for what the command line did not supply.

use super::*;

/// The interactive input and output used by the library.
///
/// The console implementation lives with the command line, tests script the answers.
pub trait Prompter {
    /// Show the prompt and read a line of input without the line ending.
    ///
    /// # Arguments
    ///
    /// * `prompt` is shown before reading.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    /// Show the prompt and read a line of input without echoing it.
    ///
    /// # Arguments
    ///
    /// * `prompt` is shown before reading.
    fn read_password(&mut self, prompt: &str) -> Result<String>;
    /// Show a message.
    ///
    /// # Arguments
    ///
    /// * `message` is shown on a line by itself.
    fn show(&mut self, message: &str) -> Result<()>;
}

/// Read a value unless it is already known.
///
/// # Arguments
///
/// * `value` is the value if it was supplied.
/// * `prompt` is shown when the value has to be read.
/// * `prompter` reads the value.
pub fn value_or_prompt(value: Option<String>, prompt: &str, prompter: &mut dyn Prompter) -> Result<String> {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => Ok(value),
        None => prompter.read_line(prompt),
    }
}

/// Read a password unless it is already known.
///
/// # Arguments
///
/// * `value` is the password if it was supplied.
/// * `prompt` is shown when the password has to be read.
/// * `prompter` reads the password.
pub fn password_or_prompt(value: Option<String>, prompt: &str, prompter: &mut dyn Prompter) -> Result<String> {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => Ok(value),
        None => prompter.read_password(prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn prompting() {
        let mut prompter = ScriptedPrompter::new(&["admin", "secret"]);
        assert_eq!(value_or_prompt(Some("root".to_string()), "User: ", &mut prompter).unwrap(), "root");
        assert!(prompter.prompts.is_empty());
        assert_eq!(value_or_prompt(Some(String::new()), "User: ", &mut prompter).unwrap(), "admin");
        assert_eq!(password_or_prompt(None, "Password: ", &mut prompter).unwrap(), "secret");
        assert_eq!(prompter.prompts, vec!["User: ", "Password: "]);
        assert!(value_or_prompt(None, "Backup: ", &mut prompter).is_err());
    }
}
