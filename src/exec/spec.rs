// src/exec/spec.rs

use std::fmt;
use std::path::Path;

use crate::errors::ExecError;

/// Program path plus arguments, in argv order.
///
/// Element 0 must be an absolute path: there is no `PATH` lookup and no
/// shell interpretation. Construction never fails; [`CommandSpec::validate`]
/// is run by the executors so that a bad spec becomes a failure outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    /// Start a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            argv: vec![program.into()],
        }
    }

    /// Build a spec from a full argv (program first).
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program path, if the spec is non-empty.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the program path.
    pub fn arguments(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Check the preconditions the executors rely on.
    pub fn validate(&self) -> Result<&str, ExecError> {
        let program = self
            .program()
            .ok_or_else(|| ExecError::InvalidCommand("empty argv".to_string()))?;

        if program.is_empty() {
            return Err(ExecError::InvalidCommand(
                "program path is empty".to_string(),
            ));
        }

        if !Path::new(program).is_absolute() {
            return Err(ExecError::InvalidCommand(format!(
                "program path '{program}' is not absolute"
            )));
        }

        if let Some(pos) = self.argv.iter().position(|a| a.contains('\0')) {
            return Err(ExecError::InvalidCommand(format!(
                "argv[{pos}] contains a NUL byte"
            )));
        }

        Ok(program)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_argv_order() {
        let spec = CommandSpec::new("/bin/echo").arg("a").args(["b", "c"]);
        assert_eq!(spec.argv(), ["/bin/echo", "a", "b", "c"]);
        assert_eq!(spec.program(), Some("/bin/echo"));
        assert_eq!(spec.arguments(), ["a", "b", "c"]);
        assert_eq!(spec.to_string(), "/bin/echo a b c");
    }

    #[test]
    fn empty_spec_is_invalid() {
        let spec = CommandSpec::from_argv(Vec::<String>::new());
        assert!(spec.arguments().is_empty());
        assert!(matches!(spec.validate(), Err(ExecError::InvalidCommand(_))));
    }

    #[test]
    fn relative_program_is_invalid() {
        let spec = CommandSpec::from_argv(["echo", "hi"]);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("not absolute"));
    }

    #[test]
    fn nul_byte_in_any_argument_is_invalid() {
        let spec = CommandSpec::new("/bin/echo").args(["ok", "a\0b"]);
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, ExecError::InvalidCommand(_)));
        assert!(err.to_string().contains("argv[2]"));

        let spec = CommandSpec::new("/bin/ec\0ho");
        assert!(matches!(spec.validate(), Err(ExecError::InvalidCommand(_))));
    }

    #[test]
    fn absolute_program_is_valid() {
        let spec = CommandSpec::from_argv(["/bin/sh", "-c", "true"]);
        assert_eq!(spec.validate().unwrap(), "/bin/sh");
    }
}
