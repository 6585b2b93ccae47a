//! [`ScriptedRunner`]: a command runner that never launches a process.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::Path;

use envboot_python::{CommandOutput, CommandRunner, CommandSpec};

type Matcher = Box<dyn Fn(&CommandSpec) -> bool>;

/// Fake runner with scripted responses and a call log.
///
/// Rules are checked in the order they were added; the first matching rule
/// wins. Commands with no matching rule succeed with empty output. When a
/// `-m venv <dir>` command succeeds, the runner creates `<dir>` with a
/// `pyvenv.cfg` so that callers can observe the environment on disk.
///
/// ```rust,no_run
/// use envboot_test_utils::ScriptedRunner;
///
/// let runner = ScriptedRunner::new()
///     .with_python("python3", "Python 3.12.4")
///     .fail_when_arg("-c", 1, "ModuleNotFoundError: No module named 'bs4'");
/// ```
pub struct ScriptedRunner {
    rules: Vec<(Matcher, CommandOutput)>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    /// A runner with no interpreters: `--version` probes fail to launch
    /// until [`ScriptedRunner::with_python`] adds one. Everything else succeeds.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make `program --version` answer with `banner`.
    pub fn with_python(self, program: &str, banner: &str) -> Self {
        let program = program.to_string();
        self.respond_when(
            move |spec| spec.program == program && spec.args == ["--version"],
            CommandOutput::ok(format!("{}\n", banner)),
        )
    }

    /// Fail any command whose arguments contain `arg`.
    pub fn fail_when_arg(self, arg: &str, code: i32, stderr: &str) -> Self {
        let arg = arg.to_string();
        self.respond_when(
            move |spec| spec.args.iter().any(|a| *a == arg),
            CommandOutput::failed(code, stderr),
        )
    }

    /// Answer with `output` whenever `matcher` accepts the command.
    pub fn respond_when(
        mut self,
        matcher: impl Fn(&CommandSpec) -> bool + 'static,
        output: CommandOutput,
    ) -> Self {
        self.rules.push((Box::new(matcher), output));
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Calls rendered as shell-like strings.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Whether any recorded call contains all of `args`, in any order.
    pub fn ran_with(&self, args: &[&str]) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| args.iter().all(|a| call.args.iter().any(|c| c == a)))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());

        let scripted = self
            .rules
            .iter()
            .find(|(matcher, _)| matcher(spec))
            .map(|(_, output)| output);

        let output = match scripted {
            Some(output) => output.clone(),
            None if spec.args == ["--version"] => {
                return Err(std::io::Error::from(ErrorKind::NotFound));
            }
            None => CommandOutput::ok(""),
        };

        if output.success() {
            materialize_venv(spec)?;
        }
        Ok(output)
    }
}

fn materialize_venv(spec: &CommandSpec) -> std::io::Result<()> {
    let Some(pos) = spec.args.windows(2).position(|w| w[0] == "-m" && w[1] == "venv") else {
        return Ok(());
    };
    let Some(dir) = spec.args.get(pos + 2) else {
        return Ok(());
    };

    let dir = Path::new(dir);
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("pyvenv.cfg"), "home = /usr/bin\n")
}
