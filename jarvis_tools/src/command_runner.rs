use std::process::Stdio;

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// The platform's "open this with the default application" command.
#[must_use]
pub fn open_command(target: &str) -> CommandSpec {
    if cfg!(target_os = "windows") {
        // `start` treats the first quoted argument as a window title.
        CommandSpec::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(target)
    } else if cfg!(target_os = "macos") {
        CommandSpec::new("open").arg(target)
    } else {
        CommandSpec::new("xdg-open").arg(target)
    }
}

#[must_use]
pub fn build_command(spec: &CommandSpec) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}
