use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Pipe `data` into the clipboard command: `command` if given, else the platform default.
pub(crate) fn send_to_clipboard(data: &[u8], command: Option<&[String]>) -> anyhow::Result<()> {
    let mut cmd = match command {
        Some([program, args @ ..]) => {
            let mut cmd = Command::new(program);
            cmd.args(args);
            cmd
        }
        _ => clipboard_cmd(),
    };
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start the clipboard command (`{program}`)"))?;
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(data)
            .with_context(|| format!("failed to write to the clipboard command (`{program}`)")),
        None => Err(anyhow::anyhow!("the clipboard command has no stdin")),
    };
    if let Err(err) = written {
        // Reap the child so it isn't left behind as a zombie.
        let _ = child.kill();
        let _ = child.wait();
        return Err(err);
    }
    let exit_status = child
        .wait()
        .with_context(|| format!("failed to wait for the clipboard command (`{program}`)"))?;
    if exit_status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "the clipboard command (`{program}`) exited with {exit_status}"
        ))
    }
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn custom_command_receives_data() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clip");
        let command = [
            "sh".to_owned(),
            "-c".to_owned(),
            format!("cat > '{}'", out.display()),
        ];
        send_to_clipboard(b"Xy7!", Some(&command[..])).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "Xy7!");
    }

    #[test]
    fn failing_command_is_an_error() {
        let command = ["false".to_owned()];
        assert!(send_to_clipboard(b"", Some(&command[..])).is_err());
    }

    #[test]
    fn command_that_stops_reading_is_an_error() {
        // More than a pipe buffer's worth, so the write fails once the command has exited.
        let data = vec![b'x'; 1 << 20];
        let command = ["sh".to_owned(), "-c".to_owned(), "exit 0".to_owned()];
        let err = send_to_clipboard(&data, Some(&command[..])).unwrap_err();
        assert!(err.to_string().contains("failed to write"), "{err:#}");
    }
}
