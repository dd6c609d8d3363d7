use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::{CorrectorError, CorrectorType, TextCorrector};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Corrector backed by an external program.
///
/// The text is written to the program's stdin and its stdout, minus the
/// trailing newline, is taken as the corrected text.
pub struct CommandCorrector {
    binary_path: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    name: String,
}

impl CommandCorrector {
    pub fn new(binary_path: PathBuf) -> Self {
        let name = binary_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| binary_path.display().to_string());
        Self {
            binary_path,
            args: Vec::new(),
            timeout: None,
            name,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, CorrectorError> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CorrectorError::Timeout(timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl TextCorrector for CommandCorrector {
    fn name(&self) -> &str {
        &self.name
    }

    fn corrector_type(&self) -> CorrectorType {
        CorrectorType::Command
    }

    fn is_available(&self) -> bool {
        if self.binary_path.components().count() > 1 {
            return self.binary_path.is_file();
        }
        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join(&self.binary_path).is_file())
            })
            .unwrap_or(false)
    }

    fn correct(&self, text: &str) -> Result<String, CorrectorError> {
        let start = Instant::now();

        debug!(
            binary = %self.binary_path.display(),
            args = ?self.args,
            timeout = ?self.timeout,
            "Spawning corrector process"
        );

        let mut child = Command::new(&self.binary_path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CorrectorError::ExecutionFailed("stdin not captured".into()))?;
        let input = text.to_string();
        // Written from a thread so a program that answers before draining
        // its input cannot deadlock us.
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = self.wait(&mut child)?;

        match writer.join() {
            Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(_) => {
                return Err(CorrectorError::ExecutionFailed(
                    "stdin writer panicked".into(),
                ))
            }
            _ => {}
        }
        let stdout = join_reader(stdout_reader)?;
        let stderr = join_reader(stderr_reader)?;
        trace!(stderr = %stderr, "Corrector stderr");

        debug!(
            exit_code = status.code().unwrap_or(-1),
            duration_ms = start.elapsed().as_millis(),
            "Corrector process completed"
        );

        if !status.success() {
            return Err(CorrectorError::ExecutionFailed(format!(
                "{} exited with code {}: {}",
                self.name,
                status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut source) = source {
            source.read_to_string(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: JoinHandle<io::Result<String>>) -> Result<String, CorrectorError> {
    handle
        .join()
        .map_err(|_| CorrectorError::ExecutionFailed("output reader panicked".into()))?
        .map_err(CorrectorError::from)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> CommandCorrector {
        CommandCorrector::new(PathBuf::from("sh")).with_args(vec!["-c".into(), script.into()])
    }

    #[test]
    fn test_returns_program_stdout() {
        let corrector = shell("tr a-z A-Z");
        assert_eq!(corrector.correct("hello there").unwrap(), "HELLO THERE");
    }

    #[test]
    fn test_trims_trailing_newline() {
        let corrector = shell("cat; echo");
        assert_eq!(corrector.correct("fixed text").unwrap(), "fixed text");
    }

    #[test]
    fn test_nonzero_exit_is_error() {
        let corrector = shell("echo broken >&2; exit 3");
        match corrector.correct("text") {
            Err(CorrectorError::ExecutionFailed(msg)) => {
                assert!(msg.contains("code 3"));
                assert!(msg.contains("broken"));
            }
            other => panic!("expected execution failure, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_kills_process() {
        let corrector = shell("sleep 5").with_timeout(Duration::from_millis(100));
        let start = Instant::now();
        let result = corrector.correct("text");
        assert!(matches!(result, Err(CorrectorError::Timeout(_))));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_binary_fails_to_spawn() {
        let corrector = CommandCorrector::new(PathBuf::from("/nonexistent/rccr-spellfix"));
        assert!(!corrector.is_available());
        assert!(matches!(
            corrector.correct("text"),
            Err(CorrectorError::SpawnFailed(_))
        ));
    }

    #[test]
    fn test_name_is_binary_file_name() {
        let corrector = CommandCorrector::new(PathBuf::from("/usr/bin/spellfix"));
        assert_eq!(corrector.name(), "spellfix");
    }

    #[test]
    fn test_sh_is_available_on_path() {
        assert!(shell("true").is_available());
    }
}
