#![forbid(unsafe_code)]

#[cfg(unix)]
mod unix {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::process::{Child, Command, Output, Stdio};
    use std::thread::sleep;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    #[test]
    fn sigint_stops_monitoring_gracefully() -> io::Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        let log_path = dir.path().join("watch.log");
        write_config(&config_path, &log_path)?;

        let mut target = Command::new("sleep").arg("30").spawn()?;
        let observer = watch(&config_path, target.id(), &[])?;

        sleep(Duration::from_millis(1500));
        kill(Pid::from_raw(observer.id() as i32), Signal::SIGINT).ok();
        let output = wait_for_output(observer)?;

        target.kill()?;
        target.wait()?;

        assert!(output.status.success(), "{output:?}");
        let log = fs::read_to_string(&log_path)?;
        assert!(log.contains(&format!("Process Created: sleep (PID {})", target.id())));
        assert!(log.contains("Memory Usage: VmSize = "));
        assert!(log.trim_end().ends_with("Monitoring Stopped: interrupted by operator"));
        assert!(!log.contains("Process Terminated"));

        Ok(())
    }

    #[test]
    fn exit_of_target_ends_the_run() -> io::Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        let log_path = dir.path().join("watch.log");
        write_config(&config_path, &log_path)?;

        let mut target = Command::new("sleep").arg("2").spawn()?;
        let observer = watch(&config_path, target.id(), &[])?;
        let output = wait_for_output(observer)?;
        target.wait()?;

        assert!(output.status.success(), "{output:?}");
        let log = fs::read_to_string(&log_path)?;
        assert_eq!(log.matches("Process Terminated: sleep").count(), 1);
        assert!(log.contains("Memory Freed: "));

        Ok(())
    }

    #[test]
    fn log_bound_stops_with_failure_status() -> io::Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        let log_path = dir.path().join("watch.log");
        write_config(&config_path, &log_path)?;

        let mut target = Command::new("sleep").arg("30").spawn()?;
        let observer = watch(&config_path, target.id(), &["--max-log-bytes", "1"])?;
        let output = wait_for_output(observer)?;

        target.kill()?;
        target.wait()?;

        assert_eq!(output.status.code(), Some(2), "{output:?}");
        let log = fs::read_to_string(&log_path)?;
        assert!(log.contains("Log Size Limit Exceeded: "));
        assert!(!log.contains("Process Terminated"));

        Ok(())
    }

    fn watch(config: &Path, pid: u32, extra: &[&str]) -> io::Result<Child> {
        Command::new(env!("CARGO_BIN_EXE_procwatch"))
            .arg("--config")
            .arg(config)
            .arg("watch")
            .arg("--pid")
            .arg(pid.to_string())
            .args(extra)
            .env("PROCWATCH_LOG", "info")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }

    fn write_config(path: &Path, log: &Path) -> io::Result<()> {
        let contents = format!(
            "[target]\nnames = [\"sleep\"]\n\n\
[monitor]\n\
interval = 1\n\n\
[log]\n\
path = {:?}\n",
            log.display().to_string()
        );
        fs::write(path, contents)
    }

    fn wait_for_output(mut child: Child) -> io::Result<Output> {
        let start = Instant::now();
        loop {
            if child.try_wait()?.is_some() {
                break;
            }
            if start.elapsed() > Duration::from_secs(10) {
                let _ = child.kill();
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "procwatch did not exit",
                ));
            }
            sleep(Duration::from_millis(50));
        }
        child.wait_with_output()
    }
}

#[cfg(not(unix))]
#[test]
fn sigint_stops_monitoring_gracefully() {
    // Signals are only supported in the Unix build.
}
