use std::error::Error;
use std::path::Path;

use syscmd::batch::BatchMaterializer;
use syscmd::engine::{ExecutionReporter, RunStatus};
use syscmd::exec::ShellBackend;
use syscmd::identity::PLACEHOLDER_IDENTITY;
use syscmd::sink::Severity;
use syscmd::task::SysCommandTask;
use syscmd_test_utils::{
    FailingBackend, FailingResolver, FixedResolver, PanickingBackend, PanickingResolver,
    RecordingSink, entry_count, init_tracing,
};

type TestResult = Result<(), Box<dyn Error>>;

fn task_in(dir: &Path, script: &str) -> SysCommandTask {
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir))
        .with_identity(FixedResolver("test-host".into()));
    SysCommandTask::new()
        .with_reporter(reporter)
        .with_script(script)
}

#[cfg(unix)]
#[test]
fn echo_hello_succeeds_and_cleans_up() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut sink = RecordingSink::new();

    let result = task_in(dir.path(), "echo hello").execute(&mut sink);

    assert_eq!(result.status, RunStatus::Success);
    assert!(result.stdout.contains("hello"));
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(sink.texts(Severity::Normal), vec!["hello\n".to_string()]);
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn empty_script_is_a_successful_no_op() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut sink = RecordingSink::new();

    let result = task_in(dir.path(), "").execute(&mut sink);

    assert_eq!(result.status, RunStatus::Success);
    assert_eq!(result.stdout, "");
    assert_eq!(
        sink.severities(),
        vec![Severity::Note, Severity::Normal, Severity::Note]
    );
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn failing_command_still_reports_success() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut sink = RecordingSink::new();

    let result = task_in(dir.path(), "echo before\nfalse\necho after\n").execute(&mut sink);

    assert_eq!(result.status, RunStatus::Success);
    assert_eq!(result.stdout, "before\nafter\n");
    Ok(())
}

#[test]
fn missing_artifact_dir_reports_materialization_error() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("gone");
    let mut sink = RecordingSink::new();

    let status = task_in(&missing, "echo hello").run(&mut sink);

    assert_eq!(status, RunStatus::Error);
    let errors = sink.texts(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("ERROR: Could not run commands\n"));
    assert!(errors[0].contains("could not create batch file"));
    assert_eq!(entry_count(dir.path()), 0);

    // The closing note is written on failure too.
    let notes = sink.texts(Severity::Note);
    assert!(notes[1].contains("Real time: "));
    Ok(())
}

#[cfg(unix)]
#[test]
fn read_only_artifact_dir_reports_materialization_error() -> TestResult {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    init_tracing();
    let dir = tempfile::tempdir()?;
    let locked = dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::set_permissions(&locked, Permissions::from_mode(0o500))?;

    // Privileged users ignore directory permissions; nothing to check then.
    if fs::write(locked.join("writable-check"), b"").is_ok() {
        fs::remove_file(locked.join("writable-check"))?;
        fs::set_permissions(&locked, Permissions::from_mode(0o700))?;
        return Ok(());
    }

    let mut sink = RecordingSink::new();
    let status = task_in(&locked, "echo hello").run(&mut sink);
    let left = entry_count(&locked);
    fs::set_permissions(&locked, Permissions::from_mode(0o700))?;

    assert_eq!(status, RunStatus::Error);
    let errors = sink.texts(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("could not create batch file"));
    assert_eq!(left, 0);
    Ok(())
}

#[test]
fn launch_failure_is_contained_and_artifact_removed() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let backend = FailingBackend::new();
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir.path()))
        .with_backend(backend.clone());
    let task = SysCommandTask::new()
        .with_reporter(reporter)
        .with_script("echo hello");
    let mut sink = RecordingSink::new();

    let result = task.execute(&mut sink);

    assert_eq!(result.status, RunStatus::Error);
    assert!(result.error.as_deref().unwrap_or_default().contains("launch refused"));
    assert_eq!(backend.seen().len(), 1);
    assert!(!backend.seen()[0].exists());
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn missing_interpreter_is_reported_as_error() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir.path()))
        .with_backend(ShellBackend::new().with_interpreter("/nonexistent/syscmd-shell"));
    let task = SysCommandTask::new().with_reporter(reporter);
    let mut sink = RecordingSink::new();

    assert_eq!(task.run(&mut sink), RunStatus::Error);
    assert!(sink.joined().contains("could not launch"));
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[test]
fn panicking_backend_never_escapes_run() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir.path()))
        .with_backend(PanickingBackend);
    let task = SysCommandTask::new().with_reporter(reporter);
    let mut sink = RecordingSink::new();

    assert_eq!(task.run(&mut sink), RunStatus::Error);
    assert!(sink.texts(Severity::Error)[0].contains("simulated backend crash"));
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[test]
fn identity_failure_falls_back_to_placeholder() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir.path()))
        .with_backend(FailingBackend::new())
        .with_identity(FailingResolver);
    let task = SysCommandTask::new().with_reporter(reporter);
    let mut sink = RecordingSink::new();

    let result = task.execute(&mut sink);

    assert_eq!(result.machine, PLACEHOLDER_IDENTITY);
    assert_eq!(
        sink.texts(Severity::Note)[0],
        format!("NOTE: Running system commands on {PLACEHOLDER_IDENTITY}.\nOutput:")
    );
    // Only the launch failure is an error line; the identity failure is silent.
    assert_eq!(sink.texts(Severity::Error).len(), 1);
    assert_eq!(result.status, RunStatus::Error);
    Ok(())
}

#[test]
fn panicking_identity_lookup_uses_placeholder() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let reporter = ExecutionReporter::new()
        .with_materializer(BatchMaterializer::new().with_dir(dir.path()))
        .with_backend(FailingBackend::new())
        .with_identity(PanickingResolver);
    let task = SysCommandTask::new().with_reporter(reporter);
    let mut sink = RecordingSink::new();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        task.execute(&mut sink)
    }));
    let result = outcome.map_err(|_| "run let a panic escape")?;

    assert_eq!(result.status, RunStatus::Error);
    assert_eq!(result.machine, PLACEHOLDER_IDENTITY);
    assert!(sink.texts(Severity::Note)[0].contains(PLACEHOLDER_IDENTITY));
    assert_eq!(sink.texts(Severity::Note).len(), 2);
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn concurrent_runs_share_one_task() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let task = task_in(dir.path(), "echo hello");

    let statuses: Vec<RunStatus> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut sink = RecordingSink::new();
                    task.run(&mut sink)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(statuses.iter().all(|s| s.is_success()));
    assert_eq!(entry_count(dir.path()), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn sequential_runs_do_not_leak_artifacts() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let task = task_in(dir.path(), "echo again");

    for _ in 0..5 {
        let mut sink = RecordingSink::new();
        assert!(task.run(&mut sink).is_success());
        assert_eq!(entry_count(dir.path()), 0);
    }
    Ok(())
}
