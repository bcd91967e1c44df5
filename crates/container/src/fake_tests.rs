use super::*;
use std::path::PathBuf;

fn build_spec(image_name: &str) -> BuildSpec {
    BuildSpec {
        context_dir: PathBuf::from("/repo/starter"),
        dockerfile: PathBuf::from("Dockerfile"),
        image_name: image_name.to_string(),
    }
}

fn run_spec(image_name: &str, container_name: &str) -> RunSpec {
    RunSpec {
        image_name: image_name.to_string(),
        container_name: container_name.to_string(),
        report_mount_path: PathBuf::from("/tmp/report"),
        stage_env_value: "0".to_string(),
        timeout: std::time::Duration::from_secs(5),
    }
}

#[tokio::test]
async fn records_calls_in_order() {
    let driver = FakeDriver::new();
    driver.build(&build_spec("image-a")).await.expect("build");
    driver.run_and_wait(&run_spec("image-a", "container-a")).await.expect("run");
    driver.cleanup("image-a", "container-a", Path::new("/tmp/job-a")).await;

    let calls = driver.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[0], DriverCall::Build { image_name } if image_name == "image-a"));
    assert!(matches!(&calls[1], DriverCall::RunAndWait { .. }));
    assert!(matches!(&calls[2], DriverCall::Cleanup { .. }));
}

#[tokio::test]
async fn scripted_build_error_is_returned_once() {
    let driver = FakeDriver::new();
    driver.set_build_error("base image not found", "step 1/3 ...\n");
    let err = driver.build(&build_spec("image-a")).await.unwrap_err();
    assert!(matches!(err, DriverError::Build { message, log } if message == "base image not found" && log == "step 1/3 ...\n"));

    // Second call is unscripted, so it succeeds.
    driver.build(&build_spec("image-a")).await.expect("build");
}

#[tokio::test]
async fn scripted_run_outcome_reports_timeout() {
    let driver = FakeDriver::new();
    driver.set_run_outcome(Ok(RunOutcome { logs: "partial".to_string(), timed_out: true }));
    let outcome = driver.run_and_wait(&run_spec("image-a", "container-a")).await.expect("run");
    assert!(outcome.timed_out);
    assert_eq!(outcome.logs, "partial");
}
