//! Job lifecycle scenarios exercised through the public API

use aces_jobs::{CreateJob, JobData, JobError, JobManager, JobStatus};
use serde_json::json;

fn manager() -> (tempfile::TempDir, JobManager) {
    let root = tempfile::tempdir().unwrap();
    let mgr = JobManager::new(root.path());
    (root, mgr)
}

#[test]
fn create_then_run_lifecycle() {
    let (_root, mut mgr) = manager();

    let (id, path) = mgr.create_job(CreateJob::new()).unwrap();
    assert_eq!(mgr.job_status(id).unwrap(), JobStatus::New);
    assert!(path.is_dir());

    mgr.set_job_status(id, JobStatus::Running).unwrap();
    assert_eq!(mgr.job_status(id).unwrap(), JobStatus::Running);

    mgr.set_job_status(id, JobStatus::Complete).unwrap();

    // Re-edit after a run is a legal transition
    mgr.set_job_status(id, JobStatus::Modified).unwrap();
    assert_eq!(mgr.job_status(id).unwrap(), JobStatus::Modified);
}

#[test]
fn status_strings_cross_the_parse_boundary() {
    let (_root, mut mgr) = manager();
    let (id, _) = mgr.create_job(CreateJob::new()).unwrap();

    let status: JobStatus = "RUNNING".parse().unwrap();
    mgr.update_job(id, status, None).unwrap();
    assert_eq!(mgr.job_status(id).unwrap().to_string(), "RUNNING");

    let bogus = "BOGUS".parse::<JobStatus>();
    assert!(matches!(bogus, Err(JobError::InvalidStatus(_))));
    assert_eq!(mgr.job_status(id).unwrap(), JobStatus::Running);
}

#[test]
fn clone_chain_preserves_data_and_status() {
    let (_root, mut mgr) = manager();

    let mut data = JobData::new();
    data.add_input("P_T", json!(14.7));
    data.add_custom("model", json!({"id": "frame7"}));
    let (original, _) = mgr
        .create_job(CreateJob::new().with_status(JobStatus::Error).with_data(data))
        .unwrap();

    let (first, _) = mgr.clone_job(original).unwrap();
    let (second, _) = mgr.clone_job(first).unwrap();

    assert_eq!(mgr.count(), 3);
    assert_eq!(mgr.job_status(second).unwrap(), JobStatus::Error);
    assert_eq!(mgr.job_data(second).unwrap(), mgr.job_data(original).unwrap());

    // Each job has a distinct directory
    let paths: std::collections::HashSet<_> = [original, first, second]
        .iter()
        .map(|id| mgr.job_path(*id).unwrap().to_path_buf())
        .collect();
    assert_eq!(paths.len(), 3);
}

#[test]
fn stale_directory_is_recreated_not_fatal() {
    let (_root, mut mgr) = manager();

    let (id, path) = mgr.create_job(CreateJob::new()).unwrap();
    std::fs::write(path.join("solver.out"), "stale results").unwrap();
    mgr.delete_job(id).unwrap();

    // Simulate a leftover from an interrupted session
    std::fs::create_dir_all(&path).unwrap();
    std::fs::write(path.join("solver.out"), "stale results").unwrap();

    let (recreated, new_path) = mgr.create_job(CreateJob::new().with_id(id)).unwrap();
    assert_eq!(recreated, id);
    assert_eq!(new_path, path);
    assert!(!new_path.join("solver.out").exists());
}

#[test]
fn delete_all_jobs_clears_registry_and_disk() {
    let (root, mut mgr) = manager();
    for i in 0..4 {
        let mut data = JobData::new();
        data.add_custom("model", json!({"id": format!("m-{i}")}));
        mgr.create_job(CreateJob::new().with_data(data)).unwrap();
    }
    assert_eq!(mgr.count(), 4);

    mgr.delete_all_jobs().unwrap();
    assert_eq!(mgr.count(), 0);
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn queries_on_unknown_ids_fail_except_has_job() {
    let (_root, mgr) = manager();
    let ghost = aces_jobs::JobId::new();

    assert!(!mgr.has_job(ghost));
    assert!(matches!(mgr.job_path(ghost), Err(JobError::UnknownJob(_))));
    assert!(matches!(mgr.job_status(ghost), Err(JobError::UnknownJob(_))));
    assert!(matches!(mgr.job_data(ghost), Err(JobError::UnknownJob(_))));
}
