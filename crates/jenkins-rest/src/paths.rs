//! URL path templating for folders and jobs

/// Turns `a/b` into `/job/a/job/b`, percent-encoding each segment.
pub(crate) fn encode_job_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("/job/{}", urlencoding::encode(segment)))
        .collect()
}

/// Path of a folder, empty for the Jenkins root.
pub(crate) fn folder_path(folder: Option<&str>) -> String {
    folder.map(encode_job_path).unwrap_or_default()
}

/// Path of a job, optionally nested in a folder.
pub(crate) fn job_path(folder: Option<&str>, job: &str) -> String {
    format!("{}{}", folder_path(folder), encode_job_path(job))
}
