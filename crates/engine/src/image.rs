// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image resolution: build from a Dockerfile or pull by name.

use chrono::{DateTime, Utc};
use dvbx_adapters::{ContainerRuntime, RuntimeError};
use dvbx_config::ServiceDef;
use dvbx_core::image_tag;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors from resolving an image
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("no Dockerfile found at {}", .0.display())]
    MissingDockerfile(PathBuf),
    #[error("'{0}' has neither an image nor a build directory")]
    NoSource(String),
    #[error("{}", .0.user_message())]
    Runtime(#[from] RuntimeError),
}

/// What resolution had to do to make the image available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Built,
    Pulled,
    Reused,
}

dvbx_core::simple_display! {
    ImageAction {
        Built => "built",
        Pulled => "pulled",
        Reused => "up to date",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolution {
    pub image: String,
    pub action: ImageAction,
    pub elapsed: Duration,
}

/// Make the image for `name` available locally.
///
/// A `build` directory wins over `image`. Relative build directories are
/// taken from `base_dir`. The image is rebuilt when it is missing or its
/// Dockerfile changed after the image was created.
pub async fn resolve_image<R: ContainerRuntime>(
    runtime: &R,
    name: &str,
    def: &ServiceDef,
    base_dir: &Path,
) -> Result<ImageResolution, ImageError> {
    let start = Instant::now();
    let (image, action) = match (&def.build, def.image.as_deref()) {
        (Some(build), _) => build_if_stale(runtime, name, &base_dir.join(build)).await?,
        (None, Some(image)) if !image.trim().is_empty() => {
            if runtime.image_exists(image).await {
                (image.to_string(), ImageAction::Reused)
            } else {
                runtime.pull(image).await?;
                (image.to_string(), ImageAction::Pulled)
            }
        }
        (None, _) => return Err(ImageError::NoSource(name.to_string())),
    };
    let elapsed = start.elapsed();
    tracing::info!(name, image = %image, %action, elapsed_ms = elapsed.as_millis() as u64, "image ready");
    Ok(ImageResolution { image, action, elapsed })
}

async fn build_if_stale<R: ContainerRuntime>(
    runtime: &R,
    name: &str,
    dir: &Path,
) -> Result<(String, ImageAction), ImageError> {
    let dockerfile = dir.join("Dockerfile");
    let modified = match tokio::fs::metadata(&dockerfile).await {
        Ok(meta) if meta.is_file() => meta.modified().ok().map(DateTime::<Utc>::from),
        _ => return Err(ImageError::MissingDockerfile(dockerfile)),
    };
    let tag = image_tag(name);

    let stale = match (runtime.image_created(&tag).await, modified) {
        (None, _) => true,
        (Some(created), Some(modified)) => modified > created,
        (Some(_), None) => false,
    };
    if !stale {
        tracing::debug!(name, tag = %tag, "image newer than Dockerfile");
        return Ok((tag, ImageAction::Reused));
    }

    runtime.build(dir, &dockerfile, &tag).await?;
    Ok((tag, ImageAction::Built))
}

#[cfg(test)]
#[path = "image_tests.rs"]
mod tests;
