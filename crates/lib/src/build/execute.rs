//! Build execution.
//!
//! Reads every source, bundles each target and writes the results under the
//! output directory. All sources are read before the first write so a source
//! disappearing mid-run cannot leave a half-built directory behind.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::build::bundle::{Source, bundler_for, render};
use crate::build::{BuildError, BuildPlan, BuildReport, BuiltOutput, ResolvedTarget};
use crate::util::hash::{hash_bytes, hash_tree};
use crate::util::relative_key;

/// Delete `path` and everything below it, then recreate it empty.
///
/// A missing directory is not an error.
pub async fn clean_output_dir(path: &Path) -> Result<(), BuildError> {
  let clean_err = |source| BuildError::Clean {
    path: path.display().to_string(),
    source,
  };

  match fs::remove_dir_all(path).await {
    Ok(()) => debug!(path = %path.display(), "removed stale output directory"),
    Err(e) if e.kind() == ErrorKind::NotFound => {}
    Err(e) => return Err(clean_err(e)),
  }

  fs::create_dir_all(path).await.map_err(clean_err)
}

/// Write every target in `plan`.
///
/// Returns once all outputs are written and synced to disk. The output
/// directory is expected to exist; see [`clean_output_dir`].
pub async fn execute_plan(plan: &BuildPlan) -> Result<BuildReport, BuildError> {
  let mut staged = Vec::with_capacity(plan.targets.len());
  for target in &plan.targets {
    let sources = read_sources(target, &plan.base_dir).await?;
    staged.push((target, sources));
  }

  let mut outputs = Vec::with_capacity(staged.len());

  for (target, sources) in staged {
    let bundler = bundler_for(target.transform);
    let bytes = render(bundler.as_ref(), target.banner.as_deref(), &sources);

    write_output(&target.output_path, &bytes).await?;

    let hash = hash_bytes(&bytes);
    info!(
      name = %target.name,
      path = %target.output,
      bytes = bytes.len(),
      hash = %hash.short(12),
      "wrote bundle"
    );

    outputs.push(BuiltOutput {
      target: target.name.clone(),
      path: target.output.clone(),
      bytes: bytes.len() as u64,
      sources: sources.len(),
      hash,
    });
  }

  let tree_hash = hash_tree(&plan.output_dir)?;

  Ok(BuildReport {
    output_dir: plan.output_dir.clone(),
    outputs,
    tree_hash,
  })
}

async fn read_sources(target: &ResolvedTarget, base_dir: &Path) -> Result<Vec<Source>, BuildError> {
  let mut sources = Vec::with_capacity(target.sources.len());

  for path in &target.sources {
    let name = relative_key(base_dir, path).unwrap_or_else(|| path.display().to_string());
    let contents = fs::read(path).await.map_err(|source| {
      if source.kind() == ErrorKind::NotFound {
        BuildError::InputNotFound {
          input: name.clone(),
          reason: format!("{} was removed before it could be read", path.display()),
        }
      } else {
        BuildError::ReadInput {
          path: path.display().to_string(),
          source,
        }
      }
    })?;

    debug!(name = %target.name, source = %name, bytes = contents.len(), "read source");
    sources.push(Source::new(name, contents));
  }

  Ok(sources)
}

async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), BuildError> {
  let write_err = |source| BuildError::OutputWrite {
    path: path.display().to_string(),
    source,
  };

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).await.map_err(write_err)?;
  }

  let mut file = fs::File::create(path).await.map_err(write_err)?;
  file.write_all(bytes).await.map_err(write_err)?;
  file.sync_all().await.map_err(write_err)?;

  Ok(())
}
