use crate::error::CaptureError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// What happened to the destination directory during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    /// The directory did not exist and was created
    Created,
    /// The operator agreed to wipe the existing directory; it is now empty
    Cleared,
    /// The operator declined; nothing was touched
    Declined,
}

/// Make sure `dir` exists and is empty before any capture
///
/// An existing directory is only wiped after the operator answers `y` on
/// `input`. The question is written to `prompt`.
pub fn prepare_destination<R, W>(dir: &Path, mut input: R, mut prompt: W) -> Result<DestinationState>
where
    R: BufRead,
    W: Write,
{
    let existed = dir.is_dir();

    if existed {
        writeln!(prompt, "the destination directory does already exist")?;
        writeln!(prompt, "do you want to overwrite the contents? y/n")?;
        prompt.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !answer.starts_with('y') {
            tracing::info!("Keeping existing contents of {}", dir.display());
            return Ok(DestinationState::Declined);
        }

        fs::remove_dir_all(dir).with_context(|| {
            format!("could not clean destination directory \"{}\"", dir.display())
        })?;
    } else if dir.exists() {
        return Err(CaptureError::DestinationNotDirectory(dir.to_path_buf()).into());
    }

    fs::create_dir(dir)
        .with_context(|| format!("could not create destination directory \"{}\"", dir.display()))?;

    tracing::info!("Writing captures to {}", dir.display());

    Ok(if existed {
        DestinationState::Cleared
    } else {
        DestinationState::Created
    })
}
