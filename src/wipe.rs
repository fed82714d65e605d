//! Secure deletion of plaintext env files.

use crate::config::wipe_params;
use crate::error::Result;
use rand::RngCore;
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Overwrite a file's contents and remove it.
///
/// Runs random overwrite passes followed by a zero pass, syncing after each
/// pass, then truncates and unlinks the file. Empty files are just removed.
pub fn secure_delete(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)?;
    let size = metadata.len() as usize;

    if size > 0 {
        let mut file = OpenOptions::new().write(true).open(path)?;

        let mut rng = rand::thread_rng();
        let mut random_data = vec![0u8; size];

        for _ in 0..wipe_params::RANDOM_PASSES {
            rng.fill_bytes(&mut random_data);
            file.seek(SeekFrom::Start(0))?;
            file.write_all(&random_data)?;
            file.sync_all()?;
        }

        let zero_data = vec![0u8; size];
        for _ in 0..wipe_params::ZERO_PASSES {
            file.seek(SeekFrom::Start(0))?;
            file.write_all(&zero_data)?;
            file.sync_all()?;
        }

        file.set_len(0)?;
        file.sync_all()?;
    }

    std::fs::remove_file(path)?;
    Ok(())
}
