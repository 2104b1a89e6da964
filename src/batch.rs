use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Config, ConfigError, MaskFile, OnError};
use crate::error::MaskError;
use crate::readers::{DecodedMask, create_reader};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to decode '{name}' ({path:?}): {source}")]
    Mask {
        name: String,
        path: PathBuf,
        #[source]
        source: MaskError,
    },
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub path: PathBuf,
    pub result: Result<DecodedMask, MaskError>,
}

/// Decodes every file of a manifest, one after the other.
#[derive(Debug)]
pub struct BatchDecoder {
    config: Config,
}

impl BatchDecoder {
    pub fn new(config: Config) -> Self {
        BatchDecoder { config }
    }

    /// Under [`OnError::Abort`] the first failure ends the batch. Under
    /// [`OnError::Skip`] failures are kept in their outcome and the batch goes on.
    pub fn process(&self) -> Result<Vec<BatchOutcome>, BatchError> {
        let files = self.config.mask_files()?;
        log::info!("decoding {} mask file(s)", files.len());

        let mut outcomes = Vec::with_capacity(files.len());
        for MaskFile { name, path } in files {
            let result = match create_reader(path.clone()).read_mask() {
                Ok(mask) => {
                    log::info!("decoded '{}' {:?}", name, mask.raster.shape());
                    Ok(mask)
                }
                Err(source) if self.config.on_error() == OnError::Abort => {
                    return Err(BatchError::Mask { name, path, source });
                }
                Err(e) => {
                    log::warn!("skipping '{}': {}", name, e);
                    Err(e)
                }
            };

            outcomes.push(BatchOutcome { name, path, result });
        }

        Ok(outcomes)
    }
}
