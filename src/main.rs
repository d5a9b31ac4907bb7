use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tabdecoder::{DecoderSettings, TabDecoder, TabError};

mod config;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tabdecoder=info"))
        .init();

    // args
    let args = CliArgs::parse();
    let tab_file_path = PathBuf::from(&args.tab_file_path);

    // check if tab file exists
    if !tab_file_path.exists() {
        let err = ConfigError(format!("Tab file not found {tab_file_path:?}"));
        return Err(err);
    }

    // read local config, command line wins
    let local_config = Config::read_config()?;
    let settings = args.merge_into(local_config.decoder_settings());
    log::info!(
        "Decoding {tab_file_path:?} with {} strings ({} divisions, {} time signature)",
        settings.string_count,
        settings.divisions,
        settings.time_signature
    );

    let data = read_tab_file(&tab_file_path)?;
    let decoder = TabDecoder::from_settings(settings);
    let tablature = decoder.decode_bytes(&data).map_err(TabError::from)?;

    if args.json {
        let json = serde_json::to_string_pretty(&tablature)
            .map_err(|err| AppError::OtherError(format!("Could not serialize tablature {err}")))?;
        println!("{json}");
    } else {
        print!("{tablature}");
    }
    Ok(())
}

/// The file handle is released when leaving scope, on success or failure.
fn read_tab_file(path: &Path) -> Result<Vec<u8>, AppError> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    log::debug!("Read {} bytes from {path:?}", data.len());
    Ok(data)
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the plain-text tab file.
    tab_file_path: String,
    /// Subdivisions per beat.
    #[arg(long)]
    divisions: Option<u32>,
    /// Time signature label, e.g. 4/4.
    #[arg(long)]
    time_signature: Option<String>,
    /// Number of strings, i.e. lines per measure block.
    #[arg(long)]
    strings: Option<usize>,
    /// Reject short lines, incomplete blocks and inconsistent root notes.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the decoded tablature as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl CliArgs {
    fn merge_into(&self, mut settings: DecoderSettings) -> DecoderSettings {
        if let Some(divisions) = self.divisions {
            settings.divisions = divisions;
        }
        if let Some(time_signature) = &self.time_signature {
            settings.time_signature.clone_from(time_signature);
        }
        if let Some(strings) = self.strings {
            settings.string_count = strings;
        }
        settings.strict |= self.strict;
        settings
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<TabError> for AppError {
    fn from(error: TabError) -> Self {
        match error {
            TabError::ParsingError(e) => Self::ParsingError(e.to_string()),
            TabError::ConfigError(s) => Self::ConfigError(s),
            TabError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
