use std::fs;
use std::path::Path;

use tracing::info;

use lock_core::settings::settings;

use super::die;
use super::transform_ops::{resolve_row, run_transform};
use crate::remote::VoicevoxClient;

/// Speak `text`, first rewriting it into a row when `row` or `kanji` is given.
pub fn speak_cmd(text: &str, out: &str, row: Option<&str>, kanji: bool) {
    let spoken = if row.is_some() || kanji {
        let row = resolve_row(row);
        run_transform(text, &row, kanji)
    } else {
        text.to_string()
    };

    let client = VoicevoxClient::from_settings(&settings().voice);
    info!(
        base_url = client.base_url(),
        speaker = client.speaker(),
        chars = spoken.chars().count(),
        "speaking"
    );
    let wav = die!(client.synthesize(&spoken), "Error: {}");
    die!(
        fs::write(Path::new(out), &wav),
        "Error writing {out}: {}"
    );
    println!("{spoken}");
    eprintln!("wrote {} bytes to {out}", wav.len());
}
