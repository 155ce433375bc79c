//! Command-line front end for the consonant-lock pipeline, plus the remote
//! collaborators it can call: a generative-language service that reads kanji
//! as hiragana, and a VOICEVOX engine that speaks the result.

pub mod commands;
pub mod remote;
pub mod trace_init;
