//! Tests for the request subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_request_file() {
    match parse(&["pget", "request", "-f", "req.json"]) {
        CliCommand::Request { file, json } => {
            assert_eq!(file, Some(PathBuf::from("req.json")));
            assert!(json.is_none());
        }
        _ => panic!("expected Request with file"),
    }
}

#[test]
fn cli_parse_request_inline_json() {
    match parse(&["pget", "request", "--json", r#"{"url": "http://x"}"#]) {
        CliCommand::Request { file, json } => {
            assert!(file.is_none());
            assert_eq!(json.as_deref(), Some(r#"{"url": "http://x"}"#));
        }
        _ => panic!("expected Request with inline JSON"),
    }
}

#[test]
fn cli_parse_request_short_json_flag() {
    match parse(&["pget", "request", "-s", "{}"]) {
        CliCommand::Request { json, .. } => assert_eq!(json.as_deref(), Some("{}")),
        _ => panic!("expected Request with -s"),
    }
}

#[test]
fn cli_parse_request_rejects_both_sources() {
    assert!(Cli::try_parse_from(["pget", "request", "-f", "a.json", "-s", "{}"]).is_err());
}
