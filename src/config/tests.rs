//! Unit tests for argument handling and alias loading.

use std::io::Write;

use clap::Parser;
use rstest::rstest;
use tempfile::NamedTempFile;

use super::{AliasMap, BrowseArgs, BrowseTarget};
use crate::telemetry::capture::logged;

fn parse(args: &[&str]) -> BrowseArgs {
    BrowseArgs::try_parse_from(std::iter::once("git-browse").chain(args.iter().copied()))
        .expect("arguments should parse")
}

mod arguments {
    use super::*;

    #[rstest]
    fn defaults() {
        let args = parse(&[]);

        assert_eq!(args.commitish, "HEAD");
        assert_eq!(args.remote, None);
        assert_eq!(args.path_or_default(), ".");
        assert!(!args.no_browser);
        assert_eq!(args.target(), BrowseTarget::Object { permalink: false });
    }

    #[rstest]
    fn all_options() {
        let args = parse(&[
            "--remote",
            "fork",
            "--path",
            "src/lib.rs:3:9",
            "--permalink",
            "-n",
            "-C",
            "/tmp/checkout",
            "v1.0.0",
        ]);

        assert_eq!(args.commitish, "v1.0.0");
        assert_eq!(args.remote.as_deref(), Some("fork"));
        assert_eq!(args.path_or_default(), "src/lib.rs:3:9");
        assert!(args.no_browser);
        assert_eq!(
            args.directory.as_deref().map(camino::Utf8Path::as_str),
            Some("/tmp/checkout")
        );
    }

    #[rstest]
    #[case::object(&[], BrowseTarget::Object { permalink: false })]
    #[case::object_permalink(&["--permalink"], BrowseTarget::Object { permalink: true })]
    #[case::commit(&["--commit"], BrowseTarget::Commit { permalink: false })]
    #[case::commit_permalink(
        &["--commit", "--permalink"],
        BrowseTarget::Commit { permalink: true }
    )]
    #[case::pr(&["--pr"], BrowseTarget::PullRequest)]
    #[case::pr_over_commit(&["--pr", "--commit", "--permalink"], BrowseTarget::PullRequest)]
    #[case::home(&["--home"], BrowseTarget::Home)]
    #[case::home_over_everything(&["--home", "--pr", "--commit"], BrowseTarget::Home)]
    fn selects_target(#[case] args: &[&str], #[case] expected: BrowseTarget) {
        assert_eq!(parse(args).target(), expected);
    }

    #[rstest]
    fn rejects_unknown_flags() {
        let result = BrowseArgs::try_parse_from(["git-browse", "--frobnicate"]);

        assert!(result.is_err(), "unknown flags must be rejected");
    }
}

mod aliases {
    use super::*;

    fn alias_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("should create temp file");
        file.write_all(contents.as_bytes())
            .expect("should write alias file");
        file
    }

    #[rstest]
    fn canonical_host_falls_back_to_the_host() {
        let aliases = AliasMap::from_iter([("git.example.com", "github.com")]);

        assert_eq!(aliases.canonical_host("git.example.com"), "github.com");
        assert_eq!(aliases.canonical_host("gitlab.com"), "gitlab.com");
    }

    #[rstest]
    fn loads_a_json_object() {
        let json = r#"{"git.example.com": "github.com", "lab.example.com": "gitlab.com"}"#;
        let file = alias_file(json);

        let aliases = AliasMap::from_file(file.path());

        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.canonical_host("lab.example.com"), "gitlab.com");
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::array(r#"["github.com"]"#)]
    #[case::non_string_value(r#"{"git.example.com": 42}"#)]
    fn malformed_files_mean_no_aliases(#[case] contents: &str) {
        let file = alias_file(contents);

        assert!(AliasMap::from_file(file.path()).is_empty());
    }

    #[rstest]
    #[case::missing(None)]
    #[case::malformed(Some("not json"))]
    fn unusable_files_are_silent_at_default_level(#[case] contents: Option<&str>) {
        let dir = tempfile::TempDir::new().expect("should create temp directory");
        let path = dir.path().join("aliases.json");
        if let Some(text) = contents {
            std::fs::write(&path, text).expect("should write alias file");
        }

        let at_warn = logged("warn", false, || {
            assert!(AliasMap::from_file(&path).is_empty());
        });
        let at_debug = logged("debug", false, || {
            assert!(AliasMap::from_file(&path).is_empty());
        });

        assert_eq!(at_warn, "", "nothing should reach the default filter");
        assert!(at_debug.contains("alias file"), "debug output: {at_debug}");
    }

    #[rstest]
    fn missing_file_means_no_aliases() {
        let dir = tempfile::TempDir::new().expect("should create temp directory");
        let path = dir.path().join("aliases.json");

        assert!(AliasMap::from_file(&path).is_empty());
    }
}
