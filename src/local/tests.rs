//! Unit tests for repository queries against a scripted git runner.

use rstest::rstest;

use super::{CommitSha, ObjectKind, Repository, RepositoryError};
use crate::process::{ExecuteError, MockGitRunner};

const SHA: &str = "8e3367e40b91850d7f7864b4a8984d25f6e9419e";

fn failure(args: &[String], code: i32) -> ExecuteError {
    ExecuteError::NonZeroExit {
        args: args.to_vec(),
        code,
        stdout: String::new(),
        stderr: "fatal: scripted failure\n".to_owned(),
    }
}

fn subcommand(args: &[String]) -> &str {
    args.first().map_or("", String::as_str)
}

/// Runner that answers one subcommand with `stdout`.
fn answering(expected: &'static str, stdout: &'static str) -> MockGitRunner {
    let mut runner = MockGitRunner::new();
    runner
        .expect_execute()
        .withf(move |args| subcommand(args) == expected)
        .returning(move |_| Ok(stdout.to_owned()));
    runner
}

/// Runner that fails one subcommand with `code`.
fn failing(expected: &'static str, code: i32) -> MockGitRunner {
    let mut runner = MockGitRunner::new();
    runner
        .expect_execute()
        .withf(move |args| subcommand(args) == expected)
        .returning(move |args| Err(failure(args, code)));
    runner
}

mod full_hash {
    use super::*;

    #[rstest]
    fn returns_trimmed_hash() {
        let runner = answering("rev-parse", "8e3367e40b91850d7f7864b4a8984d25f6e9419e\n");

        let sha = Repository::new(&runner)
            .resolve_full_hash("main")
            .expect("query should succeed");

        assert_eq!(sha, Some(CommitSha::new(SHA.to_owned())));
        assert_eq!(sha.map(|s| s.as_str().len()), Some(40));
    }

    #[rstest]
    fn peels_to_a_commit() {
        let mut runner = MockGitRunner::new();
        runner
            .expect_execute()
            .withf(|args| args == ["rev-parse", "--verify", "v1.0.0^{commit}"])
            .times(1)
            .returning(|_| Ok(format!("{SHA}\n")));

        let sha = Repository::new(&runner)
            .resolve_full_hash("v1.0.0")
            .expect("query should succeed");

        assert!(sha.is_some());
    }

    #[rstest]
    fn malformed_revision_is_absent() {
        let runner = failing("rev-parse", 128);

        let sha = Repository::new(&runner)
            .resolve_full_hash("<<commitish>>")
            .expect("unknown revisions are not errors");

        assert_eq!(sha, None);
    }

    #[rstest]
    fn other_failures_propagate() {
        let runner = failing("rev-parse", 129);

        let result = Repository::new(&runner).resolve_full_hash("main");

        assert!(
            matches!(result, Err(RepositoryError::Execute(ref error)) if error.code() == Some(129)),
            "expected exit 129 to propagate, got {result:?}"
        );
    }
}

mod abbrev_ref {
    use super::*;

    #[rstest]
    #[case::branch_name("my-awesome-branch\n", "my-awesome-branch")]
    #[case::empty_output_falls_back("\n", "<<commitish>>")]
    fn resolves_abbreviated_ref(#[case] stdout: &'static str, #[case] expected: &str) {
        let runner = answering("rev-parse", stdout);

        let reference = Repository::new(&runner)
            .resolve_abbrev_ref("<<commitish>>")
            .expect("query should succeed");

        assert_eq!(reference.as_deref(), Some(expected));
    }

    #[rstest]
    fn unknown_revision_is_absent() {
        let runner = failing("rev-parse", 128);

        let reference = Repository::new(&runner)
            .resolve_abbrev_ref("nope")
            .expect("unknown revisions are not errors");

        assert_eq!(reference, None);
    }
}

mod containing_remote {
    use super::*;

    fn runner(remotes: &'static str, branches: &'static str) -> MockGitRunner {
        let mut runner = MockGitRunner::new();
        runner
            .expect_execute()
            .withf(|args| subcommand(args) == "remote")
            .returning(move |_| Ok(remotes.to_owned()));
        runner
            .expect_execute()
            .withf(|args| subcommand(args) == "branch")
            .returning(move |_| Ok(branches.to_owned()));
        runner
    }

    #[rstest]
    #[case::origin(
        "origin\nfork\n",
        "refs/remotes/origin/my-awesome-branch\n",
        Some("origin")
    )]
    #[case::fork(
        "origin\nfork\n",
        "refs/remotes/fork/my-awesome-branch\n",
        Some("fork")
    )]
    #[case::tie_break(
        "origin\nfork\n",
        "refs/remotes/fork/my-branch\nrefs/remotes/origin/my-branch\n",
        Some("origin")
    )]
    #[case::multi_segment_remote(
        "origin\nfork/my-fork\n",
        "refs/remotes/fork/my-fork/feature/x\n",
        Some("fork/my-fork")
    )]
    #[case::no_branch("origin\nfork\n", "", None)]
    fn finds_remote(
        #[case] remotes: &'static str,
        #[case] branches: &'static str,
        #[case] expected: Option<&str>,
    ) {
        let runner = runner(remotes, branches);

        let remote = Repository::new(&runner)
            .find_containing_remote("<<commitish>>")
            .expect("query should succeed");

        assert_eq!(remote.as_deref(), expected);
    }

    #[rstest]
    fn malformed_object_name_is_absent() {
        let mut runner = MockGitRunner::new();
        runner
            .expect_execute()
            .withf(|args| subcommand(args) == "remote")
            .returning(|_| Ok("origin\nfork\n".to_owned()));
        runner
            .expect_execute()
            .withf(|args| subcommand(args) == "branch")
            .returning(|args| Err(failure(args, 129)));

        let remote = Repository::new(&runner)
            .find_containing_remote("<<commitish>>")
            .expect("malformed names are not errors");

        assert_eq!(remote, None);
    }
}

mod fetch_url {
    use super::*;

    #[rstest]
    #[case::https(
        "https://github.com/lambdalisue/deno-git-browse\n",
        "https://github.com/lambdalisue/deno-git-browse"
    )]
    #[case::ssh_url(
        "ssh://git@github.com/lambdalisue/deno-git-browse\n",
        "ssh://git@github.com/lambdalisue/deno-git-browse"
    )]
    #[case::scp_like(
        "git@github.com:acme/widget.git\n",
        "ssh://git@github.com/acme/widget"
    )]
    fn normalises_first_url(#[case] stdout: &'static str, #[case] expected: &str) {
        let runner = answering("remote", stdout);

        let url = Repository::new(&runner)
            .fetch_url("origin")
            .expect("query should succeed")
            .expect("remote should have a URL");

        assert_eq!(url.as_url().as_str(), expected);
    }

    #[rstest]
    fn missing_remote_is_absent() {
        let runner = failing("remote", 2);

        let url = Repository::new(&runner)
            .fetch_url("nope")
            .expect("missing remotes are not errors");

        assert_eq!(url, None);
    }

    #[rstest]
    fn unparseable_url_is_an_error() {
        let runner = answering("remote", "../sibling-checkout\n");

        let result = Repository::new(&runner).fetch_url("local");

        assert!(
            matches!(
                result,
                Err(RepositoryError::InvalidFetchUrl { ref remote, .. }) if remote == "local"
            ),
            "expected InvalidFetchUrl, got {result:?}"
        );
    }
}

mod default_branch {
    use super::*;

    #[rstest]
    #[case::develop(
        "* remote origin\n  Fetch URL: x\n  HEAD branch: develop\n  Remote branches:\n",
        Some("develop")
    )]
    #[case::missing("* remote origin\n  Fetch URL: x\n", None)]
    #[case::unknown("* remote origin\n  HEAD branch: (unknown)\n", None)]
    fn parses_head_branch(#[case] stdout: &'static str, #[case] expected: Option<&str>) {
        let runner = answering("remote", stdout);

        let branch = Repository::new(&runner)
            .default_branch("origin")
            .expect("query should succeed");

        assert_eq!(branch.as_deref(), expected);
    }
}

mod merges {
    use super::*;

    const LOG: &str = "Merge pull request #7 from a/b\n\nBody\n\u{1e}\n\
                       Merge pull request #9\n\u{1e}\n";

    #[rstest]
    fn returns_oldest_merge_message() {
        let mut runner = MockGitRunner::new();
        runner
            .expect_execute()
            .withf(|args| {
                subcommand(args) == "log"
                    && args.last().map(String::as_str) == Some(&*format!("{SHA}..origin/main"))
            })
            .returning(|_| Ok(LOG.to_owned()));

        let message = Repository::new(&runner)
            .first_merge_message(&CommitSha::new(SHA.to_owned()), "origin/main")
            .expect("query should succeed");

        assert_eq!(
            message.as_deref(),
            Some("Merge pull request #7 from a/b\n\nBody")
        );
    }

    #[rstest]
    fn no_merges_is_absent() {
        let runner = answering("log", "");

        let message = Repository::new(&runner)
            .first_merge_message(&CommitSha::new(SHA.to_owned()), "origin/main")
            .expect("query should succeed");

        assert_eq!(message, None);
    }
}

mod object_kind {
    use super::*;

    const LISTING: &str = "040000 tree 1111111111111111111111111111111111111111\tsrc\0\
                           040000 tree 2222222222222222222222222222222222222222\tsrc/bin\0\
                           100644 blob 3333333333333333333333333333333333333333\tsrc/bin/main.rs\0";

    #[rstest]
    #[case::nested_file("src/bin/main.rs", Some(ObjectKind::Blob))]
    #[case::nested_dir("src/bin", Some(ObjectKind::Tree))]
    #[case::top_dir("src", Some(ObjectKind::Tree))]
    #[case::substring_is_not_a_match("bin", None)]
    fn matches_exact_path(#[case] path: &str, #[case] expected: Option<ObjectKind>) {
        let runner = answering("ls-tree", LISTING);

        let kind = Repository::new(&runner)
            .object_kind("HEAD", path)
            .expect("query should succeed");

        assert_eq!(kind, expected);
    }
}
