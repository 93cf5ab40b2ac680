use crate::harness::{Assertion, Scenario};

#[test]
fn test_parent_clamped_at_root() {
    Scenario::new("parent_clamped_at_root")
        .with_dir("a")
        .types("cd ..")
        .assert_cwd("/")
        .types("cd ..")
        .types("cd ..")
        .assert_cwd("/")
        .types("cd a")
        .types("cd ..")
        .types("cd ..")
        .assert_cwd("/")
        .run()
        .unwrap();
}

#[test]
fn test_nested_navigation() {
    Scenario::new("nested_navigation")
        .with_dir("a")
        .with_dir("a/b")
        .with_file("a/b/deep.txt", b"x")
        .types("cd a")
        .assert_cwd("/a")
        .types("cd b")
        .assert_cwd("/a/b")
        .types("ls")
        .assert_output("deep.txt\n")
        .types("cd ..")
        .assert_cwd("/a")
        .types("cd a/b")
        .assert_output("Directory not found.\n")
        .assert_cwd("/a")
        .types("cd b")
        .assert_cwd("/a/b")
        .run()
        .unwrap();
}

#[test]
fn test_cd_never_leaves_tree() {
    let mut scenario = Scenario::new("cd_never_leaves_tree")
        .with_dir("docs")
        .with_file("file.txt", b"not a dir");

    for target in ["missing", "file.txt", "/docs", "/", ".", "../..", "docs/../..", "/etc"] {
        scenario = scenario
            .types(&format!("cd {}", target))
            .assert_output("Directory not found.\n")
            .assert_cwd("/");
    }

    scenario.assert_log(&[]).run().unwrap();
}

#[test]
fn test_cd_usage() {
    Scenario::new("cd_usage")
        .types("cd")
        .assert_output("Usage: cd <directory>\n")
        .assert_cwd("/")
        .assert_log(&[])
        .run()
        .unwrap();
}

#[test]
fn test_commands_resolve_against_cwd() {
    Scenario::new("commands_resolve_against_cwd")
        .with_dir("docs")
        .with_file("top.txt", b"top")
        .types("cd docs")
        .types("touch inner.txt")
        .assert_tree_has("docs/inner.txt")
        .assert_tree_lacks("inner.txt")
        .types("rev top.txt")
        .assert_output("Error: File 'top.txt' not found.\n")
        .assert(Assertion::Cwd("/docs".to_string()))
        .run()
        .unwrap();
}
