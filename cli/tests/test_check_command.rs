// Copyright 2026 The Polycheck Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use assert_cmd::Command;
use predicates::prelude::*;

fn polycheck() -> Command {
    Command::cargo_bin("polycheck").unwrap()
}

/// `chapel` reformats in-process rather than shelling out, so this is the
/// one validator whose success doesn't depend on what's installed on the
/// machine running the test.
#[test]
fn check_succeeds_on_an_already_formatted_chapel_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.chpl"), "proc main() {\n  writeln(1);\n}\n").unwrap();

    polycheck()
        .arg("check")
        .arg("--tools")
        .arg("chapel")
        .arg("--no-tui")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("chapel"));
}

#[test]
fn fix_reformats_an_unformatted_chapel_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.chpl");
    std::fs::write(&path, "proc main() {\n\twriteln(1);   \n}\n").unwrap();

    polycheck()
        .arg("fix")
        .arg("--tools")
        .arg("chapel")
        .arg("--no-tui")
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "proc main() {\n  writeln(1);\n}\n"
    );
}

#[test]
fn unknown_tool_name_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    polycheck()
        .arg("check")
        .arg("--tools")
        .arg("not-a-real-tool")
        .arg("--no-tui")
        .arg(dir.path())
        .assert()
        .code(2);
}
